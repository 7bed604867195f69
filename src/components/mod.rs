pub mod common;
pub mod hooks;
pub mod main_view;
pub mod stake_form;
pub mod wallet_balance;
pub mod your_wallet;

pub use common::WalletContext;
pub use main_view::Main;
