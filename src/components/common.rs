use dioxus::prelude::*;
use crate::config::tokens::TokenIcon;
use crate::provider::{ContractProvider, RpcProvider};
use crate::config::AppConfig;
use std::sync::Arc;

const ICON_DAPP: Asset = asset!("/assets/icons/dapp.svg");
const ICON_ETH: Asset = asset!("/assets/icons/eth.svg");
const ICON_DAI: Asset = asset!("/assets/icons/dai.svg");

pub fn token_icon(icon: TokenIcon) -> Asset {
    match icon {
        TokenIcon::Dapp => ICON_DAPP,
        TokenIcon::Eth => ICON_ETH,
        TokenIcon::Dai => ICON_DAI,
    }
}

/// Wallet/contract provider shared with every component through context
#[derive(Clone)]
pub struct WalletContext {
    pub provider: Arc<dyn ContractProvider>,
}

impl WalletContext {
    pub fn from_env() -> Self {
        let config = AppConfig::from_env();
        let provider: Arc<dyn ContractProvider> = Arc::new(RpcProvider::new(&config));
        log::info!("Using {}", provider.get_name());
        Self { provider }
    }
}
