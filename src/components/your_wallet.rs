use dioxus::prelude::*;
use crate::components::common::token_icon;
use crate::components::hooks::use_account;
use crate::components::stake_form::StakeForm;
use crate::components::wallet_balance::WalletBalance;
use crate::config::tokens::Token;

/// Tabbed view of the supported tokens with balance and stake form
#[component]
pub fn YourWallet(supported_tokens: Vec<Token>, token_farm: String) -> Element {
    let mut selected = use_signal(|| 0usize);
    let refresh = use_signal(|| 0u32);
    let account = use_account();

    let account_value = account.read().clone().flatten();
    let index = selected().min(supported_tokens.len().saturating_sub(1));
    let current = supported_tokens.get(index).cloned();

    rsx! {
        div {
            class: "your-wallet",
            h1 { class: "wallet-title", "Your Wallet!" }

            if let Some(address) = account_value.clone() {
                div { class: "address-display", "{address}" }
            }
            if account_value.is_none() {
                div { class: "wallet-warning", "Connect a wallet to see your balances" }
            }

            div {
                class: "token-tabs",
                for (i, token) in supported_tokens.iter().enumerate() {
                    button {
                        key: "{token.name}",
                        class: if i == index { "token-tab active" } else { "token-tab" },
                        onclick: move |_| selected.set(i),
                        img { class: "tab-icon", src: token_icon(token.image) }
                        "{token.name}"
                    }
                }
            }

            if let Some(token) = current {
                div {
                    class: "token-panel",
                    key: "{token.address}-{token_farm}-{account_value:?}",
                    WalletBalance {
                        token: token.clone(),
                        token_farm: token_farm.clone(),
                        account: account_value.clone(),
                        refresh: refresh,
                    }
                    StakeForm {
                        token: token.clone(),
                        token_farm: token_farm.clone(),
                        refresh: refresh,
                    }
                }
            }
        }
    }
}
