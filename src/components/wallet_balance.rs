use dioxus::prelude::*;
use crate::components::common::{token_icon, WalletContext};
use crate::config::tokens::Token;
use crate::provider::ContractProvider;
use std::sync::Arc;
use crate::units::{format_token_amount, TOKEN_DECIMALS};

#[derive(Clone, Debug, PartialEq, Default)]
struct Balances {
    wallet: String,
    staked: String,
}

async fn load_balances(
    provider: Arc<dyn ContractProvider>,
    token_address: String,
    token_farm: String,
    account: Option<String>,
) -> Result<Balances, String> {
    let Some(account) = account else {
        return Ok(Balances::default());
    };
    let held = provider.token_balance(&token_address, &account).await.map_err(|e| e.to_string())?;
    let staked = provider
        .staked_balance(&token_farm, &token_address, &account)
        .await
        .map_err(|e| e.to_string())?;
    Ok(Balances {
        wallet: format_token_amount(held, TOKEN_DECIMALS, 4)?,
        staked: format_token_amount(staked, TOKEN_DECIMALS, 4)?,
    })
}

/// Wallet and staked balance of one token for the connected account
#[component]
pub fn WalletBalance(
    token: Token,
    token_farm: String,
    account: Option<String>,
    refresh: Signal<u32>,
) -> Element {
    let wallet = use_context::<WalletContext>();
    let token_address = token.address.clone();

    let balances = use_resource(move || {
        let provider = wallet.provider.clone();
        let token_address = token_address.clone();
        let token_farm = token_farm.clone();
        let account = account.clone();
        // re-fetch after stake/unstake
        let _ = refresh();
        async move { load_balances(provider, token_address, token_farm, account).await }
    });

    let icon = token_icon(token.image);
    let name = token.name.clone();

    rsx! {
        div {
            class: "wallet-balance",
            img { class: "token-icon", src: icon, alt: "{name} logo" }
            {
                match &*balances.read() {
                    Some(Ok(b)) => rsx! {
                        div {
                            class: "balance-row",
                            span { class: "balance-label", "Your un-staked {name} balance" }
                            span { class: "balance-value", "{b.wallet}" }
                        }
                        div {
                            class: "balance-row",
                            span { class: "balance-label", "Staked" }
                            span { class: "balance-value", "{b.staked}" }
                        }
                    },
                    Some(Err(e)) => rsx! {
                        div { class: "error-message", "Failed to load {name} balance: {e}" }
                    },
                    None => rsx! {
                        div { class: "loading-text", "Loading balance..." }
                    },
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::MockProvider;
    use alloy_primitives::U256;

    #[tokio::test]
    async fn test_load_balances_formats_wallet_and_staked() {
        let mock = MockProvider::with_balances(
            U256::from(1_234_567_000_000_000_000u128),
            U256::from(500_000_000_000_000_000u128),
        );
        let balances = load_balances(
            Arc::new(mock),
            "0xToken".to_string(),
            "0xFarm".to_string(),
            Some("0x00000000000000000000000000000000000000aa".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(balances.wallet, "1.2345");
        assert_eq!(balances.staked, "0.5");
    }

    #[tokio::test]
    async fn test_load_balances_without_account_is_empty() {
        let mock = MockProvider::with_balances(U256::from(1u64), U256::ZERO);
        let balances =
            load_balances(Arc::new(mock), "0xToken".to_string(), "0xFarm".to_string(), None)
                .await
                .unwrap();
        assert_eq!(balances, Balances::default());
    }
}
