use dioxus::prelude::*;
use crate::components::hooks::use_chain_id;
use crate::components::your_wallet::YourWallet;
use crate::config::get_network_tables;
use crate::config::tokens::{
    resolve_contract_address, resolve_supported_tokens, Token, TOKEN_FARM_CONTRACT,
};

fn resolve_network(chain_id: Option<u64>) -> Result<(Vec<Token>, String), String> {
    let tables = get_network_tables();
    let tokens = resolve_supported_tokens(chain_id, tables).map_err(|e| e.to_string())?;
    let token_farm =
        resolve_contract_address(chain_id, TOKEN_FARM_CONTRACT, tables).map_err(|e| e.to_string())?;
    Ok((tokens, token_farm))
}

/// Landing page: resolves the tokens for the connected chain
#[component]
pub fn Main() -> Element {
    let chain_id = use_chain_id();

    let resolved = use_memo(move || resolve_network(chain_id.read().clone().flatten()));

    rsx! {
        div {
            class: "main-container",
            h2 { class: "main-title", "Dapp Token App" }
            {
                match resolved() {
                    Ok((tokens, token_farm)) => rsx! {
                        YourWallet { supported_tokens: tokens, token_farm: token_farm }
                    },
                    Err(e) => {
                        log::error!("Unsupported network: {}", e);
                        rsx! {
                            div { class: "error-message", "This network is not supported: {e}" }
                        }
                    }
                }
            }
        }
    }
}
