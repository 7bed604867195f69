use super::{ConfigError, NetworkTables, NULL_ADDRESS};
use serde::{Deserialize, Serialize};

pub const DAPP_TOKEN_CONTRACT: &str = "DappToken";
pub const TOKEN_FARM_CONTRACT: &str = "TokenFarm";
pub const MOCK_WETH_CONTRACT: &str = "MockWETH";
pub const MOCK_DAI_CONTRACT: &str = "MockDAI";

/// Icon shown next to a supported token
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenIcon {
    Dapp,
    Eth,
    Dai,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub image: TokenIcon,
    pub address: String,
    pub name: String,
}

impl Token {
    fn new(image: TokenIcon, address: &str, name: &str) -> Self {
        Self {
            image,
            address: address.to_string(),
            name: name.to_string(),
        }
    }

    pub fn is_null(&self) -> bool {
        self.address.eq_ignore_ascii_case(NULL_ADDRESS)
    }
}

/// Resolve the DAPP, WETH and DAI tokens for the connected chain, in that order.
///
/// Without a chain every address is the zero address.
pub fn resolve_supported_tokens(
    chain_id: Option<u64>,
    tables: &NetworkTables,
) -> Result<Vec<Token>, ConfigError> {
    let Some(id) = chain_id else {
        return Ok(vec![
            Token::new(TokenIcon::Dapp, NULL_ADDRESS, "DAPP"),
            Token::new(TokenIcon::Eth, NULL_ADDRESS, "WETH"),
            Token::new(TokenIcon::Dai, NULL_ADDRESS, "DAI"),
        ]);
    };

    let label = tables.network_label(chain_id)?;
    let params = tables.network_params(label)?;
    let dapp = tables.latest_deployment(id, DAPP_TOKEN_CONTRACT)?;
    let weth = configured_or_mock(
        params.weth_token.as_deref(),
        "weth_token",
        MOCK_WETH_CONTRACT,
        id,
        label,
        tables,
    )?;
    let fau = configured_or_mock(
        params.fau_token.as_deref(),
        "fau_token",
        MOCK_DAI_CONTRACT,
        id,
        label,
        tables,
    )?;

    Ok(vec![
        Token::new(TokenIcon::Dapp, dapp, "DAPP"),
        Token::new(TokenIcon::Eth, weth, "WETH"),
        Token::new(TokenIcon::Dai, fau, "DAI"),
    ])
}

// Local networks have no configured token, only the mock deployed alongside the farm
fn configured_or_mock<'a>(
    configured: Option<&'a str>,
    key: &str,
    mock: &str,
    chain_id: u64,
    label: &str,
    tables: &'a NetworkTables,
) -> Result<&'a str, ConfigError> {
    match configured {
        Some(address) => Ok(address),
        None => tables.latest_deployment(chain_id, mock).map_err(|_| {
            ConfigError::ConfigurationMismatch(format!(
                "{} missing for network {} and no {} deployment on chain {}",
                key, label, mock, chain_id
            ))
        }),
    }
}

/// Most recent deployment of a named contract, or the zero address when disconnected
pub fn resolve_contract_address(
    chain_id: Option<u64>,
    contract: &str,
    tables: &NetworkTables,
) -> Result<String, ConfigError> {
    match chain_id {
        None => Ok(NULL_ADDRESS.to_string()),
        Some(id) => tables.latest_deployment(id, contract).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> NetworkTables {
        NetworkTables::from_json(
            r#"{ "42": { "DappToken": ["0xdapp_new", "0xdapp_old"], "TokenFarm": ["0xfarm"] },
                 "99": { "TokenFarm": ["0xfarm99"] },
                 "1337": { "DappToken": ["0xdapp_local"],
                           "MockWETH": ["0xmock_weth"],
                           "MockDAI": ["0xmock_dai"] } }"#,
            r#"{ "dev": { "weth_token": "0xweth_dev", "fau_token": "0xfau_dev" },
                 "kovan": { "weth_token": "0xweth", "fau_token": "0xfau" },
                 "partial": { "weth_token": "0xweth" },
                 "development": {} }"#,
            r#"{ "42": "kovan", "99": "partial", "1337": "development" }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_disconnected_resolves_to_null_addresses() {
        let tokens = resolve_supported_tokens(None, &tables()).unwrap();
        assert_eq!(tokens.len(), 3);
        assert!(tokens.iter().all(|t| t.address == NULL_ADDRESS));
        assert!(tokens.iter().all(Token::is_null));
    }

    #[test]
    fn test_connected_uses_latest_deployment_and_params() {
        let tokens = resolve_supported_tokens(Some(42), &tables()).unwrap();
        let names: Vec<&str> = tokens.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["DAPP", "WETH", "DAI"]);
        assert_eq!(tokens[0].address, "0xdapp_new");
        assert_eq!(tokens[0].image, TokenIcon::Dapp);
        assert_eq!(tokens[1].address, "0xweth");
        assert_eq!(tokens[2].address, "0xfau");
    }

    #[test]
    fn test_unknown_chain_is_configuration_mismatch() {
        let result = resolve_supported_tokens(Some(5), &tables());
        assert!(matches!(result, Err(ConfigError::ConfigurationMismatch(_))));
    }

    #[test]
    fn test_incomplete_tables_are_configuration_mismatch() {
        // chain 99 has no DappToken deployment and no fau_token
        let result = resolve_supported_tokens(Some(99), &tables());
        assert!(matches!(result, Err(ConfigError::ConfigurationMismatch(_))));
    }

    #[test]
    fn test_local_network_falls_back_to_mock_deployments() {
        let tokens = resolve_supported_tokens(Some(1337), &tables()).unwrap();
        assert_eq!(tokens[0].address, "0xdapp_local");
        assert_eq!(tokens[1].address, "0xmock_weth");
        assert_eq!(tokens[2].address, "0xmock_dai");
    }

    #[test]
    fn test_embedded_local_network_without_mocks_is_mismatch() {
        // the shipped tables only hold the DappToken/TokenFarm pair for 1337
        let tables = crate::config::get_network_tables();
        match resolve_supported_tokens(Some(1337), tables) {
            Err(ConfigError::ConfigurationMismatch(msg)) => assert!(msg.contains("MockWETH")),
            other => panic!("expected a configuration mismatch, got {:?}", other),
        }
        assert!(resolve_supported_tokens(Some(42), tables).is_err());
    }

    #[test]
    fn test_resolve_token_farm() {
        let t = tables();
        assert_eq!(resolve_contract_address(None, TOKEN_FARM_CONTRACT, &t).unwrap(), NULL_ADDRESS);
        assert_eq!(resolve_contract_address(Some(42), TOKEN_FARM_CONTRACT, &t).unwrap(), "0xfarm");
        assert!(resolve_contract_address(Some(1), TOKEN_FARM_CONTRACT, &t).is_err());
    }
}
