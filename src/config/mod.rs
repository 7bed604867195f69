pub mod tokens;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;

/// Zero address used whenever no network is connected
pub const NULL_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

/// Network label used for lookups when no chain id is known
pub const DEFAULT_NETWORK: &str = "dev";

const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

// Embed the deployment outputs at compile time
static DEPLOYMENT_MAP_JSON: &str = include_str!("../../assets/networks/map.json");
static NETWORK_CONFIG_JSON: &str = include_str!("../../assets/networks/network_config.json");
static HELPER_CONFIG_JSON: &str = include_str!("../../assets/networks/helper_config.json");

static NETWORK_TABLES: LazyLock<NetworkTables> = LazyLock::new(|| {
    match NetworkTables::from_json(DEPLOYMENT_MAP_JSON, NETWORK_CONFIG_JSON, HELPER_CONFIG_JSON) {
        Ok(tables) => {
            log::info!(
                "Loaded network tables: {} deployments, {} networks",
                tables.deployments.len(),
                tables.networks.len()
            );
            tables
        }
        Err(e) => {
            log::error!("Failed to parse embedded network tables: {}", e);
            NetworkTables::default()
        }
    }
});

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The requested network or contract is missing from the lookup tables
    ConfigurationMismatch(String),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConfigError::ConfigurationMismatch(msg) => write!(f, "configuration mismatch: {}", msg),
            ConfigError::Parse(msg) => write!(f, "failed to parse configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}

/// Token addresses configured per network label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkParams {
    pub weth_token: Option<String>,
    pub fau_token: Option<String>,
    #[serde(default)]
    pub verify: bool,
}

/// Static lookup tables produced by the contract deployment
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkTables {
    /// chain id -> contract name -> deployment addresses, most recent first
    pub deployments: HashMap<String, HashMap<String, Vec<String>>>,
    /// network label -> token addresses
    pub networks: HashMap<String, NetworkParams>,
    /// chain id -> network label
    pub labels: HashMap<String, String>,
}

impl NetworkTables {
    pub fn from_json(deployments: &str, networks: &str, labels: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            deployments: serde_json::from_str(deployments)?,
            networks: serde_json::from_str(networks)?,
            labels: serde_json::from_str(labels)?,
        })
    }

    pub fn network_label(&self, chain_id: Option<u64>) -> Result<&str, ConfigError> {
        match chain_id {
            None => Ok(DEFAULT_NETWORK),
            Some(id) => self
                .labels
                .get(&id.to_string())
                .map(String::as_str)
                .ok_or_else(|| {
                    ConfigError::ConfigurationMismatch(format!("no network label for chain {}", id))
                }),
        }
    }

    /// Most recent deployment of `contract` on `chain_id`
    pub fn latest_deployment(&self, chain_id: u64, contract: &str) -> Result<&str, ConfigError> {
        self.deployments
            .get(&chain_id.to_string())
            .and_then(|contracts| contracts.get(contract))
            .and_then(|addresses| addresses.first())
            .map(String::as_str)
            .ok_or_else(|| {
                ConfigError::ConfigurationMismatch(format!(
                    "no {} deployment for chain {}",
                    contract, chain_id
                ))
            })
    }

    pub fn network_params(&self, label: &str) -> Result<&NetworkParams, ConfigError> {
        self.networks
            .get(label)
            .ok_or_else(|| {
                ConfigError::ConfigurationMismatch(format!("no parameters for network {}", label))
            })
    }
}

/// Get reference to the embedded network tables
pub fn get_network_tables() -> &'static NetworkTables {
    &NETWORK_TABLES
}

/// Runtime settings for the JSON-RPC wallet provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub rpc_url: String,
    /// Sending account; the node's first account is used when unset
    pub account: Option<String>,
    pub poll_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            account: None,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl AppConfig {
    /// Load provider configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            rpc_url: std::env::var("DAPP_RPC_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_RPC_URL.to_string()),
            account: std::env::var("DAPP_ACCOUNT")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            poll_interval_ms: std::env::var("DAPP_POLL_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_POLL_INTERVAL_MS),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}
