// src/provider/mod.rs
use crate::contracts::ContractCall;
use crate::transaction::TransactionState;
use alloy_primitives::U256;
use async_trait::async_trait;
use tokio::sync::watch;

pub mod rpc_provider;
#[cfg(test)]
pub mod mock;

pub use rpc_provider::RpcProvider;

#[derive(Debug, Clone, PartialEq)]
pub struct ProviderError(String);

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ProviderError {}

impl From<String> for ProviderError {
    fn from(s: String) -> Self {
        ProviderError(s)
    }
}

impl From<&str> for ProviderError {
    fn from(s: &str) -> Self {
        ProviderError(s.to_string())
    }
}

/// Observable status of one submitted contract call
#[derive(Clone, Debug)]
pub struct TransactionHandle {
    name: &'static str,
    state: watch::Receiver<TransactionState>,
}

impl TransactionHandle {
    pub fn new(name: &'static str, state: watch::Receiver<TransactionState>) -> Self {
        Self { name, state }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn subscribe(&self) -> watch::Receiver<TransactionState> {
        self.state.clone()
    }

    /// Wait until the call reaches Success, Fail or Exception
    pub async fn wait(mut self) -> TransactionState {
        match self.state.wait_for(|s| s.status.is_terminal()).await {
            Ok(state) => state.clone(),
            Err(_) => TransactionState::exception("transaction tracking stopped"),
        }
    }
}

/// Wallet and contract access used by the staking flow
#[async_trait]
pub trait ContractProvider: Send + Sync {
    /// Chain the wallet is connected to, if any
    async fn chain_id(&self) -> Result<Option<u64>, ProviderError>;

    /// Account transactions are sent from, if any
    async fn account(&self) -> Result<Option<String>, ProviderError>;

    /// ERC20 balance of `account`
    async fn token_balance(&self, token: &str, account: &str) -> Result<U256, ProviderError>;

    /// Amount of `token` staked by `account` in the farm
    async fn staked_balance(
        &self,
        token_farm: &str,
        token: &str,
        account: &str,
    ) -> Result<U256, ProviderError>;

    /// Submit a call without waiting; progress is reported through the handle
    fn submit(&self, call: ContractCall) -> TransactionHandle;

    fn get_name(&self) -> String;
}
