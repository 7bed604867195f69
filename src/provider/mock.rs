// src/provider/mock.rs
use crate::contracts::ContractCall;
use crate::provider::{ContractProvider, ProviderError, TransactionHandle};
use crate::transaction::TransactionState;
use alloy_primitives::U256;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Records submitted calls and lets tests drive their status
#[derive(Clone, Default)]
pub struct MockProvider {
    submissions: Arc<Mutex<Vec<(ContractCall, watch::Sender<TransactionState>)>>>,
    balance: U256,
    staked: U256,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider whose balance reads return `balance` held and `staked` in the farm
    pub fn with_balances(balance: U256, staked: U256) -> Self {
        Self { balance, staked, ..Self::default() }
    }

    pub fn calls(&self) -> Vec<ContractCall> {
        self.submissions.lock().unwrap().iter().map(|(call, _)| call.clone()).collect()
    }

    pub fn call_count(&self) -> usize {
        self.submissions.lock().unwrap().len()
    }

    /// Publish a status for the `index`-th submitted call
    pub fn report(&self, index: usize, state: TransactionState) {
        let submissions = self.submissions.lock().unwrap();
        submissions[index].1.send_replace(state);
    }
}

#[async_trait]
impl ContractProvider for MockProvider {
    async fn chain_id(&self) -> Result<Option<u64>, ProviderError> {
        Ok(None)
    }

    async fn account(&self) -> Result<Option<String>, ProviderError> {
        Ok(Some("0x00000000000000000000000000000000000000aa".to_string()))
    }

    async fn token_balance(&self, _token: &str, _account: &str) -> Result<U256, ProviderError> {
        Ok(self.balance)
    }

    async fn staked_balance(
        &self,
        _token_farm: &str,
        _token: &str,
        _account: &str,
    ) -> Result<U256, ProviderError> {
        Ok(self.staked)
    }

    fn submit(&self, call: ContractCall) -> TransactionHandle {
        let name = call.name();
        let (tx, rx) = watch::channel(TransactionState::default());
        self.submissions.lock().unwrap().push((call, tx));
        TransactionHandle::new(name, rx)
    }

    fn get_name(&self) -> String {
        "Mock provider".to_string()
    }
}
