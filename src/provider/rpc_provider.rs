// src/provider/rpc_provider.rs
use crate::config::{AppConfig, NULL_ADDRESS};
use crate::contracts::{self, ContractCall};
use crate::provider::{ContractProvider, ProviderError, TransactionHandle};
use crate::rpc::RpcClient;
use crate::transaction::TransactionState;
use alloy_primitives::U256;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::watch;

/// Provider backed by a node's JSON-RPC endpoint and its unlocked accounts
#[derive(Clone)]
pub struct RpcProvider {
    client: RpcClient,
    account: Option<String>,
    poll_interval: Duration,
}

impl RpcProvider {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            client: RpcClient::new(&config.rpc_url),
            account: config.account.clone(),
            poll_interval: config.poll_interval(),
        }
    }

    async fn sender(&self) -> Result<String, ProviderError> {
        match self.account().await? {
            Some(account) => Ok(account),
            None => Err("No account available on the connected node".into()),
        }
    }

    /// Drive one transaction from signature request to receipt
    async fn track(self, call: ContractCall, state: watch::Sender<TransactionState>) {
        let name = call.name();

        let data = match call.encode() {
            Ok(data) => data,
            Err(e) => {
                log::error!("{}: failed to encode call: {}", name, e);
                state.send_replace(TransactionState::exception(e));
                return;
            }
        };

        let from = match self.sender().await {
            Ok(from) => from,
            Err(e) => {
                log::error!("{}: {}", name, e);
                state.send_replace(TransactionState::exception(e.to_string()));
                return;
            }
        };

        let hash = match self.client.send_transaction(&from, call.target(), &data).await {
            Ok(hash) => hash,
            Err(e) => {
                log::warn!("{}: transaction rejected: {}", name, e);
                state.send_replace(TransactionState::exception(e));
                return;
            }
        };

        log::info!("{}: broadcast {}", name, hash);
        state.send_replace(TransactionState::mining(hash.clone()));

        loop {
            if state.is_closed() {
                log::debug!("{}: no observers left, stop tracking {}", name, hash);
                return;
            }

            match self.client.get_transaction_receipt(&hash).await {
                Ok(Some(receipt)) => {
                    let terminal = receipt.to_state();
                    log::info!("{}: {} mined with status {:?}", name, hash, terminal.status);
                    state.send_replace(terminal);
                    return;
                }
                Ok(None) => {}
                Err(e) => log::warn!("{}: receipt lookup for {} failed: {}", name, hash, e),
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

#[async_trait]
impl ContractProvider for RpcProvider {
    async fn chain_id(&self) -> Result<Option<u64>, ProviderError> {
        Ok(Some(self.client.chain_id().await?))
    }

    async fn account(&self) -> Result<Option<String>, ProviderError> {
        if let Some(account) = &self.account {
            return Ok(Some(account.clone()));
        }
        let accounts = self.client.accounts().await?;
        Ok(accounts.into_iter().next())
    }

    async fn token_balance(&self, token: &str, account: &str) -> Result<U256, ProviderError> {
        if token.eq_ignore_ascii_case(NULL_ADDRESS) {
            return Ok(U256::ZERO);
        }
        let data = contracts::balance_of_calldata(account)?;
        let result = self.client.call(token, &data).await?;
        Ok(contracts::decode_uint256(&result)?)
    }

    async fn staked_balance(
        &self,
        token_farm: &str,
        token: &str,
        account: &str,
    ) -> Result<U256, ProviderError> {
        if token_farm.eq_ignore_ascii_case(NULL_ADDRESS)
            || token.eq_ignore_ascii_case(NULL_ADDRESS)
        {
            return Ok(U256::ZERO);
        }
        let data = contracts::staking_balance_calldata(token, account)?;
        let result = self.client.call(token_farm, &data).await?;
        Ok(contracts::decode_uint256(&result)?)
    }

    fn submit(&self, call: ContractCall) -> TransactionHandle {
        let name = call.name();
        let (tx, rx) = watch::channel(TransactionState::pending_signature());
        log::info!("{}: requesting signature for call to {}", name, call.target());
        tokio::spawn(self.clone().track(call, tx));
        TransactionHandle::new(name, rx)
    }

    fn get_name(&self) -> String {
        format!("JSON-RPC wallet: {}", self.client.rpc_url())
    }
}
