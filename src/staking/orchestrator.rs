// src/staking/orchestrator.rs
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

use crate::contracts::ContractCall;
use crate::provider::{ContractProvider, TransactionHandle};
use crate::staking::sequencer::{StakeCommand, StakeProgress, StakeSequencer, StakeStep};
use crate::transaction::TransactionState;

struct Inner {
    provider: Arc<dyn ContractProvider>,
    sequencer: Mutex<StakeSequencer>,
    progress: watch::Sender<StakeProgress>,
}

/// Runs approve-then-stake sessions for one token against the provider
#[derive(Clone)]
pub struct StakeOrchestrator {
    inner: Arc<Inner>,
}

impl PartialEq for StakeOrchestrator {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl StakeOrchestrator {
    pub fn new(provider: Arc<dyn ContractProvider>, token_farm: &str, token: &str) -> Self {
        let (progress, _) = watch::channel(StakeProgress::default());
        Self {
            inner: Arc::new(Inner {
                provider,
                sequencer: Mutex::new(StakeSequencer::new(token_farm, token)),
                progress,
            }),
        }
    }

    /// Approve the farm for `amount` of the token, then stake it once approved.
    ///
    /// `amount` is a base-unit integer string and is passed through unchecked.
    pub async fn initiate(&self, amount: &str) {
        let command = {
            let mut sequencer = self.inner.sequencer.lock().await;
            let command = sequencer.initiate(amount);
            log::info!(
                "Stake session {}: approving {} of {} for {}",
                command.session,
                amount,
                sequencer.token(),
                sequencer.token_farm()
            );
            self.publish(&sequencer);
            command
        };
        self.execute(command);
    }

    pub fn state(&self) -> TransactionState {
        self.inner.progress.borrow().state.clone()
    }

    pub fn progress(&self) -> StakeProgress {
        self.inner.progress.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<StakeProgress> {
        self.inner.progress.subscribe()
    }

    fn publish(&self, sequencer: &StakeSequencer) {
        self.inner.progress.send_if_modified(|current| {
            let next = sequencer.progress();
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }

    fn execute(&self, command: StakeCommand) {
        let StakeCommand { session, step, call } = command;
        let handle = self.inner.provider.submit(call);
        let this = self.clone();
        tokio::spawn(async move { this.follow(session, step, handle).await });
    }

    /// Feed every status of `handle` into the sequencer until it is terminal
    async fn follow(self, session: u64, step: StakeStep, handle: TransactionHandle) {
        let mut updates = handle.subscribe();
        loop {
            let state = updates.borrow_and_update().clone();
            let terminal = state.status.is_terminal();
            self.apply(session, step, state).await;
            if terminal || updates.changed().await.is_err() {
                break;
            }
        }
    }

    async fn apply(&self, session: u64, step: StakeStep, state: TransactionState) {
        let next = {
            let mut sequencer = self.inner.sequencer.lock().await;
            log::debug!("Stake session {}: {:?} is {:?}", session, step, state.status);
            if state.status.is_failure() {
                log::warn!(
                    "Stake session {}: {} failed: {}",
                    session,
                    step_name(step),
                    state.error.as_deref().unwrap_or("unknown error")
                );
            }
            let next = sequencer.on_update(session, step, state);
            self.publish(&sequencer);
            if next.is_none() && sequencer.session() == session && sequencer.is_complete() {
                log::info!(
                    "Stake session {} finished for amount {}: {:?}",
                    session,
                    sequencer.amount_to_stake(),
                    sequencer.state().status
                );
            }
            next
        };

        if let Some(command) = next {
            log::info!("Stake session {}: approval confirmed, submitting stake", command.session);
            self.execute(command);
        }
    }
}

fn step_name(step: StakeStep) -> &'static str {
    match step {
        StakeStep::Approve => "approval",
        StakeStep::Stake => "stake",
    }
}

/// Withdraw every staked unit of `token` from the farm
pub fn unstake(
    provider: &dyn ContractProvider,
    token_farm: &str,
    token: &str,
) -> TransactionHandle {
    log::info!("Unstaking {} from {}", token, token_farm);
    provider.submit(ContractCall::Unstake {
        token_farm: token_farm.to_string(),
        token: token.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::mock::MockProvider;
    use crate::transaction::{TransactionStatus, TxReceipt};
    use std::time::Duration;
    use tokio::time::timeout;

    fn receipt(hash: &str) -> TxReceipt {
        TxReceipt { transaction_hash: hash.to_string(), block_number: Some(3), gas_used: None }
    }

    async fn wait_for_status(
        rx: &mut watch::Receiver<StakeProgress>,
        step: StakeStep,
        status: TransactionStatus,
    ) -> StakeProgress {
        timeout(Duration::from_secs(2), rx.wait_for(|p| p.step == step && p.state.status == status))
            .await
            .expect("timed out waiting for status")
            .expect("orchestrator dropped")
            .clone()
    }

    async fn wait_for_calls(mock: &MockProvider, count: usize) {
        timeout(Duration::from_secs(2), async {
            while mock.call_count() < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("timed out waiting for submission");
    }

    fn setup() -> (MockProvider, StakeOrchestrator) {
        let mock = MockProvider::new();
        let orchestrator = StakeOrchestrator::new(Arc::new(mock.clone()), "0xFarm", "0xA");
        (mock, orchestrator)
    }

    #[tokio::test]
    async fn test_approval_success_triggers_single_stake() {
        let (mock, orchestrator) = setup();
        let mut rx = orchestrator.subscribe();

        orchestrator.initiate("100").await;
        assert_eq!(mock.call_count(), 1);

        mock.report(0, TransactionState::pending_signature());
        wait_for_status(&mut rx, StakeStep::Approve, TransactionStatus::PendingSignature).await;
        mock.report(0, TransactionState::success(receipt("0x1")));
        wait_for_calls(&mock, 2).await;

        assert_eq!(
            mock.calls()[1],
            ContractCall::Stake {
                token_farm: "0xFarm".to_string(),
                token: "0xA".to_string(),
                amount: "100".to_string(),
            }
        );

        mock.report(1, TransactionState::mining("0x2".into()));
        wait_for_status(&mut rx, StakeStep::Stake, TransactionStatus::Mining).await;
        mock.report(1, TransactionState::success(receipt("0x2")));
        let done = wait_for_status(&mut rx, StakeStep::Stake, TransactionStatus::Success).await;
        assert_eq!(done.state.receipt.unwrap().transaction_hash, "0x2");

        // re-observing approval success does not stake again
        mock.report(0, TransactionState::success(receipt("0x1")));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_approval_failure_never_stakes() {
        let (mock, orchestrator) = setup();
        let mut rx = orchestrator.subscribe();

        orchestrator.initiate("100").await;
        let failed = TransactionState::fail(receipt("0x1"));
        mock.report(0, failed.clone());

        let progress = wait_for_status(&mut rx, StakeStep::Approve, TransactionStatus::Fail).await;
        assert_eq!(progress.state, failed);
        assert_eq!(orchestrator.state(), failed);

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_stake_failure_keeps_approval() {
        let (mock, orchestrator) = setup();
        let mut rx = orchestrator.subscribe();

        orchestrator.initiate("7").await;
        mock.report(0, TransactionState::success(receipt("0x1")));
        wait_for_calls(&mock, 2).await;
        mock.report(1, TransactionState::exception("User denied transaction signature"));

        let progress =
            wait_for_status(&mut rx, StakeStep::Stake, TransactionStatus::Exception).await;
        assert_eq!(progress.state.error.as_deref(), Some("User denied transaction signature"));
        // no revoke call
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_new_session_replaces_old_one() {
        let (mock, orchestrator) = setup();

        orchestrator.initiate("1").await;
        orchestrator.initiate("2").await;
        assert_eq!(orchestrator.progress().session, 2);

        // old approval succeeding must not stake the old amount
        mock.report(0, TransactionState::success(receipt("0x1")));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(mock.call_count(), 2);

        mock.report(1, TransactionState::success(receipt("0x2")));
        wait_for_calls(&mock, 3).await;
        assert!(matches!(&mock.calls()[2], ContractCall::Stake { amount, .. } if amount == "2"));
    }

    #[tokio::test]
    async fn test_unstake_submits_single_call() {
        let mock = MockProvider::new();
        let handle = unstake(&mock, "0xFarm", "0xA");
        assert_eq!(handle.name(), "Unstake Tokens");
        assert_eq!(
            mock.calls(),
            vec![ContractCall::Unstake {
                token_farm: "0xFarm".to_string(),
                token: "0xA".to_string(),
            }]
        );
    }
}
