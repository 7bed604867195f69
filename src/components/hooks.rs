use dioxus::prelude::*;
use crate::components::common::WalletContext;
use crate::staking::{StakeOrchestrator, StakeProgress};

/// Chain id of the connected wallet; `None` when nothing is connected
pub fn use_chain_id() -> Resource<Option<u64>> {
    let wallet = use_context::<WalletContext>();
    use_resource(move || {
        let provider = wallet.provider.clone();
        async move {
            match provider.chain_id().await {
                Ok(chain_id) => chain_id,
                Err(e) => {
                    log::warn!("Wallet not connected: {}", e);
                    None
                }
            }
        }
    })
}

pub fn use_account() -> Resource<Option<String>> {
    let wallet = use_context::<WalletContext>();
    use_resource(move || {
        let provider = wallet.provider.clone();
        async move {
            match provider.account().await {
                Ok(account) => account,
                Err(e) => {
                    log::warn!("Failed to load account: {}", e);
                    None
                }
            }
        }
    })
}

/// Approve-then-stake handle for one token
#[derive(Clone)]
pub struct StakeTokens {
    orchestrator: StakeOrchestrator,
    pub state: Signal<StakeProgress>,
}

impl StakeTokens {
    /// `amount` in base units
    pub fn approve_and_stake(&self, amount: String) {
        let orchestrator = self.orchestrator.clone();
        spawn(async move {
            orchestrator.initiate(&amount).await;
        });
    }
}

/// Bind a stake orchestrator for `token_address` to a Dioxus signal.
///
/// The component using this must be keyed by the token and farm addresses.
pub fn use_stake_tokens(token_farm: String, token_address: String) -> StakeTokens {
    let wallet = use_context::<WalletContext>();
    let orchestrator =
        use_hook(|| StakeOrchestrator::new(wallet.provider.clone(), &token_farm, &token_address));
    let mut state = use_signal(StakeProgress::default);

    let watched = orchestrator.clone();
    use_effect(move || {
        let orchestrator = watched.clone();
        spawn(async move {
            let mut updates = orchestrator.subscribe();
            loop {
                let progress = updates.borrow_and_update().clone();
                state.set(progress);
                if updates.changed().await.is_err() {
                    break;
                }
            }
        });
    });

    StakeTokens { orchestrator, state }
}
