// src/staking/sequencer.rs
//! Approve-then-stake sequencing rules, free of any I/O.

use crate::contracts::ContractCall;
use crate::transaction::{TransactionState, TransactionStatus};
use serde::{Deserialize, Serialize};

/// Which of the two transactions a status update belongs to
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakeStep {
    #[default]
    Approve,
    Stake,
}

/// Combined status of the current session plus the step it describes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StakeProgress {
    pub session: u64,
    pub step: StakeStep,
    pub state: TransactionState,
}

impl StakeProgress {
    /// A transaction is in flight, or the approval landed and the stake is not yet reported
    pub fn is_busy(&self) -> bool {
        self.state.status.is_in_flight()
            || (self.step == StakeStep::Approve && self.state.status == TransactionStatus::Success)
    }
}

/// A call the driver must submit on behalf of a session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakeCommand {
    pub session: u64,
    pub step: StakeStep,
    pub call: ContractCall,
}

pub struct StakeSequencer {
    token_farm: String,
    token: String,
    session: u64,
    amount_to_stake: String,
    approve_state: TransactionState,
    stake_state: TransactionState,
    stake_submitted: bool,
}

impl StakeSequencer {
    pub fn new(token_farm: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            token_farm: token_farm.into(),
            token: token.into(),
            session: 0,
            amount_to_stake: "0".to_string(),
            approve_state: TransactionState::default(),
            stake_state: TransactionState::default(),
            stake_submitted: false,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn token_farm(&self) -> &str {
        &self.token_farm
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn amount_to_stake(&self) -> &str {
        &self.amount_to_stake
    }

    pub fn stake_submitted(&self) -> bool {
        self.stake_submitted
    }

    /// Start a new session; any previous session stops being tracked.
    pub fn initiate(&mut self, amount: &str) -> StakeCommand {
        self.session += 1;
        self.amount_to_stake = amount.to_string();
        self.approve_state = TransactionState::default();
        self.stake_state = TransactionState::default();
        self.stake_submitted = false;

        StakeCommand {
            session: self.session,
            step: StakeStep::Approve,
            call: ContractCall::Approve {
                token: self.token.clone(),
                spender: self.token_farm.clone(),
                amount: self.amount_to_stake.clone(),
            },
        }
    }

    /// Record a status update; returns the stake call when approval first succeeds.
    pub fn on_update(
        &mut self,
        session: u64,
        step: StakeStep,
        state: TransactionState,
    ) -> Option<StakeCommand> {
        if session != self.session || session == 0 {
            log::debug!("Ignoring {:?} update from superseded session {}", step, session);
            return None;
        }

        match step {
            StakeStep::Approve => {
                self.approve_state = state;
                if self.approve_state.status != TransactionStatus::Success || self.stake_submitted {
                    return None;
                }
                self.stake_submitted = true;
                Some(StakeCommand {
                    session: self.session,
                    step: StakeStep::Stake,
                    call: ContractCall::Stake {
                        token_farm: self.token_farm.clone(),
                        token: self.token.clone(),
                        amount: self.amount_to_stake.clone(),
                    },
                })
            }
            StakeStep::Stake => {
                if self.stake_submitted {
                    self.stake_state = state;
                }
                None
            }
        }
    }

    /// Approval status until it succeeds, the stake status afterwards.
    ///
    /// Between approval success and the first stake update the approval's
    /// Success stays visible.
    pub fn progress(&self) -> StakeProgress {
        let stake_active = self.approve_state.status == TransactionStatus::Success
            && self.stake_state.status != TransactionStatus::None;

        let (step, state) = if stake_active {
            (StakeStep::Stake, &self.stake_state)
        } else {
            (StakeStep::Approve, &self.approve_state)
        };
        StakeProgress { session: self.session, step, state: state.clone() }
    }

    pub fn state(&self) -> TransactionState {
        self.progress().state
    }

    /// Whether the current session has nothing left in flight
    pub fn is_complete(&self) -> bool {
        if self.stake_submitted {
            self.stake_state.status.is_terminal()
        } else {
            self.approve_state.status.is_failure()
        }
    }
}
