// src/staking/mod.rs
//! Approve-then-stake flow for TokenFarm deposits

mod orchestrator;
mod sequencer;

pub use orchestrator::{unstake, StakeOrchestrator};
pub use sequencer::{StakeCommand, StakeProgress, StakeSequencer, StakeStep};
