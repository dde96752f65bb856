//! Governance engine errors.
//!
//! Every failure is synchronous and fully reverting: a failed call leaves
//! all engine state exactly as it was. None are fatal to the engine.

use guild_ledger::LedgerError;
use guild_treasury::TreasuryError;
use guild_types::{Address, Timestamp};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovError {
    // Validation — rejected before any state is touched.
    #[error("voting period {got}s outside [{min}s, {max}s]")]
    VotingPeriodOutOfBounds { got: u64, min: u64, max: u64 },

    #[error("array parity mismatch: {targets} targets, {values} values, {payloads} payloads")]
    ArrayLengthMismatch {
        targets: usize,
        values: usize,
        payloads: usize,
    },

    #[error("proposal has {len} calls, maximum is {max}")]
    ArrayTooLong { len: usize, max: usize },

    #[error("flag {0} does not select a proposal category")]
    InvalidFlag(u8),

    #[error("period proposal payload does not decode")]
    InvalidPayload,

    #[error("engine configuration rejected: {0}")]
    InvalidConfig(String),

    // Temporal — retry after time passes.
    #[error("voting on proposal {index} is closed (window ended at {voting_ends})")]
    VotingClosed { index: u64, voting_ends: Timestamp },

    #[error("grace period for proposal {index} runs until {grace_ends}")]
    GraceNotElapsed { index: u64, grace_ends: Timestamp },

    // Ordering — retry in the correct order.
    #[error("proposal {0} does not exist")]
    ProposalNotFound(u64),

    #[error("proposal {0} has already been processed")]
    AlreadyProcessed(u64),

    #[error("proposal {pending} must be processed before proposal {index}")]
    PriorProposalPending { index: u64, pending: u64 },

    #[error("{voter} has already voted on proposal {index}")]
    AlreadyVoted { voter: Address, index: u64 },

    // Economic — change the request or wait.
    #[error("{member} has an unsettled yes vote on proposal {index}")]
    UnsettledYesVote { member: Address, index: u64 },

    #[error("arithmetic overflow in vote tally")]
    TallyOverflow,

    // Authorization.
    #[error("{0} is not a registered shaman")]
    NotShaman(Address),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Treasury(#[from] TreasuryError),
}
