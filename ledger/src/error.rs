//! Ledger-specific errors.

use crate::members::StakeUnit;
use guild_types::Timestamp;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("checkpoint at {attempted} would precede the last checkpoint at {last}")]
    InvalidOrdering {
        last: Timestamp,
        attempted: Timestamp,
    },

    #[error("timestamp {queried} is not yet determined (now {now})")]
    TimestampNotDetermined { queried: Timestamp, now: Timestamp },

    #[error("{unit} changes are paused")]
    TokenPaused { unit: StakeUnit },

    #[error("insufficient {unit}: need {needed}, available {available}")]
    InsufficientBalance {
        unit: StakeUnit,
        needed: u128,
        available: u128,
    },

    #[error("arithmetic overflow in membership accounting")]
    Overflow,
}
