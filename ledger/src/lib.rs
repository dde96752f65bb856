//! Membership accounting for the guild engine.
//!
//! Two components live here:
//! - the **voting-power ledger**: append-only per-member checkpoint histories,
//!   searched by timestamp to fix each voter's weight at proposal submission;
//! - the **membership ledger**: shares/loot balances, their running totals,
//!   and the pause flags that can freeze either unit.
//!
//! Neither component enforces governance rules; the engine crate owns those.

pub mod checkpoints;
pub mod error;
pub mod members;

pub use checkpoints::{Checkpoint, VotePowerLedger};
pub use error::LedgerError;
pub use members::{Member, MembershipLedger, StakeUnit};
