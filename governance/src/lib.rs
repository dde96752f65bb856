//! Membership-weighted governance for the guild.
//!
//! Proposal lifecycle: Submitted → Voting → Grace → Processed, with no
//! explicit rejected state — every proposal is processed exactly once, in
//! strict submission order, and a losing proposal simply applies no effect.
//! Voting weight is fixed at submission time via the checkpoint ledger, and
//! members exit through ragequit against the treasury's recognized assets.

pub mod engine;
pub mod error;
pub mod executor;
pub mod proposal;
pub mod store;

pub use engine::GovernanceEngine;
pub use error::GovError;
pub use executor::{CallExecutor, NullExecutor};
pub use proposal::{
    PeriodChange, Proposal, ProposalCall, ProposalKind, MAX_PROPOSAL_CALLS,
};
pub use store::ProposalStore;
