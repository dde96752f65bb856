//! Proposals and their lifecycle fields.

use guild_types::{Address, DetailsHash, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Upper bound on a proposal's target/value/payload triples.
/// Bounds proposal complexity and the cost of processing it.
pub const MAX_PROPOSAL_CALLS: usize = 10;

/// The four mutually exclusive proposal categories.
///
/// Submitted externally as a `u8` flag (0..=3); stored as a tagged variant so
/// "exactly one flag set" holds by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalKind {
    /// Arbitrary external calls, issued in order at processing time.
    Action,
    /// Weighted mint-on-win: each target is granted the winning yes tally
    /// in loot and shares.
    Membership,
    /// Changes the voting windows and/or pause flags.
    Period,
    /// Adds or removes recognized treasury assets.
    Whitelist,
}

impl ProposalKind {
    pub fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0 => Some(Self::Action),
            1 => Some(Self::Membership),
            2 => Some(Self::Period),
            3 => Some(Self::Whitelist),
            _ => None,
        }
    }

    pub fn flag(&self) -> u8 {
        match self {
            Self::Action => 0,
            Self::Membership => 1,
            Self::Period => 2,
            Self::Whitelist => 3,
        }
    }

    /// The legacy 4-element flag view: exactly one element is true.
    pub fn flags(&self) -> [bool; 4] {
        let mut flags = [false; 4];
        flags[self.flag() as usize] = true;
        flags
    }
}

/// One target/value/payload triple.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalCall {
    pub target: Address,
    pub value: u128,
    pub payload: Vec<u8>,
}

/// A submitted proposal. Created once, mutated only by vote tallying and the
/// single processing transition, never deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    /// 1-based submission index; also the processing order.
    pub index: u64,
    pub kind: ProposalKind,
    pub voting_period_secs: u64,
    pub voting_starts: Timestamp,
    /// `voting_starts + voting_period`.
    pub voting_ends: Timestamp,
    /// `voting_ends + grace_period` (grace period at submission time).
    pub grace_ends: Timestamp,
    pub yes_votes: u128,
    pub no_votes: u128,
    pub calls: Vec<ProposalCall>,
    pub details: DetailsHash,
    pub processed: bool,
    /// Members that have voted, to reject re-votes.
    pub voters: HashSet<Address>,
}

impl Proposal {
    /// Whether the voting window is open at `now`.
    pub fn voting_open(&self, now: Timestamp) -> bool {
        now >= self.voting_starts && now < self.voting_ends
    }
}

/// Payload of a period-type proposal, bincode-encoded in the first call.
///
/// `None` fields leave the corresponding setting untouched; the pause
/// toggles ride along exactly as they did in the original period encoding.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodChange {
    pub min_voting_period_secs: Option<u64>,
    pub max_voting_period_secs: Option<u64>,
    pub grace_period_secs: Option<u64>,
    pub pause_loot: Option<bool>,
    pub pause_shares: Option<bool>,
}

impl PeriodChange {
    pub fn encode(&self) -> Vec<u8> {
        bincode::serialize(self).unwrap_or_default()
    }

    pub fn decode(bytes: &[u8]) -> Option<Self> {
        bincode::deserialize(bytes).ok()
    }
}
