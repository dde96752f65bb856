//! The proposal store — append-only, 1-based, processed in strict order.

use crate::proposal::Proposal;
use serde::{Deserialize, Serialize};

/// Ordered collection of every proposal ever submitted.
///
/// Append-only except for status transitions; `processed_count` is the strict
/// processing frontier: every index at or below it is processed, nothing
/// above it is.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProposalStore {
    proposals: Vec<Proposal>,
    processed_count: u64,
}

impl ProposalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of proposals ever submitted.
    pub fn count(&self) -> u64 {
        self.proposals.len() as u64
    }

    /// The index the next submission will receive.
    pub fn next_index(&self) -> u64 {
        self.count() + 1
    }

    /// Indices at or below this are processed; nothing above it is.
    pub fn processed_count(&self) -> u64 {
        self.processed_count
    }

    /// Append a proposal; its `index` field must already carry `next_index`.
    pub fn push(&mut self, proposal: Proposal) -> u64 {
        debug_assert_eq!(proposal.index, self.next_index());
        let index = proposal.index;
        self.proposals.push(proposal);
        index
    }

    pub fn get(&self, index: u64) -> Option<&Proposal> {
        if index == 0 {
            return None;
        }
        self.proposals.get(index as usize - 1)
    }

    pub fn get_mut(&mut self, index: u64) -> Option<&mut Proposal> {
        if index == 0 {
            return None;
        }
        self.proposals.get_mut(index as usize - 1)
    }

    /// Flip `processed` for the frontier proposal and advance the frontier.
    ///
    /// Callers must have verified `index == processed_count + 1`.
    pub fn mark_processed(&mut self, index: u64) {
        if let Some(prop) = self.get_mut(index) {
            prop.processed = true;
            self.processed_count = index;
        }
    }
}
