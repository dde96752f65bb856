//! The external-call boundary for action-type proposals.

use guild_types::Address;

/// Issues the external calls of a passed action proposal.
///
/// Calls happen synchronously inside `process_proposal`, after the proposal
/// has been fixed as processed; a failed call does not revert processing, so
/// implementations report success per call and callers needing per-call
/// guarantees must check the outcomes themselves.
pub trait CallExecutor {
    /// Execute one call; returns whether it succeeded.
    fn execute(&mut self, target: &Address, value: u128, payload: &[u8]) -> bool;
}

/// Records every call and answers with a configurable outcome.
#[derive(Debug, Default)]
pub struct NullExecutor {
    calls: Vec<(Address, u128, Vec<u8>)>,
    fail_all: bool,
}

impl NullExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// An executor whose calls all report failure.
    pub fn failing() -> Self {
        Self {
            calls: Vec::new(),
            fail_all: true,
        }
    }

    /// The calls issued so far, in order.
    pub fn calls(&self) -> &[(Address, u128, Vec<u8>)] {
        &self.calls
    }
}

impl CallExecutor for NullExecutor {
    fn execute(&mut self, target: &Address, value: u128, payload: &[u8]) -> bool {
        self.calls.push((target.clone(), value, payload.to_vec()));
        !self.fail_all
    }
}
