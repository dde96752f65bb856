//! Governance configuration — the three process-wide voting windows.
//!
//! All three values are themselves governable via period-type proposals,
//! so the configuration the engine holds is mutable state, not a constant.

use serde::{Deserialize, Serialize};

/// The time windows that shape every proposal's lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovConfig {
    /// Mandatory delay (seconds) between the end of voting and processing.
    pub grace_period_secs: u64,

    /// Smallest voting period (seconds) a proposal may request.
    pub min_voting_period_secs: u64,

    /// Largest voting period (seconds) a proposal may request.
    pub max_voting_period_secs: u64,
}

impl GovConfig {
    /// The summoning defaults used throughout the original deployment.
    pub fn summoning_defaults() -> Self {
        Self {
            grace_period_secs: 80,
            min_voting_period_secs: 110,
            max_voting_period_secs: 220,
        }
    }

    /// Whether a requested voting period falls inside the allowed bounds.
    pub fn voting_period_in_bounds(&self, secs: u64) -> bool {
        secs >= self.min_voting_period_secs && secs <= self.max_voting_period_secs
    }
}

impl Default for GovConfig {
    fn default() -> Self {
        Self::summoning_defaults()
    }
}
