//! Voting-power checkpoint histories.
//!
//! Every change to a member's share balance appends a `(timestamp, power)`
//! record to that member's history. Histories are append-only and strictly
//! increasing in timestamp; a second change within the same instant coalesces
//! into the last record instead of appending. Tallying reads power "as of"
//! proposal submission by binary search over the history, so stake acquired
//! after submission can never inflate a vote.

use crate::error::LedgerError;
use guild_types::{Address, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One immutable record of a member's voting power as of a timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub timestamp: Timestamp,
    pub power: u128,
}

/// Append-only checkpoint histories, one per member.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VotePowerLedger {
    histories: HashMap<Address, Vec<Checkpoint>>,
}

impl VotePowerLedger {
    pub fn new() -> Self {
        Self {
            histories: HashMap::new(),
        }
    }

    /// Record a power change for `member` at `timestamp`.
    ///
    /// Appends a new checkpoint, or overwrites the last one's power when the
    /// timestamp is equal (same-instant coalescing). A timestamp earlier than
    /// the last recorded one is rejected.
    pub fn record(
        &mut self,
        member: &Address,
        power: u128,
        timestamp: Timestamp,
    ) -> Result<(), LedgerError> {
        let history = self.histories.entry(member.clone()).or_default();
        match history.last_mut() {
            Some(last) if timestamp < last.timestamp => Err(LedgerError::InvalidOrdering {
                last: last.timestamp,
                attempted: timestamp,
            }),
            Some(last) if timestamp == last.timestamp => {
                last.power = power;
                Ok(())
            }
            _ => {
                history.push(Checkpoint { timestamp, power });
                Ok(())
            }
        }
    }

    /// The member's present voting power (last checkpoint, or 0 if none).
    pub fn current_power(&self, member: &Address) -> u128 {
        self.histories
            .get(member)
            .and_then(|h| h.last())
            .map(|c| c.power)
            .unwrap_or(0)
    }

    /// The member's voting power as of `timestamp`.
    ///
    /// Only strictly past instants are queryable: the checkpoint for the
    /// current instant could still be overwritten by a same-instant change,
    /// so `timestamp >= now` is rejected.
    pub fn power_at(
        &self,
        member: &Address,
        timestamp: Timestamp,
        now: Timestamp,
    ) -> Result<u128, LedgerError> {
        if timestamp >= now {
            return Err(LedgerError::TimestampNotDetermined {
                queried: timestamp,
                now,
            });
        }
        let Some(history) = self.histories.get(member) else {
            return Ok(0);
        };
        // Number of checkpoints with timestamp <= the queried instant.
        let idx = history.partition_point(|c| c.timestamp <= timestamp);
        if idx == 0 {
            Ok(0)
        } else {
            Ok(history[idx - 1].power)
        }
    }

    /// How many checkpoints exist for a member.
    pub fn num_checkpoints(&self, member: &Address) -> usize {
        self.histories.get(member).map(|h| h.len()).unwrap_or(0)
    }

    /// Read a member's checkpoint by position (0-based).
    pub fn checkpoint(&self, member: &Address, index: usize) -> Option<Checkpoint> {
        self.histories
            .get(member)
            .and_then(|h| h.get(index))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(n: u8) -> Address {
        Address::new(format!("gld_{:0>60}", n))
    }

    fn t(secs: u64) -> Timestamp {
        Timestamp::new(secs)
    }

    #[test]
    fn record_appends_in_order() {
        let mut ledger = VotePowerLedger::new();
        let m = member(1);
        ledger.record(&m, 100, t(10)).unwrap();
        ledger.record(&m, 150, t(20)).unwrap();
        assert_eq!(ledger.num_checkpoints(&m), 2);
        assert_eq!(ledger.current_power(&m), 150);
    }

    #[test]
    fn same_timestamp_coalesces() {
        let mut ledger = VotePowerLedger::new();
        let m = member(1);
        ledger.record(&m, 100, t(10)).unwrap();
        ledger.record(&m, 175, t(10)).unwrap();
        assert_eq!(ledger.num_checkpoints(&m), 1);
        assert_eq!(ledger.current_power(&m), 175);
    }

    #[test]
    fn earlier_timestamp_rejected() {
        let mut ledger = VotePowerLedger::new();
        let m = member(1);
        ledger.record(&m, 100, t(10)).unwrap();
        let err = ledger.record(&m, 50, t(5)).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidOrdering { .. }));
        // Failed record leaves history untouched.
        assert_eq!(ledger.num_checkpoints(&m), 1);
        assert_eq!(ledger.current_power(&m), 100);
    }

    #[test]
    fn power_at_exact_checkpoint_timestamp() {
        let mut ledger = VotePowerLedger::new();
        let m = member(1);
        ledger.record(&m, 100, t(10)).unwrap();
        ledger.record(&m, 200, t(20)).unwrap();
        ledger.record(&m, 300, t(30)).unwrap();
        assert_eq!(ledger.power_at(&m, t(10), t(100)).unwrap(), 100);
        assert_eq!(ledger.power_at(&m, t(20), t(100)).unwrap(), 200);
        assert_eq!(ledger.power_at(&m, t(30), t(100)).unwrap(), 300);
    }

    #[test]
    fn power_at_between_checkpoints_takes_earlier() {
        let mut ledger = VotePowerLedger::new();
        let m = member(1);
        ledger.record(&m, 100, t(10)).unwrap();
        ledger.record(&m, 200, t(20)).unwrap();
        assert_eq!(ledger.power_at(&m, t(15), t(100)).unwrap(), 100);
        assert_eq!(ledger.power_at(&m, t(19), t(100)).unwrap(), 100);
    }

    #[test]
    fn power_before_first_checkpoint_is_zero() {
        let mut ledger = VotePowerLedger::new();
        let m = member(1);
        ledger.record(&m, 100, t(10)).unwrap();
        assert_eq!(ledger.power_at(&m, t(9), t(100)).unwrap(), 0);
    }

    #[test]
    fn unknown_member_has_zero_power() {
        let ledger = VotePowerLedger::new();
        let m = member(9);
        assert_eq!(ledger.current_power(&m), 0);
        assert_eq!(ledger.power_at(&m, t(5), t(100)).unwrap(), 0);
        assert_eq!(ledger.num_checkpoints(&m), 0);
    }

    #[test]
    fn present_and_future_instants_not_queryable() {
        let mut ledger = VotePowerLedger::new();
        let m = member(1);
        ledger.record(&m, 100, t(10)).unwrap();
        let err = ledger.power_at(&m, t(50), t(50)).unwrap_err();
        assert!(matches!(err, LedgerError::TimestampNotDetermined { .. }));
        let err = ledger.power_at(&m, t(60), t(50)).unwrap_err();
        assert!(matches!(err, LedgerError::TimestampNotDetermined { .. }));
    }

    #[test]
    fn checkpoint_accessor_reads_by_position() {
        let mut ledger = VotePowerLedger::new();
        let m = member(1);
        ledger.record(&m, 100, t(10)).unwrap();
        ledger.record(&m, 200, t(20)).unwrap();
        let first = ledger.checkpoint(&m, 0).unwrap();
        assert_eq!(first.timestamp, t(10));
        assert_eq!(first.power, 100);
        assert!(ledger.checkpoint(&m, 2).is_none());
    }
}
