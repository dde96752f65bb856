//! Per-member shares/loot balances and the pause flags.
//!
//! Shares carry voting power and economic stake; loot carries economic stake
//! only. The ledger keeps running totals so ragequit settlement never has to
//! sum over members, and it appends a voting-power checkpoint whenever a
//! share balance changes.

use crate::checkpoints::VotePowerLedger;
use crate::error::LedgerError;
use guild_types::{Address, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The two fungible accounting units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakeUnit {
    Shares,
    Loot,
}

impl fmt::Display for StakeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StakeUnit::Shares => write!(f, "shares"),
            StakeUnit::Loot => write!(f, "loot"),
        }
    }
}

/// A single member's stake record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Voting + economic stake.
    pub shares: u128,
    /// Economic-only stake, no voting power.
    pub loot: u128,
    /// Highest proposal index this member voted "yes" on; 0 = never.
    /// Monotonically non-decreasing, used to gate ragequit.
    pub highest_index_yes_vote: u64,
}

/// All member balances, their totals, and the unit pause flags.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MembershipLedger {
    members: HashMap<Address, Member>,
    total_shares: u128,
    total_loot: u128,
    loot_paused: bool,
    shares_paused: bool,
}

impl MembershipLedger {
    pub fn new(loot_paused: bool, shares_paused: bool) -> Self {
        Self {
            members: HashMap::new(),
            total_shares: 0,
            total_loot: 0,
            loot_paused,
            shares_paused,
        }
    }

    /// Mint or burn loot/shares for a member.
    ///
    /// Deltas are magnitudes; `is_add` selects mint vs burn. A paused unit
    /// rejects nonzero deltas; a burn exceeding the balance fails without
    /// touching anything. A share change appends a checkpoint with the
    /// member's new share balance, so `now` must not precede the member's
    /// last checkpoint (the single-writer execution context guarantees a
    /// monotonic clock).
    pub fn apply_member_action(
        &mut self,
        power: &mut VotePowerLedger,
        member: &Address,
        loot_delta: u128,
        shares_delta: u128,
        is_add: bool,
        now: Timestamp,
    ) -> Result<(), LedgerError> {
        if loot_delta != 0 && self.loot_paused {
            return Err(LedgerError::TokenPaused {
                unit: StakeUnit::Loot,
            });
        }
        if shares_delta != 0 && self.shares_paused {
            return Err(LedgerError::TokenPaused {
                unit: StakeUnit::Shares,
            });
        }

        let current = self.members.get(member).cloned().unwrap_or_default();
        let (new_loot, new_shares, new_total_loot, new_total_shares) = if is_add {
            (
                current
                    .loot
                    .checked_add(loot_delta)
                    .ok_or(LedgerError::Overflow)?,
                current
                    .shares
                    .checked_add(shares_delta)
                    .ok_or(LedgerError::Overflow)?,
                self.total_loot
                    .checked_add(loot_delta)
                    .ok_or(LedgerError::Overflow)?,
                self.total_shares
                    .checked_add(shares_delta)
                    .ok_or(LedgerError::Overflow)?,
            )
        } else {
            (
                current
                    .loot
                    .checked_sub(loot_delta)
                    .ok_or(LedgerError::InsufficientBalance {
                        unit: StakeUnit::Loot,
                        needed: loot_delta,
                        available: current.loot,
                    })?,
                current.shares.checked_sub(shares_delta).ok_or(
                    LedgerError::InsufficientBalance {
                        unit: StakeUnit::Shares,
                        needed: shares_delta,
                        available: current.shares,
                    },
                )?,
                // Totals cannot underflow if the member balances did not.
                self.total_loot - loot_delta,
                self.total_shares - shares_delta,
            )
        };

        // The checkpoint append is the last fallible step; balances are only
        // written once nothing can fail.
        if shares_delta != 0 {
            power.record(member, new_shares, now)?;
        }

        let entry = self.members.entry(member.clone()).or_default();
        entry.loot = new_loot;
        entry.shares = new_shares;
        self.total_loot = new_total_loot;
        self.total_shares = new_total_shares;
        Ok(())
    }

    /// Raise a member's highest-index yes vote (monotonic).
    pub fn note_yes_vote(&mut self, member: &Address, proposal_index: u64) {
        let entry = self.members.entry(member.clone()).or_default();
        if proposal_index > entry.highest_index_yes_vote {
            entry.highest_index_yes_vote = proposal_index;
        }
    }

    pub fn member(&self, address: &Address) -> Option<&Member> {
        self.members.get(address)
    }

    pub fn total_shares(&self) -> u128 {
        self.total_shares
    }

    pub fn total_loot(&self) -> u128 {
        self.total_loot
    }

    pub fn is_paused(&self, unit: StakeUnit) -> bool {
        match unit {
            StakeUnit::Shares => self.shares_paused,
            StakeUnit::Loot => self.loot_paused,
        }
    }

    pub fn set_paused(&mut self, unit: StakeUnit, paused: bool) {
        match unit {
            StakeUnit::Shares => self.shares_paused = paused,
            StakeUnit::Loot => self.loot_paused = paused,
        }
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
    fn mint_updates_balances_totals_and_checkpoints() {
        let mut ledger = MembershipLedger::new(false, false);
        let mut power = VotePowerLedger::new();
        let m = member(1);

        ledger
            .apply_member_action(&mut power, &m, 500, 100, true, t(0))
            .unwrap();

        let rec = ledger.member(&m).unwrap();
        assert_eq!(rec.loot, 500);
        assert_eq!(rec.shares, 100);
        assert_eq!(ledger.total_loot(), 500);
        assert_eq!(ledger.total_shares(), 100);
        assert_eq!(power.current_power(&m), 100);
        assert_eq!(power.num_checkpoints(&m), 1);
    }

    #[test]
    fn loot_only_change_appends_no_checkpoint() {
        let mut ledger = MembershipLedger::new(false, false);
        let mut power = VotePowerLedger::new();
        let m = member(1);

        ledger
            .apply_member_action(&mut power, &m, 250, 0, true, t(0))
            .unwrap();
        assert_eq!(power.num_checkpoints(&m), 0);
        assert_eq!(ledger.member(&m).unwrap().loot, 250);
    }

    #[test]
    fn burn_reduces_balances() {
        let mut ledger = MembershipLedger::new(false, false);
        let mut power = VotePowerLedger::new();
        let m = member(1);
        ledger
            .apply_member_action(&mut power, &m, 500, 100, true, t(0))
            .unwrap();

        ledger
            .apply_member_action(&mut power, &m, 200, 70, false, t(10))
            .unwrap();
        let rec = ledger.member(&m).unwrap();
        assert_eq!(rec.loot, 300);
        assert_eq!(rec.shares, 30);
        assert_eq!(ledger.total_loot(), 300);
        assert_eq!(ledger.total_shares(), 30);
        assert_eq!(power.current_power(&m), 30);
    }

    #[test]
    fn burn_beyond_balance_fails_without_writes() {
        let mut ledger = MembershipLedger::new(false, false);
        let mut power = VotePowerLedger::new();
        let m = member(1);
        ledger
            .apply_member_action(&mut power, &m, 100, 10, true, t(0))
            .unwrap();

        let err = ledger
            .apply_member_action(&mut power, &m, 500, 0, false, t(10))
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientBalance {
                unit: StakeUnit::Loot,
                needed: 500,
                available: 100,
            }
        ));
        assert_eq!(ledger.member(&m).unwrap().loot, 100);
        assert_eq!(ledger.total_loot(), 100);
    }

    #[test]
    fn paused_unit_rejects_nonzero_delta() {
        let mut ledger = MembershipLedger::new(true, false);
        let mut power = VotePowerLedger::new();
        let m = member(1);

        let err = ledger
            .apply_member_action(&mut power, &m, 1, 0, true, t(0))
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::TokenPaused {
                unit: StakeUnit::Loot
            }
        ));
        // Zero delta for the paused unit is fine.
        ledger
            .apply_member_action(&mut power, &m, 0, 10, true, t(0))
            .unwrap();
        assert_eq!(ledger.member(&m).unwrap().shares, 10);
    }

    #[test]
    fn pause_flags_toggle() {
        let mut ledger = MembershipLedger::new(false, false);
        assert!(!ledger.is_paused(StakeUnit::Shares));
        ledger.set_paused(StakeUnit::Shares, true);
        assert!(ledger.is_paused(StakeUnit::Shares));
        assert!(!ledger.is_paused(StakeUnit::Loot));
    }

    #[test]
    fn note_yes_vote_is_monotonic() {
        let mut ledger = MembershipLedger::new(false, false);
        let m = member(1);
        ledger.note_yes_vote(&m, 3);
        ledger.note_yes_vote(&m, 1);
        assert_eq!(ledger.member(&m).unwrap().highest_index_yes_vote, 3);
        ledger.note_yes_vote(&m, 7);
        assert_eq!(ledger.member(&m).unwrap().highest_index_yes_vote, 7);
    }

    #[test]
    fn overflow_mint_fails_cleanly() {
        let mut ledger = MembershipLedger::new(false, false);
        let mut power = VotePowerLedger::new();
        let m = member(1);
        ledger
            .apply_member_action(&mut power, &m, u128::MAX, 0, true, t(0))
            .unwrap();
        let err = ledger
            .apply_member_action(&mut power, &m, 1, 0, true, t(1))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Overflow));
        assert_eq!(ledger.total_loot(), u128::MAX);
    }
}
