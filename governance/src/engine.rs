//! The governance engine — sole mutator of all governance state.
//!
//! Every state-changing operation takes `&mut self` plus an explicit `now`,
//! matching the single-writer, strictly serialized execution model: one
//! operation runs to completion before the next begins, and the hosting
//! context supplies a monotonic ledger clock. Read accessors are `&self`.

use crate::error::GovError;
use crate::executor::CallExecutor;
use crate::proposal::{
    PeriodChange, Proposal, ProposalCall, ProposalKind, MAX_PROPOSAL_CALLS,
};
use crate::store::ProposalStore;
use guild_ledger::{
    Checkpoint, LedgerError, Member, MembershipLedger, StakeUnit, VotePowerLedger,
};
use guild_treasury::{pro_rata_claim, AssetBank, AssetList};
use guild_types::{Address, DetailsHash, GovConfig, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Meta-store key used for persisting the engine snapshot.
const ENGINE_META_KEY: &str = "governance_engine_state";

/// The whole organization: configuration, both ledgers, the proposal store,
/// the recognized-asset list, and the shaman capability set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernanceEngine {
    config: GovConfig,
    members: MembershipLedger,
    power: VotePowerLedger,
    proposals: ProposalStore,
    assets: AssetList,
    shamans: HashSet<Address>,
}

impl GovernanceEngine {
    /// Create the organization: seed the founding members' stakes (with
    /// their initial voting-power checkpoints), the recognized assets, the
    /// shaman registry, and the initial share pause flag.
    pub fn summon(
        config: GovConfig,
        summoners: &[(Address, u128, u128)],
        guild_tokens: Vec<Address>,
        shamans: Vec<Address>,
        shares_paused: bool,
        now: Timestamp,
    ) -> Result<Self, GovError> {
        if config.min_voting_period_secs == 0 {
            return Err(GovError::InvalidConfig(
                "min voting period cannot be 0".into(),
            ));
        }
        if config.max_voting_period_secs < config.min_voting_period_secs {
            return Err(GovError::InvalidConfig(
                "max voting period below min".into(),
            ));
        }
        if summoners.is_empty() {
            return Err(GovError::InvalidConfig(
                "at least one summoner required".into(),
            ));
        }
        let mut engine = Self {
            config,
            members: MembershipLedger::new(false, false),
            power: VotePowerLedger::new(),
            proposals: ProposalStore::new(),
            assets: AssetList::new(guild_tokens),
            shamans: shamans.into_iter().collect(),
        };
        for (address, loot, shares) in summoners {
            engine
                .members
                .apply_member_action(&mut engine.power, address, *loot, *shares, true, now)?;
        }
        // Seeding happens before the pause takes effect.
        engine.members.set_paused(StakeUnit::Shares, shares_paused);
        info!(
            summoners = summoners.len(),
            tokens = engine.assets.len(),
            shamans = engine.shamans.len(),
            "guild summoned"
        );
        Ok(engine)
    }

    /// Submit a proposal; returns its 1-based index.
    pub fn submit_proposal(
        &mut self,
        flag: u8,
        voting_period_secs: u64,
        targets: Vec<Address>,
        values: Vec<u128>,
        payloads: Vec<Vec<u8>>,
        details: DetailsHash,
        now: Timestamp,
    ) -> Result<u64, GovError> {
        if !self.config.voting_period_in_bounds(voting_period_secs) {
            return Err(GovError::VotingPeriodOutOfBounds {
                got: voting_period_secs,
                min: self.config.min_voting_period_secs,
                max: self.config.max_voting_period_secs,
            });
        }
        if targets.len() != values.len() || targets.len() != payloads.len() {
            return Err(GovError::ArrayLengthMismatch {
                targets: targets.len(),
                values: values.len(),
                payloads: payloads.len(),
            });
        }
        if targets.len() > MAX_PROPOSAL_CALLS {
            return Err(GovError::ArrayTooLong {
                len: targets.len(),
                max: MAX_PROPOSAL_CALLS,
            });
        }
        let kind = ProposalKind::from_flag(flag).ok_or(GovError::InvalidFlag(flag))?;
        if kind == ProposalKind::Period {
            // A period proposal must carry a decodable change in its first
            // payload; rejecting here keeps processing infallible.
            let payload = payloads.first().ok_or(GovError::InvalidPayload)?;
            PeriodChange::decode(payload).ok_or(GovError::InvalidPayload)?;
        }

        let voting_ends = now.plus(voting_period_secs);
        let grace_ends = voting_ends.plus(self.config.grace_period_secs);
        let calls = targets
            .into_iter()
            .zip(values)
            .zip(payloads)
            .map(|((target, value), payload)| ProposalCall {
                target,
                value,
                payload,
            })
            .collect();
        let index = self.proposals.next_index();
        self.proposals.push(Proposal {
            index,
            kind,
            voting_period_secs,
            voting_starts: now,
            voting_ends,
            grace_ends,
            yes_votes: 0,
            no_votes: 0,
            calls,
            details,
            processed: false,
            voters: HashSet::new(),
        });
        debug!(index, ?kind, voting_period_secs, "proposal submitted");
        Ok(index)
    }

    /// Cast a vote. The voter's weight is their checkpointed power as of
    /// the proposal's submission instant, so stake acquired afterwards
    /// cannot inflate the tally.
    pub fn submit_vote(
        &mut self,
        voter: &Address,
        index: u64,
        support: bool,
        now: Timestamp,
    ) -> Result<(), GovError> {
        let Some(prop) = self.proposals.get_mut(index) else {
            return Err(GovError::ProposalNotFound(index));
        };
        if !prop.voting_open(now) {
            return Err(GovError::VotingClosed {
                index,
                voting_ends: prop.voting_ends,
            });
        }
        if prop.voters.contains(voter) {
            return Err(GovError::AlreadyVoted {
                voter: voter.clone(),
                index,
            });
        }
        let weight = self.power.power_at(voter, prop.voting_starts, now)?;
        let tally = if support { prop.yes_votes } else { prop.no_votes };
        let tally = tally.checked_add(weight).ok_or(GovError::TallyOverflow)?;

        prop.voters.insert(voter.clone());
        if support {
            prop.yes_votes = tally;
            self.members.note_yes_vote(voter, index);
        } else {
            prop.no_votes = tally;
        }
        debug!(index, voter = %voter, support, weight, "vote recorded");
        Ok(())
    }

    /// Process a proposal once voting plus grace have elapsed.
    ///
    /// Processing is total-ordered by submission index; `passed = yes > no`,
    /// and a failing proposal applies no effect but still consumes its slot.
    /// Returns whether the proposal passed.
    pub fn process_proposal(
        &mut self,
        index: u64,
        executor: &mut dyn CallExecutor,
        now: Timestamp,
    ) -> Result<bool, GovError> {
        let Some(prop) = self.proposals.get(index) else {
            return Err(GovError::ProposalNotFound(index));
        };
        if prop.processed {
            return Err(GovError::AlreadyProcessed(index));
        }
        if now < prop.grace_ends {
            return Err(GovError::GraceNotElapsed {
                index,
                grace_ends: prop.grace_ends,
            });
        }
        let pending = self.proposals.processed_count() + 1;
        if index != pending {
            return Err(GovError::PriorProposalPending { index, pending });
        }

        let passed = prop.yes_votes > prop.no_votes;
        let kind = prop.kind;
        let yes_votes = prop.yes_votes;
        let calls = prop.calls.clone();

        // Internal effects apply before the processed flip so a failure
        // reverts the whole call; external calls happen after the flip,
        // which is what keeps a reentrant executor from reprocessing the
        // same index.
        if passed {
            match kind {
                ProposalKind::Membership => self.grant_membership(&calls, yes_votes, now)?,
                ProposalKind::Period => self.apply_period_change(&calls),
                ProposalKind::Whitelist => self.apply_whitelist(&calls),
                ProposalKind::Action => {}
            }
        }

        self.proposals.mark_processed(index);

        if passed && kind == ProposalKind::Action {
            for call in &calls {
                let ok = executor.execute(&call.target, call.value, &call.payload);
                if !ok {
                    warn!(index, target = %call.target, "external call failed");
                }
            }
        }

        info!(index, passed, ?kind, "proposal processed");
        Ok(passed)
    }

    /// Privileged membership mutation, open only to registered shamans.
    pub fn member_action(
        &mut self,
        caller: &Address,
        target: &Address,
        loot_delta: u128,
        shares_delta: u128,
        is_add: bool,
        now: Timestamp,
    ) -> Result<(), GovError> {
        if !self.shamans.contains(caller) {
            return Err(GovError::NotShaman(caller.clone()));
        }
        self.members
            .apply_member_action(&mut self.power, target, loot_delta, shares_delta, is_add, now)?;
        debug!(caller = %caller, target = %target, loot_delta, shares_delta, is_add,
            "privileged member action");
        Ok(())
    }

    /// Burn stake for a pro-rata claim on every recognized asset.
    ///
    /// Blocked while the member's highest-index yes vote sits on an
    /// unprocessed proposal: an exit must not pull weight out from under an
    /// in-flight vote. Partial exits leave the member active with reduced
    /// stake and a new checkpoint.
    pub fn ragequit(
        &mut self,
        member: &Address,
        loot_to_burn: u128,
        shares_to_burn: u128,
        bank: &mut dyn AssetBank,
        now: Timestamp,
    ) -> Result<(), GovError> {
        let record = self.members.member(member).cloned().unwrap_or_default();
        let highest = record.highest_index_yes_vote;
        if highest != 0 {
            let settled = self
                .proposals
                .get(highest)
                .map(|p| p.processed)
                .unwrap_or(true);
            if !settled {
                return Err(GovError::UnsettledYesVote {
                    member: member.clone(),
                    index: highest,
                });
            }
        }

        // The burn is validated in full before the first transfer leaves the
        // treasury; transfers are not reversible from here.
        if loot_to_burn != 0 && self.members.is_paused(StakeUnit::Loot) {
            return Err(LedgerError::TokenPaused {
                unit: StakeUnit::Loot,
            }
            .into());
        }
        if shares_to_burn != 0 && self.members.is_paused(StakeUnit::Shares) {
            return Err(LedgerError::TokenPaused {
                unit: StakeUnit::Shares,
            }
            .into());
        }
        if record.loot < loot_to_burn {
            return Err(LedgerError::InsufficientBalance {
                unit: StakeUnit::Loot,
                needed: loot_to_burn,
                available: record.loot,
            }
            .into());
        }
        if record.shares < shares_to_burn {
            return Err(LedgerError::InsufficientBalance {
                unit: StakeUnit::Shares,
                needed: shares_to_burn,
                available: record.shares,
            }
            .into());
        }

        let burned = loot_to_burn
            .checked_add(shares_to_burn)
            .ok_or(LedgerError::Overflow)?;
        let total_stake = self
            .members
            .total_loot()
            .checked_add(self.members.total_shares())
            .ok_or(LedgerError::Overflow)?;

        for token in self.assets.as_slice() {
            let claim = pro_rata_claim(bank.balance(token), burned, total_stake)?;
            if claim > 0 {
                bank.transfer(token, member, claim)?;
            }
        }

        self.members
            .apply_member_action(&mut self.power, member, loot_to_burn, shares_to_burn, false, now)?;
        info!(member = %member, loot_to_burn, shares_to_burn, "ragequit settled");
        Ok(())
    }

    /// Weighted mint-on-win: each target is granted the winning yes tally in
    /// loot and shares. Pre-checked in full so a mid-loop failure cannot
    /// leave a partial grant behind.
    fn grant_membership(
        &mut self,
        calls: &[ProposalCall],
        yes_votes: u128,
        now: Timestamp,
    ) -> Result<(), GovError> {
        if yes_votes == 0 || calls.is_empty() {
            return Ok(());
        }
        if self.members.is_paused(StakeUnit::Loot) {
            return Err(LedgerError::TokenPaused {
                unit: StakeUnit::Loot,
            }
            .into());
        }
        if self.members.is_paused(StakeUnit::Shares) {
            return Err(LedgerError::TokenPaused {
                unit: StakeUnit::Shares,
            }
            .into());
        }
        let minted = yes_votes
            .checked_mul(calls.len() as u128)
            .ok_or(LedgerError::Overflow)?;
        self.members
            .total_loot()
            .checked_add(minted)
            .ok_or(LedgerError::Overflow)?;
        self.members
            .total_shares()
            .checked_add(minted)
            .ok_or(LedgerError::Overflow)?;
        for call in calls {
            self.members.apply_member_action(
                &mut self.power,
                &call.target,
                yes_votes,
                yes_votes,
                true,
                now,
            )?;
        }
        Ok(())
    }

    fn apply_period_change(&mut self, calls: &[ProposalCall]) {
        // The payload was validated at submission; decode cannot fail here.
        let Some(change) = calls.first().and_then(|c| PeriodChange::decode(&c.payload)) else {
            return;
        };
        if let Some(min) = change.min_voting_period_secs {
            self.config.min_voting_period_secs = min;
        }
        if let Some(max) = change.max_voting_period_secs {
            self.config.max_voting_period_secs = max;
        }
        if let Some(grace) = change.grace_period_secs {
            self.config.grace_period_secs = grace;
        }
        if let Some(paused) = change.pause_loot {
            self.members.set_paused(StakeUnit::Loot, paused);
        }
        if let Some(paused) = change.pause_shares {
            self.members.set_paused(StakeUnit::Shares, paused);
        }
    }

    fn apply_whitelist(&mut self, calls: &[ProposalCall]) {
        for call in calls {
            if call.value != 0 {
                self.assets.add(call.target.clone());
            } else {
                self.assets.remove(&call.target);
            }
        }
    }

    // ── Read accessors ───────────────────────────────────────────────────

    pub fn config(&self) -> &GovConfig {
        &self.config
    }

    pub fn member(&self, address: &Address) -> Option<&Member> {
        self.members.member(address)
    }

    pub fn total_shares(&self) -> u128 {
        self.members.total_shares()
    }

    pub fn total_loot(&self) -> u128 {
        self.members.total_loot()
    }

    pub fn is_paused(&self, unit: StakeUnit) -> bool {
        self.members.is_paused(unit)
    }

    pub fn proposal(&self, index: u64) -> Option<&Proposal> {
        self.proposals.get(index)
    }

    pub fn proposal_count(&self) -> u64 {
        self.proposals.count()
    }

    /// The legacy 4-element flag view of a proposal's category.
    pub fn proposal_flags(&self, index: u64) -> Result<[bool; 4], GovError> {
        self.proposals
            .get(index)
            .map(|p| p.kind.flags())
            .ok_or(GovError::ProposalNotFound(index))
    }

    /// The member's present voting power.
    pub fn current_votes(&self, member: &Address) -> u128 {
        self.power.current_power(member)
    }

    /// The member's voting power as of a settled past instant.
    pub fn prior_votes(
        &self,
        member: &Address,
        timestamp: Timestamp,
        now: Timestamp,
    ) -> Result<u128, GovError> {
        Ok(self.power.power_at(member, timestamp, now)?)
    }

    pub fn num_checkpoints(&self, member: &Address) -> usize {
        self.power.num_checkpoints(member)
    }

    pub fn checkpoint(&self, member: &Address, index: usize) -> Option<Checkpoint> {
        self.power.checkpoint(member, index)
    }

    pub fn guild_tokens(&self) -> &[Address] {
        self.assets.as_slice()
    }

    pub fn is_shaman(&self, address: &Address) -> bool {
        self.shamans.contains(address)
    }
}

impl GovernanceEngine {
    /// Serialize the whole engine for durable persistence.
    pub fn save_state(&self) -> Vec<u8> {
        bincode::serialize(self).unwrap_or_default()
    }

    /// Restore an engine from serialized bytes.
    pub fn load_state(data: &[u8]) -> Option<Self> {
        bincode::deserialize(data).ok()
    }

    /// The meta-store key used for engine persistence.
    pub fn meta_key() -> &'static str {
        ENGINE_META_KEY
    }
}
