//! The shared ledger state and its transition rules.

use crate::domain::catalog::Tier;
use crate::domain::foundation::{Amount, PrincipalId, ProposalId, TierId};
use crate::domain::governance::{Ballot, Proposal};
use crate::domain::holdings::Holding;
use crate::domain::ledger::LedgerError;
use crate::domain::treasury::Escrow;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The ledger's entire mutable state: catalog, holdings, escrow, and
/// governance, as one value.
///
/// Transitions are plain methods that either apply fully or return an
/// error having changed nothing observable. Handlers rely on that: they
/// mutate a loaded snapshot and only commit it on `Ok`, so a failed call
/// leaves the durable state untouched.
///
/// # Invariants
///
/// - Tier and proposal ids equal their insertion position (append-only)
/// - An active holding implies a prior purchase with no intervening cancel
/// - A (principal, proposal) pair votes at most once
/// - A proposal is approved at most once; approval consumes the voter roll
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    tiers: Vec<Tier>,
    holdings: BTreeMap<PrincipalId, Holding>,
    escrow: Escrow,
    proposals: Vec<Proposal>,
    ballots: BTreeMap<ProposalId, Ballot>,
}

impl LedgerState {
    /// Creates an empty ledger state.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Read accessors ──────────────────────────────────────────────

    /// Looks up a tier by id.
    pub fn tier(&self, id: TierId) -> Option<&Tier> {
        self.tiers.get(id.index() as usize)
    }

    /// All listed tiers in insertion order.
    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Looks up a proposal by id.
    pub fn proposal(&self, id: ProposalId) -> Option<&Proposal> {
        self.proposals.get(id.index() as usize)
    }

    /// All proposals in insertion order.
    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// Looks up a principal's holding, if any operation ever touched it.
    pub fn holding(&self, principal: &PrincipalId) -> Option<&Holding> {
        self.holdings.get(principal)
    }

    /// Returns true if the principal holds an active membership.
    pub fn is_active_member(&self, principal: &PrincipalId) -> bool {
        self.holdings
            .get(principal)
            .map(Holding::is_active)
            .unwrap_or(false)
    }

    /// Credential balance of a principal for a tier.
    pub fn balance(&self, principal: &PrincipalId, tier: TierId) -> u64 {
        self.holdings
            .get(principal)
            .map(|h| h.balance(tier))
            .unwrap_or(0)
    }

    /// Deposit currently escrowed against a tier.
    pub fn escrow_deposit(&self, tier: TierId) -> Amount {
        self.escrow.deposit(tier)
    }

    /// Total escrowed across all tiers.
    pub fn escrow_total(&self) -> Amount {
        self.escrow.total()
    }

    /// The ballot for a proposal, if any votes were cast.
    pub fn ballot(&self, proposal: ProposalId) -> Option<&Ballot> {
        self.ballots.get(&proposal)
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// Appends a tier to the catalog, assigning the next sequential id.
    ///
    /// # Errors
    ///
    /// `ValidationFailed` if the name is empty.
    pub fn list_tier(
        &mut self,
        name: impl Into<String>,
        price: Amount,
    ) -> Result<TierId, LedgerError> {
        let id = TierId::new(self.tiers.len() as u64);
        let tier = Tier::new(id, name, price)?;
        self.tiers.push(tier);
        Ok(id)
    }

    /// Purchases a membership: activates the caller's holding, credits one
    /// credential of the tier, and escrows the payment.
    ///
    /// Returns the escrowed amount (the tier price).
    ///
    /// # Errors
    ///
    /// - `UnknownTier` if the tier was never listed
    /// - `IncorrectPayment` if `paid` is not exactly the tier price
    /// - `AlreadyMember` if the caller's holding is already active
    pub fn purchase(
        &mut self,
        principal: PrincipalId,
        tier_id: TierId,
        paid: Amount,
    ) -> Result<Amount, LedgerError> {
        let tier = self
            .tier(tier_id)
            .ok_or(LedgerError::UnknownTier(tier_id))?;
        if paid != tier.price {
            return Err(LedgerError::incorrect_payment(tier.price, paid));
        }
        if self.is_active_member(&principal) {
            return Err(LedgerError::already_member(principal));
        }

        self.holdings
            .entry(principal.clone())
            .or_insert_with(|| Holding::new(principal))
            .record_purchase(tier_id);
        self.escrow.record(tier_id, paid);
        Ok(paid)
    }

    /// Cancels the caller's membership for a tier: drains the tier's
    /// escrowed deposit, zeroes the tier balance, and clears the active
    /// flag.
    ///
    /// Returns the drained deposit, which the caller must refund to the
    /// principal. The refund transfer is the handler's job and happens
    /// before this mutation is committed; a transfer failure does not undo
    /// the revocation.
    ///
    /// # Errors
    ///
    /// `NoActiveMembership` if the caller's holding is not active. The
    /// tier id is deliberately not bounds-checked: cancelling an unknown
    /// tier drains nothing and still revokes, matching the single check
    /// the operation has always had.
    pub fn cancel(
        &mut self,
        principal: PrincipalId,
        tier_id: TierId,
    ) -> Result<Amount, LedgerError> {
        if !self.is_active_member(&principal) {
            return Err(LedgerError::no_active_membership(principal));
        }

        let refund = self.escrow.drain(tier_id);
        if let Some(holding) = self.holdings.get_mut(&principal) {
            holding.revoke(tier_id);
        }
        Ok(refund)
    }

    /// Appends a proposal, assigning the next sequential id. Seed
    /// `vote_count` and `approved` values are stored verbatim.
    ///
    /// # Errors
    ///
    /// `ValidationFailed` if the name is empty.
    pub fn propose(
        &mut self,
        name: impl Into<String>,
        price: Amount,
        vote_count: u32,
        approved: bool,
    ) -> Result<ProposalId, LedgerError> {
        let id = ProposalId::new(self.proposals.len() as u64);
        let proposal = Proposal::new(id, name, price, vote_count, approved)?;
        self.proposals.push(proposal);
        Ok(id)
    }

    /// Records a vote by an active member.
    ///
    /// Returns the proposal's new vote count.
    ///
    /// # Errors
    ///
    /// - `NotEligible` if the caller holds no active membership
    /// - `UnknownProposal` if the proposal was never listed
    /// - `AlreadyVoted` if the (caller, proposal) pair already voted
    pub fn vote(
        &mut self,
        principal: PrincipalId,
        proposal_id: ProposalId,
    ) -> Result<u32, LedgerError> {
        if !self.is_active_member(&principal) {
            return Err(LedgerError::not_eligible(principal));
        }
        if self.proposal(proposal_id).is_none() {
            return Err(LedgerError::unknown_proposal(proposal_id));
        }

        let ballot = self.ballots.entry(proposal_id).or_default();
        if !ballot.record(principal.clone()) {
            return Err(LedgerError::already_voted(principal, proposal_id));
        }

        let proposal = &mut self.proposals[proposal_id.index() as usize];
        proposal.record_vote();
        Ok(proposal.vote_count)
    }

    /// Approves a proposal once quorum is met, minting one credential
    /// keyed by the proposal id to every voter on the roll, in vote order.
    ///
    /// Returns the consumed voter roll. Callable by any principal: quorum
    /// itself is the gate, not the identity of the caller.
    ///
    /// # Errors
    ///
    /// - `UnknownProposal` if the proposal was never listed
    /// - `AlreadyApproved` if the proposal is already approved (terminal)
    /// - `InsufficientVotes` if the vote count is below `required_votes`
    pub fn approve(
        &mut self,
        proposal_id: ProposalId,
        required_votes: u32,
    ) -> Result<Vec<PrincipalId>, LedgerError> {
        let proposal = self
            .proposals
            .get_mut(proposal_id.index() as usize)
            .ok_or(LedgerError::UnknownProposal(proposal_id))?;
        if proposal.status.is_approved() {
            return Err(LedgerError::already_approved(proposal_id));
        }
        if !proposal.has_quorum(required_votes) {
            return Err(LedgerError::insufficient_votes(
                required_votes,
                proposal.vote_count,
            ));
        }

        proposal
            .approve()
            .map_err(|e| LedgerError::ValidationFailed {
                message: e.to_string(),
            })?;

        let roll = self
            .ballots
            .get_mut(&proposal_id)
            .map(Ballot::take_roll)
            .unwrap_or_default();

        let tier = proposal_id.as_tier_id();
        for voter in &roll {
            self.holdings
                .entry(voter.clone())
                .or_insert_with(|| Holding::new(voter.clone()))
                .mint(tier);
        }
        Ok(roll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(name: &str) -> PrincipalId {
        PrincipalId::new(name).unwrap()
    }

    fn state_with_silver() -> LedgerState {
        let mut state = LedgerState::new();
        state.list_tier("Silver", Amount::new(2)).unwrap();
        state
    }

    // ── Catalog ─────────────────────────────────────────────────────

    #[test]
    fn tiers_get_sequential_ids_from_zero() {
        let mut state = LedgerState::new();
        assert_eq!(state.list_tier("Silver", Amount::new(2)).unwrap(), TierId::new(0));
        assert_eq!(state.list_tier("Gold", Amount::new(5)).unwrap(), TierId::new(1));
        assert_eq!(state.tiers().len(), 2);
        assert_eq!(state.tier(TierId::new(1)).unwrap().name, "Gold");
    }

    #[test]
    fn listing_rejects_empty_name_without_appending() {
        let mut state = LedgerState::new();
        assert!(state.list_tier("", Amount::new(2)).is_err());
        assert!(state.tiers().is_empty());
    }

    // ── Purchase ────────────────────────────────────────────────────

    #[test]
    fn purchase_activates_credits_and_escrows() {
        let mut state = state_with_silver();
        let escrowed = state
            .purchase(principal("u"), TierId::new(0), Amount::new(2))
            .unwrap();

        assert_eq!(escrowed, Amount::new(2));
        assert!(state.is_active_member(&principal("u")));
        assert_eq!(state.balance(&principal("u"), TierId::new(0)), 1);
        assert_eq!(state.escrow_deposit(TierId::new(0)), Amount::new(2));
    }

    #[test]
    fn purchase_of_unknown_tier_fails() {
        let mut state = state_with_silver();
        let result = state.purchase(principal("u"), TierId::new(7), Amount::new(2));
        assert!(matches!(result, Err(LedgerError::UnknownTier(_))));
    }

    #[test]
    fn purchase_requires_exact_payment() {
        let mut state = state_with_silver();

        for paid in [0u64, 1, 3] {
            let result = state.purchase(principal("u"), TierId::new(0), Amount::new(paid));
            assert!(
                matches!(result, Err(LedgerError::IncorrectPayment { .. })),
                "paid={} should be rejected",
                paid
            );
        }

        // Failed attempts left no state behind.
        assert!(!state.is_active_member(&principal("u")));
        assert_eq!(state.escrow_deposit(TierId::new(0)), Amount::ZERO);
    }

    #[test]
    fn active_member_cannot_purchase_again() {
        let mut state = state_with_silver();
        state.list_tier("Gold", Amount::new(5)).unwrap();
        state
            .purchase(principal("u"), TierId::new(0), Amount::new(2))
            .unwrap();

        // Not even a different tier: the active flag is global.
        let result = state.purchase(principal("u"), TierId::new(1), Amount::new(5));
        assert!(matches!(result, Err(LedgerError::AlreadyMember(_))));
        assert_eq!(state.balance(&principal("u"), TierId::new(1)), 0);
    }

    #[test]
    fn distinct_principals_may_hold_the_same_tier() {
        let mut state = state_with_silver();
        state
            .purchase(principal("u"), TierId::new(0), Amount::new(2))
            .unwrap();
        state
            .purchase(principal("m"), TierId::new(0), Amount::new(2))
            .unwrap();
        // Deposits pool into the tier bucket (known risk, see Escrow).
        assert_eq!(state.escrow_deposit(TierId::new(0)), Amount::new(4));
    }

    // ── Cancel ──────────────────────────────────────────────────────

    #[test]
    fn cancel_refunds_revokes_and_zeroes_escrow() {
        let mut state = state_with_silver();
        state
            .purchase(principal("u"), TierId::new(0), Amount::new(2))
            .unwrap();

        let refund = state.cancel(principal("u"), TierId::new(0)).unwrap();
        assert_eq!(refund, Amount::new(2));
        assert!(!state.is_active_member(&principal("u")));
        assert_eq!(state.balance(&principal("u"), TierId::new(0)), 0);
        assert_eq!(state.escrow_deposit(TierId::new(0)), Amount::ZERO);
    }

    #[test]
    fn cancel_without_active_membership_fails() {
        let mut state = state_with_silver();
        let result = state.cancel(principal("u"), TierId::new(0));
        assert!(matches!(result, Err(LedgerError::NoActiveMembership(_))));
    }

    #[test]
    fn cancel_after_cancel_fails() {
        let mut state = state_with_silver();
        state
            .purchase(principal("u"), TierId::new(0), Amount::new(2))
            .unwrap();
        state.cancel(principal("u"), TierId::new(0)).unwrap();

        let result = state.cancel(principal("u"), TierId::new(0));
        assert!(matches!(result, Err(LedgerError::NoActiveMembership(_))));
    }

    #[test]
    fn cancel_of_unescrowed_tier_refunds_zero_but_still_revokes() {
        let mut state = state_with_silver();
        state
            .purchase(principal("u"), TierId::new(0), Amount::new(2))
            .unwrap();

        // Wrong tier id: nothing escrowed there, revocation happens anyway.
        let refund = state.cancel(principal("u"), TierId::new(9)).unwrap();
        assert_eq!(refund, Amount::ZERO);
        assert!(!state.is_active_member(&principal("u")));
        // The Silver deposit is stranded in escrow.
        assert_eq!(state.escrow_deposit(TierId::new(0)), Amount::new(2));
    }

    #[test]
    fn membership_can_be_repurchased_after_cancel() {
        let mut state = state_with_silver();
        state
            .purchase(principal("u"), TierId::new(0), Amount::new(2))
            .unwrap();
        state.cancel(principal("u"), TierId::new(0)).unwrap();
        state
            .purchase(principal("u"), TierId::new(0), Amount::new(2))
            .unwrap();
        assert!(state.is_active_member(&principal("u")));
    }

    // ── Governance ──────────────────────────────────────────────────

    fn state_with_member_and_proposal() -> LedgerState {
        let mut state = state_with_silver();
        state
            .purchase(principal("u"), TierId::new(0), Amount::new(2))
            .unwrap();
        state.propose("Gold", Amount::new(4), 0, false).unwrap();
        state
    }

    #[test]
    fn proposals_get_sequential_ids_from_zero() {
        let mut state = LedgerState::new();
        assert_eq!(
            state.propose("Gold", Amount::new(4), 0, false).unwrap(),
            ProposalId::new(0)
        );
        assert_eq!(
            state.propose("Platinum", Amount::new(9), 0, false).unwrap(),
            ProposalId::new(1)
        );
    }

    #[test]
    fn propose_stores_seed_values_verbatim() {
        let mut state = LedgerState::new();
        let id = state.propose("Gold", Amount::new(4), 2, false).unwrap();
        assert_eq!(state.proposal(id).unwrap().vote_count, 2);
    }

    #[test]
    fn vote_requires_active_membership() {
        let mut state = state_with_member_and_proposal();
        let result = state.vote(principal("outsider"), ProposalId::new(0));
        assert!(matches!(result, Err(LedgerError::NotEligible(_))));
    }

    #[test]
    fn vote_on_unknown_proposal_fails() {
        let mut state = state_with_member_and_proposal();
        let result = state.vote(principal("u"), ProposalId::new(5));
        assert!(matches!(result, Err(LedgerError::UnknownProposal(_))));
    }

    #[test]
    fn vote_increments_count_and_joins_roll() {
        let mut state = state_with_member_and_proposal();
        let count = state.vote(principal("u"), ProposalId::new(0)).unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            state.ballot(ProposalId::new(0)).unwrap().roll(),
            &[principal("u")]
        );
    }

    #[test]
    fn second_vote_fails_and_leaves_count_unchanged() {
        let mut state = state_with_member_and_proposal();
        state.vote(principal("u"), ProposalId::new(0)).unwrap();

        let result = state.vote(principal("u"), ProposalId::new(0));
        assert!(matches!(result, Err(LedgerError::AlreadyVoted { .. })));
        assert_eq!(state.proposal(ProposalId::new(0)).unwrap().vote_count, 1);
    }

    #[test]
    fn cancelled_member_loses_vote_eligibility() {
        let mut state = state_with_member_and_proposal();
        state.cancel(principal("u"), TierId::new(0)).unwrap();
        let result = state.vote(principal("u"), ProposalId::new(0));
        assert!(matches!(result, Err(LedgerError::NotEligible(_))));
    }

    // ── Approve ─────────────────────────────────────────────────────

    fn state_with_quorum() -> LedgerState {
        let mut state = state_with_member_and_proposal();
        state
            .purchase(principal("m"), TierId::new(0), Amount::new(2))
            .unwrap();
        state.vote(principal("u"), ProposalId::new(0)).unwrap();
        state.vote(principal("m"), ProposalId::new(0)).unwrap();
        state
    }

    #[test]
    fn approve_below_quorum_fails_and_changes_nothing() {
        let mut state = state_with_member_and_proposal();
        state.vote(principal("u"), ProposalId::new(0)).unwrap();

        let result = state.approve(ProposalId::new(0), 2);
        assert!(matches!(
            result,
            Err(LedgerError::InsufficientVotes {
                required: 2,
                actual: 1
            })
        ));
        assert!(!state.proposal(ProposalId::new(0)).unwrap().status.is_approved());
        assert_eq!(state.ballot(ProposalId::new(0)).unwrap().roll().len(), 1);
    }

    #[test]
    fn approve_of_unknown_proposal_fails() {
        let mut state = state_with_quorum();
        let result = state.approve(ProposalId::new(9), 2);
        assert!(matches!(result, Err(LedgerError::UnknownProposal(_))));
    }

    #[test]
    fn approve_at_quorum_mints_to_roll_in_vote_order() {
        let mut state = state_with_quorum();
        let roll = state.approve(ProposalId::new(0), 2).unwrap();

        assert_eq!(roll, vec![principal("u"), principal("m")]);
        assert!(state.proposal(ProposalId::new(0)).unwrap().status.is_approved());
        // Credentials are keyed by the proposal id.
        assert_eq!(state.balance(&principal("u"), TierId::new(0)), 2);
        assert_eq!(state.balance(&principal("m"), TierId::new(0)), 2);
        assert!(state.ballot(ProposalId::new(0)).unwrap().roll().is_empty());
    }

    #[test]
    fn repeat_approve_is_rejected() {
        let mut state = state_with_quorum();
        state.approve(ProposalId::new(0), 2).unwrap();

        let result = state.approve(ProposalId::new(0), 2);
        assert!(matches!(result, Err(LedgerError::AlreadyApproved(_))));
        // No double mint.
        assert_eq!(state.balance(&principal("u"), TierId::new(0)), 2);
    }

    #[test]
    fn seeded_approved_proposal_cannot_be_approved_again() {
        let mut state = LedgerState::new();
        let id = state.propose("Gold", Amount::new(4), 5, true).unwrap();
        let result = state.approve(id, 2);
        assert!(matches!(result, Err(LedgerError::AlreadyApproved(_))));
    }

    #[test]
    fn voting_after_approval_still_fails_for_past_voters() {
        let mut state = state_with_quorum();
        state.approve(ProposalId::new(0), 2).unwrap();

        let result = state.vote(principal("u"), ProposalId::new(0));
        assert!(matches!(result, Err(LedgerError::AlreadyVoted { .. })));
    }

    #[test]
    fn minting_does_not_activate_non_members() {
        let mut state = LedgerState::new();
        state.list_tier("Silver", Amount::new(2)).unwrap();
        state
            .purchase(principal("u"), TierId::new(0), Amount::new(2))
            .unwrap();
        state.propose("Gold", Amount::new(4), 0, false).unwrap();
        state.vote(principal("u"), ProposalId::new(0)).unwrap();
        // Member cancels after voting; the roll still carries them.
        state.cancel(principal("u"), TierId::new(0)).unwrap();

        state.approve(ProposalId::new(0), 1).unwrap();
        assert_eq!(state.balance(&principal("u"), TierId::new(0)), 1);
        assert!(!state.is_active_member(&principal("u")));
    }
}
