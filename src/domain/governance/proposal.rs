//! Proposal entity and its approval state machine.

use crate::domain::foundation::{Amount, ProposalId, StateMachine, ValidationError};
use serde::{Deserialize, Serialize};

/// Approval status of a proposal.
///
/// `Open -> Approved`, and Approved is terminal: there is no path back,
/// and a proposal is approved at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalStatus {
    /// Collecting votes; approval requires quorum.
    Open,

    /// Quorum reached and approval executed. Terminal.
    Approved,
}

impl ProposalStatus {
    /// Returns true once the proposal has been approved.
    pub fn is_approved(&self) -> bool {
        matches!(self, ProposalStatus::Approved)
    }
}

impl StateMachine for ProposalStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use ProposalStatus::*;
        matches!((self, target), (Open, Approved))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use ProposalStatus::*;
        match self {
            Open => vec![Approved],
            Approved => vec![],
        }
    }
}

/// A candidate new tier awaiting quorum approval.
///
/// # Invariants
///
/// - `id` equals the proposal's insertion position (first proposal is 0)
/// - `name` and `price` are immutable after creation
/// - Only `vote_count` and `status` ever change, through `record_vote`
///   and `approve`
///
/// Proposals may be created with seed `vote_count`/`approved` values; the
/// listing operation is intentionally permissive and stores the owner's
/// seeds verbatim. Callers normally pass 0 and false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Sequential identifier assigned at proposal time.
    pub id: ProposalId,

    /// Display name of the candidate tier.
    pub name: String,

    /// Price of the candidate tier.
    pub price: Amount,

    /// Number of recorded votes.
    pub vote_count: u32,

    /// Open or Approved.
    pub status: ProposalStatus,
}

impl Proposal {
    /// Creates a proposal with seed vote count and approval flag.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if the name is empty.
    pub fn new(
        id: ProposalId,
        name: impl Into<String>,
        price: Amount,
        vote_count: u32,
        approved: bool,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self {
            id,
            name,
            price,
            vote_count,
            status: if approved {
                ProposalStatus::Approved
            } else {
                ProposalStatus::Open
            },
        })
    }

    /// Increments the vote count by one.
    ///
    /// Vote-once enforcement lives in the ballot, not here.
    pub fn record_vote(&mut self) {
        self.vote_count += 1;
    }

    /// Returns true if the vote count meets the quorum.
    pub fn has_quorum(&self, required_votes: u32) -> bool {
        self.vote_count >= required_votes
    }

    /// Marks the proposal approved.
    ///
    /// # Errors
    ///
    /// Returns an error if the proposal is already approved (Approved is
    /// terminal).
    pub fn approve(&mut self) -> Result<(), ValidationError> {
        self.status = self.status.transition_to(ProposalStatus::Approved)?;
        Ok(())
    }
}
