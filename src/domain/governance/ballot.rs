//! Per-proposal ballot: the vote set and the ordered voter roll.

use crate::domain::foundation::PrincipalId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Votes cast on a single proposal.
///
/// Two views of the same information with different jobs:
/// - `voters` answers "has this principal voted?" (vote-once enforcement)
/// - `roll` preserves vote order for batch minting on approval
///
/// The roll is consumed exactly once: approval takes it, leaving the
/// ballot empty so a later approval attempt finds no pending voters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    voters: BTreeSet<PrincipalId>,
    roll: Vec<PrincipalId>,
}

impl Ballot {
    /// Creates an empty ballot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the principal has already voted.
    pub fn has_voted(&self, principal: &PrincipalId) -> bool {
        self.voters.contains(principal)
    }

    /// Records a vote, appending the voter to the roll.
    ///
    /// Returns false (and records nothing) if the principal already voted.
    pub fn record(&mut self, principal: PrincipalId) -> bool {
        if !self.voters.insert(principal.clone()) {
            return false;
        }
        self.roll.push(principal);
        true
    }

    /// Voters in vote order, as currently pending issuance.
    pub fn roll(&self) -> &[PrincipalId] {
        &self.roll
    }

    /// Takes the voter roll, leaving it empty.
    pub fn take_roll(&mut self) -> Vec<PrincipalId> {
        std::mem::take(&mut self.roll)
    }
}
