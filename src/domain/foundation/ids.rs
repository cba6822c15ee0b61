//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Authenticated caller identity, supplied by the host.
///
/// The ledger trusts the identity source completely and never inspects the
/// value beyond requiring it to be non-empty. The representation is an
/// opaque string so any host-side identity scheme (address, account id,
/// public key) can be carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    /// Creates a PrincipalId from an opaque identity string.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if the string is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("principal_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PrincipalId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Identifier of a catalog tier.
///
/// Tiers are identified by insertion order starting at 0, so the id is a
/// plain sequence number rather than a random UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TierId(u64);

impl TierId {
    /// Creates a TierId from a sequence number.
    pub fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the sequence number.
    pub fn index(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TierId {
    fn from(index: u64) -> Self {
        Self(index)
    }
}

/// Identifier of a governance proposal, sequential like [`TierId`].
///
/// An approved proposal mints credentials keyed by its own id, so tier and
/// proposal numbering share one meaning for issued balances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(u64);

impl ProposalId {
    /// Creates a ProposalId from a sequence number.
    pub fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the sequence number.
    pub fn index(&self) -> u64 {
        self.0
    }

    /// The tier id credentials minted for this proposal are keyed by.
    pub fn as_tier_id(&self) -> TierId {
        TierId::new(self.0)
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProposalId {
    fn from(index: u64) -> Self {
        Self(index)
    }
}
