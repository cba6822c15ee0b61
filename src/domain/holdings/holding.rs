//! Holding aggregate entity.
//!
//! A Holding represents one principal's membership status and per-tier
//! credential balances.
//!
//! # Design Decisions
//!
//! - **Global active flag**: `active` is a single per-principal boolean,
//!   not a per-tier one. A principal cannot hold two tiers at once even
//!   though balances are tracked per tier. This is the deliberate
//!   global-exclusivity invariant.
//! - **Balances survive minting**: governance approval mints credentials
//!   into `balances` without touching `active`; activation happens only
//!   through `purchase`.

use crate::domain::foundation::{PrincipalId, TierId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A principal's membership status and per-tier credential balances.
///
/// # Invariants
///
/// - `active == true` implies a prior successful purchase with no
///   intervening cancellation
/// - Cancelling zeroes the cancelled tier's balance and clears `active`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    /// Principal this holding belongs to.
    pub principal: PrincipalId,

    /// Whether the principal currently holds an active membership.
    pub active: bool,

    /// Credential count per tier. Normally 0 or 1; batch minting on
    /// governance approval may push it higher.
    balances: BTreeMap<TierId, u64>,
}

impl Holding {
    /// Creates an empty holding for a principal.
    pub fn new(principal: PrincipalId) -> Self {
        Self {
            principal,
            active: false,
            balances: BTreeMap::new(),
        }
    }

    /// Returns the credential balance for a tier (0 if never minted).
    pub fn balance(&self, tier: TierId) -> u64 {
        self.balances.get(&tier).copied().unwrap_or(0)
    }

    /// Returns true if the principal holds an active membership.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Records a successful purchase: activates the membership and
    /// credits one credential of the purchased tier.
    ///
    /// Callers must have already rejected purchases by active members.
    pub fn record_purchase(&mut self, tier: TierId) {
        self.active = true;
        *self.balances.entry(tier).or_insert(0) += 1;
    }

    /// Revokes the membership for a tier: zeroes that tier's balance and
    /// clears the active flag.
    pub fn revoke(&mut self, tier: TierId) {
        self.balances.remove(&tier);
        self.active = false;
    }

    /// Mints one credential of a tier without changing the active flag.
    ///
    /// Used by governance approval to issue voter credentials.
    pub fn mint(&mut self, tier: TierId) {
        *self.balances.entry(tier).or_insert(0) += 1;
    }
}
