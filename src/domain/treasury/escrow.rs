//! Per-tier deposit escrow.
//!
//! Escrow tracks, per tier, the amounts paid in by holders who have not
//! yet cancelled. It is bookkeeping only: the funds themselves sit in the
//! ledger's custody account at the value-transfer channel, and an owner
//! withdrawal can drain them regardless of what is recorded here. That
//! mismatch is a known, deliberately preserved risk surface.

use crate::domain::foundation::{Amount, TierId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-tier refundable deposit bookkeeping.
///
/// Each tier has a single bucket. With the normal one-active-purchase-per-
/// tier usage the bucket holds at most one payment; if two principals hold
/// the same tier concurrently their deposits pool and the first cancel
/// drains the whole bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Escrow {
    deposits: BTreeMap<TierId, Amount>,
}

impl Escrow {
    /// Creates an empty escrow.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the deposit currently held against a tier (zero if none).
    pub fn deposit(&self, tier: TierId) -> Amount {
        self.deposits.get(&tier).copied().unwrap_or(Amount::ZERO)
    }

    /// Records a payment into a tier's bucket.
    pub fn record(&mut self, tier: TierId, paid: Amount) {
        let entry = self.deposits.entry(tier).or_insert(Amount::ZERO);
        *entry = entry.saturating_add(paid);
    }

    /// Removes and returns the whole deposit for a tier.
    ///
    /// Returns `Amount::ZERO` if nothing was escrowed.
    pub fn drain(&mut self, tier: TierId) -> Amount {
        self.deposits.remove(&tier).unwrap_or(Amount::ZERO)
    }

    /// Total amount recorded across all tiers.
    pub fn total(&self) -> Amount {
        self.deposits.values().copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_escrow_reports_zero() {
        let escrow = Escrow::new();
        assert_eq!(escrow.deposit(TierId::new(0)), Amount::ZERO);
        assert_eq!(escrow.total(), Amount::ZERO);
    }

    #[test]
    fn record_then_drain_returns_exact_deposit() {
        let mut escrow = Escrow::new();
        escrow.record(TierId::new(0), Amount::new(2));
        assert_eq!(escrow.deposit(TierId::new(0)), Amount::new(2));
        assert_eq!(escrow.drain(TierId::new(0)), Amount::new(2));
        assert_eq!(escrow.deposit(TierId::new(0)), Amount::ZERO);
    }

    #[test]
    fn drain_of_empty_tier_is_zero() {
        let mut escrow = Escrow::new();
        assert_eq!(escrow.drain(TierId::new(9)), Amount::ZERO);
    }

    #[test]
    fn concurrent_deposits_pool_into_one_bucket() {
        // Known risk: the first cancel takes both deposits.
        let mut escrow = Escrow::new();
        escrow.record(TierId::new(0), Amount::new(2));
        escrow.record(TierId::new(0), Amount::new(2));
        assert_eq!(escrow.drain(TierId::new(0)), Amount::new(4));
    }

    #[test]
    fn total_sums_across_tiers() {
        let mut escrow = Escrow::new();
        escrow.record(TierId::new(0), Amount::new(2));
        escrow.record(TierId::new(1), Amount::new(5));
        assert_eq!(escrow.total(), Amount::new(7));
    }
}
