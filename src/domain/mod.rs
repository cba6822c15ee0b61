//! Domain layer - the ledger's state-transition core.
//!
//! Organized as one bounded store (`ledger`) over four sub-responsibilities:
//! `catalog` (purchasable tiers), `holdings` (per-principal credentials),
//! `treasury` (per-tier escrow), and `governance` (proposals and votes).
//! `foundation` holds the shared value objects.

pub mod catalog;
pub mod foundation;
pub mod governance;
pub mod holdings;
pub mod ledger;
pub mod treasury;
