//! Membership Ledger - Membership issuance and governance ledger.
//!
//! Tracks who holds a membership credential, custodies the funds paid for
//! it, and governs the introduction of new membership tiers through a
//! quorum vote.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
