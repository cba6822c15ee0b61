//! Ledger - the single shared state store and its transition rules.
//!
//! All four sub-stores (catalog, holdings, escrow, governance) live in one
//! [`LedgerState`] value. Every operation is a short, bounded sequence of
//! reads and writes over that value; a handler loads a snapshot, applies
//! one transition, and commits it only on success, reproducing the host's
//! all-or-nothing contract.

mod errors;
mod events;
mod state;

pub use errors::LedgerError;
pub use events::LedgerEvent;
pub use state::LedgerState;
