//! Ledger store port (durable atomic store).
//!
//! Defines the contract for persisting the ledger state between calls.
//! The store works in whole snapshots: a handler loads the current state,
//! applies one operation to its local copy, and commits the copy only on
//! success. A failed operation commits nothing, which gives every
//! operation all-or-nothing effect application without the store needing
//! any notion of partial writes.

use crate::domain::foundation::DomainError;
use crate::domain::ledger::LedgerState;
use async_trait::async_trait;

/// Port for ledger state persistence with snapshot semantics.
///
/// Implementations must ensure:
/// - `load` returns the most recently committed snapshot
/// - `commit` replaces the stored snapshot atomically
///
/// The host sequences operations one at a time, so implementations do not
/// need optimistic locking; they do need the replace to be all-or-nothing.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Loads the current state snapshot.
    ///
    /// # Errors
    ///
    /// `StorageError` on persistence failure.
    async fn load(&self) -> Result<LedgerState, DomainError>;

    /// Atomically replaces the stored snapshot.
    ///
    /// # Errors
    ///
    /// `StorageError` on persistence failure; the previous snapshot
    /// remains in place.
    async fn commit(&self, state: LedgerState) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn LedgerStore) {}
    }
}
