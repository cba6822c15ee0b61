//! In-memory implementation of the ledger store.

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::ledger::LedgerState;
use crate::ports::LedgerStore;
use async_trait::async_trait;
use std::sync::Mutex;

/// In-process snapshot store backed by a mutex.
///
/// Snapshot replacement is atomic by construction: the whole state is
/// swapped under the lock. Suitable for tests and single-process
/// deployments; a durable implementation would persist the snapshot
/// instead.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    state: Mutex<LedgerState>,
    fail_commits: bool,
}

impl InMemoryLedgerStore {
    /// Creates a store holding an empty ledger state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with an existing state.
    pub fn with_state(state: LedgerState) -> Self {
        Self {
            state: Mutex::new(state),
            fail_commits: false,
        }
    }

    /// Creates a store whose commits always fail (for rollback tests).
    pub fn failing_commits() -> Self {
        Self {
            state: Mutex::new(LedgerState::new()),
            fail_commits: true,
        }
    }

    /// Returns a copy of the currently committed snapshot.
    pub fn snapshot(&self) -> LedgerState {
        self.state.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn load(&self) -> Result<LedgerState, DomainError> {
        Ok(self.state.lock().unwrap().clone())
    }

    async fn commit(&self, state: LedgerState) -> Result<(), DomainError> {
        if self.fail_commits {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                "Simulated commit failure",
            ));
        }
        *self.state.lock().unwrap() = state;
        Ok(())
    }
}
