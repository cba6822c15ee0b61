//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the ledger and the outside world. Adapters implement these ports.
//!
//! - `LedgerStore` - durable atomic store with snapshot load/commit
//! - `ValueTransfer` - native-value channel between principals and custody
//! - `EventPublisher` - one-way, best-effort notification channel

mod event_publisher;
mod ledger_store;
mod value_transfer;

pub use event_publisher::EventPublisher;
pub use ledger_store::LedgerStore;
pub use value_transfer::{TransferError, TransferErrorCode, ValueTransfer};
