//! In-memory adapters for the store and value-transfer ports.

mod store;
mod transfer;

pub use store::InMemoryLedgerStore;
pub use transfer::InMemoryValueTransfer;
