//! Application layer - one command handler per ledger operation.

pub mod handlers;
