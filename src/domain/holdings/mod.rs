//! Holdings - per-principal membership status and credential balances.

mod holding;

pub use holding::Holding;
