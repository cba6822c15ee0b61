//! Tracing subscriber setup for hosts embedding the ledger.
//!
//! The library itself only emits events through `tracing`; installing a
//! subscriber is the host's choice. `init` wires up the common case: a
//! fmt subscriber filtered by `RUST_LOG`, falling back to the given
//! default directive.

use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber, honoring `RUST_LOG`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
