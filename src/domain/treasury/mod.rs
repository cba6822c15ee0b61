//! Treasury - per-tier deposit escrow backing refund-on-cancel.

mod escrow;

pub use escrow::Escrow;
