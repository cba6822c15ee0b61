//! Catalog - owner-curated list of purchasable membership tiers.

mod tier;

pub use tier::Tier;
