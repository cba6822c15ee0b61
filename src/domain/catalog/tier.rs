//! Tier catalog entry.

use crate::domain::foundation::{Amount, TierId, ValidationError};
use serde::{Deserialize, Serialize};

/// A purchasable membership class with a name and fixed price.
///
/// # Invariants
///
/// - `id` equals the tier's insertion position in the catalog (first tier
///   is 0)
/// - Immutable once listed; the catalog is append-only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tier {
    /// Sequential identifier assigned at listing time.
    pub id: TierId,

    /// Display name, e.g. "Silver".
    pub name: String,

    /// Exact price a purchaser must pay. Zero is a valid price.
    pub price: Amount,
}

impl Tier {
    /// Creates a new tier entry.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if the name is empty.
    pub fn new(id: TierId, name: impl Into<String>, price: Amount) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        Ok(Self { id, name, price })
    }
}
