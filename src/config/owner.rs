//! Owner configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::PrincipalId;

/// Owner configuration (the principal with catalog, proposal and
/// withdrawal rights)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnerConfig {
    /// Owner principal identifier
    pub principal: String,
}

impl OwnerConfig {
    /// Validate owner configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.principal.trim().is_empty() {
            return Err(ValidationError::InvalidOwner);
        }
        Ok(())
    }

    /// The owner as a domain principal id.
    ///
    /// Call [`validate`](Self::validate) first; an empty principal fails
    /// here too.
    pub fn principal_id(&self) -> Result<PrincipalId, ValidationError> {
        PrincipalId::new(&self.principal).map_err(|_| ValidationError::InvalidOwner)
    }
}
