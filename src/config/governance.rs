//! Governance configuration

use serde::Deserialize;

use super::error::ValidationError;

fn default_required_votes() -> u32 {
    2
}

/// Governance configuration (quorum)
#[derive(Debug, Clone, Deserialize)]
pub struct GovernanceConfig {
    /// Votes required before a proposal can be approved
    #[serde(default = "default_required_votes")]
    pub required_votes: u32,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            required_votes: default_required_votes(),
        }
    }
}

impl GovernanceConfig {
    /// Validate governance configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.required_votes == 0 {
            return Err(ValidationError::InvalidQuorum);
        }
        Ok(())
    }
}
