//! Ledger configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is
//! loaded with the `MEMBERSHIP_LEDGER_` prefix and nested values use
//! double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use membership_ledger::config::LedgerConfig;
//!
//! let config = LedgerConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Quorum: {} votes", config.governance.required_votes);
//! ```

mod error;
mod governance;
mod owner;

pub use error::{ConfigError, ValidationError};
pub use governance::GovernanceConfig;
pub use owner::OwnerConfig;

use serde::Deserialize;

/// Root ledger configuration
///
/// Load using [`LedgerConfig::load()`] which reads from environment
/// variables.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Owner configuration (the privileged principal)
    pub owner: OwnerConfig,

    /// Governance configuration (quorum)
    #[serde(default)]
    pub governance: GovernanceConfig,
}

impl LedgerConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `MEMBERSHIP_LEDGER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `MEMBERSHIP_LEDGER__OWNER__PRINCIPAL=owner-1` -> `owner.principal = owner-1`
    /// - `MEMBERSHIP_LEDGER__GOVERNANCE__REQUIRED_VOTES=3` -> `governance.required_votes = 3`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required environment variables are missing
    /// or values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("MEMBERSHIP_LEDGER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.owner.validate()?;
        self.governance.validate()?;
        Ok(())
    }
}
