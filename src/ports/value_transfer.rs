//! Value-transfer port for the native-value channel.
//!
//! Moves integer amounts between a principal's account and the ledger's
//! custody account. Purchase collects inbound payment, cancel and
//! withdraw pay outbound. The ledger trusts the channel to report whether
//! a movement happened; it never inspects balances beyond its own custody
//! account.

use crate::domain::foundation::{Amount, PrincipalId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for moving native value in and out of the ledger's custody.
#[async_trait]
pub trait ValueTransfer: Send + Sync {
    /// Collects an inbound payment from a principal into custody.
    ///
    /// # Errors
    ///
    /// `InsufficientFunds` if the principal cannot cover the amount,
    /// `ChannelError` on channel failure.
    async fn collect(&self, from: &PrincipalId, amount: Amount) -> Result<(), TransferError>;

    /// Pays an outbound amount from custody to a principal.
    ///
    /// # Errors
    ///
    /// `InsufficientFunds` if custody cannot cover the amount,
    /// `ChannelError` on channel failure.
    async fn transfer(&self, to: &PrincipalId, amount: Amount) -> Result<(), TransferError>;

    /// Current balance of the ledger's custody account.
    async fn custody_balance(&self) -> Result<Amount, TransferError>;
}

/// Category of a transfer failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferErrorCode {
    /// The paying account cannot cover the amount.
    InsufficientFunds,

    /// The channel itself failed.
    ChannelError,
}

/// Error raised by the value-transfer channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferError {
    pub code: TransferErrorCode,
    pub message: String,
}

impl TransferError {
    /// Creates a new transfer error.
    pub fn new(code: TransferErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates an insufficient-funds error.
    pub fn insufficient_funds(message: impl Into<String>) -> Self {
        Self::new(TransferErrorCode::InsufficientFunds, message)
    }

    /// Creates a channel error.
    pub fn channel(message: impl Into<String>) -> Self {
        Self::new(TransferErrorCode::ChannelError, message)
    }
}

impl std::fmt::Display for TransferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransferError {}
