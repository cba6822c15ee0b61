//! Ledger-specific error types.
//!
//! Every failure is synchronous and terminates the operation before any
//! state is committed. The four spec-level families:
//!
//! | Family | Variants |
//! |--------|----------|
//! | Unauthorized | `Unauthorized` |
//! | NotFound | `UnknownTier`, `UnknownProposal` |
//! | InvalidPayment | `IncorrectPayment` |
//! | InvalidState | `AlreadyMember`, `NoActiveMembership`, `AlreadyVoted`, `NotEligible`, `InsufficientVotes`, `AlreadyApproved` |

use crate::domain::foundation::{
    Amount, DomainError, ErrorCode, PrincipalId, ProposalId, TierId, ValidationError,
};

/// Errors raised by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Caller lacks the owner role required by the operation.
    Unauthorized(PrincipalId),

    /// No catalog entry exists for this tier id.
    UnknownTier(TierId),

    /// Sent amount does not exactly match the tier price.
    IncorrectPayment { required: Amount, sent: Amount },

    /// Caller already holds an active membership.
    AlreadyMember(PrincipalId),

    /// Caller holds no active membership.
    NoActiveMembership(PrincipalId),

    /// No proposal exists for this proposal id.
    UnknownProposal(ProposalId),

    /// Caller has already voted on this proposal.
    AlreadyVoted {
        voter: PrincipalId,
        proposal: ProposalId,
    },

    /// Caller is not eligible to vote (no active holding).
    NotEligible(PrincipalId),

    /// Vote count is below the quorum.
    InsufficientVotes { required: u32, actual: u32 },

    /// Proposal has already been approved; Approved is terminal.
    AlreadyApproved(ProposalId),

    /// Input failed value-object validation.
    ValidationFailed { message: String },

    /// Outbound value transfer failed where failure is fatal.
    TransferFailed { reason: String },

    /// Store or publisher failure.
    Infrastructure(String),
}

impl LedgerError {
    // Constructor functions for cleaner error creation

    pub fn unauthorized(caller: PrincipalId) -> Self {
        LedgerError::Unauthorized(caller)
    }

    pub fn unknown_tier(tier: TierId) -> Self {
        LedgerError::UnknownTier(tier)
    }

    pub fn incorrect_payment(required: Amount, sent: Amount) -> Self {
        LedgerError::IncorrectPayment { required, sent }
    }

    pub fn already_member(principal: PrincipalId) -> Self {
        LedgerError::AlreadyMember(principal)
    }

    pub fn no_active_membership(principal: PrincipalId) -> Self {
        LedgerError::NoActiveMembership(principal)
    }

    pub fn unknown_proposal(proposal: ProposalId) -> Self {
        LedgerError::UnknownProposal(proposal)
    }

    pub fn already_voted(voter: PrincipalId, proposal: ProposalId) -> Self {
        LedgerError::AlreadyVoted { voter, proposal }
    }

    pub fn not_eligible(principal: PrincipalId) -> Self {
        LedgerError::NotEligible(principal)
    }

    pub fn insufficient_votes(required: u32, actual: u32) -> Self {
        LedgerError::InsufficientVotes { required, actual }
    }

    pub fn already_approved(proposal: ProposalId) -> Self {
        LedgerError::AlreadyApproved(proposal)
    }

    pub fn transfer_failed(reason: impl Into<String>) -> Self {
        LedgerError::TransferFailed {
            reason: reason.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        LedgerError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::Unauthorized(_) => ErrorCode::Unauthorized,
            LedgerError::UnknownTier(_) => ErrorCode::TierNotFound,
            LedgerError::IncorrectPayment { .. } => ErrorCode::InvalidPayment,
            LedgerError::AlreadyMember(_) => ErrorCode::AlreadyMember,
            LedgerError::NoActiveMembership(_) => ErrorCode::NoActiveMembership,
            LedgerError::UnknownProposal(_) => ErrorCode::ProposalNotFound,
            LedgerError::AlreadyVoted { .. } => ErrorCode::AlreadyVoted,
            LedgerError::NotEligible(_) => ErrorCode::NotEligible,
            LedgerError::InsufficientVotes { .. } => ErrorCode::InsufficientVotes,
            LedgerError::AlreadyApproved(_) => ErrorCode::ProposalAlreadyApproved,
            LedgerError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            LedgerError::TransferFailed { .. } => ErrorCode::TransferFailed,
            LedgerError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            LedgerError::Unauthorized(caller) => {
                format!("Caller {} is not the ledger owner", caller)
            }
            LedgerError::UnknownTier(tier) => format!("No tier listed with id {}", tier),
            LedgerError::IncorrectPayment { required, sent } => {
                format!("Tier price is {}, got {}", required, sent)
            }
            LedgerError::AlreadyMember(principal) => {
                format!("Principal {} already holds an active membership", principal)
            }
            LedgerError::NoActiveMembership(principal) => {
                format!("Principal {} holds no active membership", principal)
            }
            LedgerError::UnknownProposal(proposal) => {
                format!("No proposal listed with id {}", proposal)
            }
            LedgerError::AlreadyVoted { voter, proposal } => {
                format!("Principal {} already voted on proposal {}", voter, proposal)
            }
            LedgerError::NotEligible(principal) => {
                format!("Principal {} is not eligible to vote", principal)
            }
            LedgerError::InsufficientVotes { required, actual } => {
                format!("Quorum is {} votes, proposal has {}", required, actual)
            }
            LedgerError::AlreadyApproved(proposal) => {
                format!("Proposal {} is already approved", proposal)
            }
            LedgerError::ValidationFailed { message } => message.clone(),
            LedgerError::TransferFailed { reason } => format!("Value transfer failed: {}", reason),
            LedgerError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for LedgerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for LedgerError {}

impl From<ValidationError> for LedgerError {
    fn from(err: ValidationError) -> Self {
        LedgerError::ValidationFailed {
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for LedgerError {
    fn from(err: DomainError) -> Self {
        LedgerError::Infrastructure(err.to_string())
    }
}

impl From<LedgerError> for DomainError {
    fn from(err: LedgerError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
