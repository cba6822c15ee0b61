//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the membership ledger domain.

mod amount;
mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use amount::Amount;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent};
pub use ids::{PrincipalId, ProposalId, TierId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
