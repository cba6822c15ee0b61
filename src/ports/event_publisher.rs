//! Event publisher port for the notification channel.
//!
//! One-way, best-effort broadcast of ledger events. No acknowledgment,
//! no ordering guarantee beyond emission order within one operation.

use crate::domain::foundation::{DomainError, EventEnvelope};
use async_trait::async_trait;

/// Port for publishing domain events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes a single event envelope.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publishes a batch of envelopes in order.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}
