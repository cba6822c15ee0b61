//! Log-only event publisher.
//!
//! The notification channel is one-way and best-effort; for deployments
//! with no external consumer this adapter simply logs each event at info
//! level and drops it.

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;
use async_trait::async_trait;
use tracing::info;

/// Publisher that logs envelopes via `tracing` and otherwise discards them.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventPublisher;

impl TracingEventPublisher {
    /// Creates a logging publisher.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        info!(
            event_type = %event.event_type,
            aggregate_type = %event.aggregate_type,
            aggregate_id = %event.aggregate_id,
            event_id = %event.event_id,
            "ledger event"
        );
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}
