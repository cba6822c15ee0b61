//! In-memory event publisher that captures published envelopes.

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::EventPublisher;
use async_trait::async_trait;
use std::sync::Mutex;

/// Capturing publisher for tests and local wiring.
#[derive(Debug, Default)]
pub struct InMemoryEventPublisher {
    published: Mutex<Vec<EventEnvelope>>,
}

impl InMemoryEventPublisher {
    /// Creates a publisher with an empty capture buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all envelopes published so far, in emission order.
    pub fn published(&self) -> Vec<EventEnvelope> {
        self.published.lock().unwrap().clone()
    }

    /// Returns the event types published so far, in emission order.
    pub fn published_types(&self) -> Vec<String> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.event_type.clone())
            .collect()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.published.lock().unwrap().push(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        self.published.lock().unwrap().extend(events);
        Ok(())
    }
}
