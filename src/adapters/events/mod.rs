//! Notification-channel adapters.

mod memory;
mod tracing_publisher;

pub use memory::InMemoryEventPublisher;
pub use tracing_publisher::TracingEventPublisher;
