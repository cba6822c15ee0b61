//! Adapters - Reference implementations of the ports.
//!
//! `memory` holds the in-process store and value channel; `events` holds
//! the notification-channel publishers.

pub mod events;
pub mod memory;
