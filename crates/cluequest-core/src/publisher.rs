//! Event publisher abstraction.
//!
//! Aggregates never talk to their subscribers directly. Command handlers
//! drain the raised events and hand them to a publisher, which may render
//! them, record them, or forward them elsewhere.

use crate::error::DomainError;
use crate::event::DomainEvent;

/// Sink for domain events produced by command handling.
pub trait EventPublisher<E: DomainEvent>: Send + Sync {
    /// Publish events in the order they were raised.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the subscriber cannot accept
    /// the events.
    fn publish(&self, events: &[E]) -> Result<(), DomainError>;
}
