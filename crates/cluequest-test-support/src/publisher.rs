//! Test publishers — mock `EventPublisher` implementations for tests.

use std::sync::Mutex;

use cluequest_core::error::DomainError;
use cluequest_core::event::DomainEvent;
use cluequest_core::publisher::EventPublisher;

/// A publisher that records every batch it receives and always succeeds.
#[derive(Debug)]
pub struct RecordingPublisher<E> {
    published: Mutex<Vec<Vec<E>>>,
}

impl<E> RecordingPublisher<E> {
    /// Create an empty recording publisher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
        }
    }
}

impl<E> Default for RecordingPublisher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> RecordingPublisher<E> {
    /// Returns a snapshot of every published batch, in publish order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn batches(&self) -> Vec<Vec<E>> {
        self.published.lock().unwrap().clone()
    }

    /// Returns all published events flattened into one list.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn events(&self) -> Vec<E> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .flatten()
            .cloned()
            .collect()
    }
}

impl<E: DomainEvent + Clone> EventPublisher<E> for RecordingPublisher<E> {
    fn publish(&self, events: &[E]) -> Result<(), DomainError> {
        self.published.lock().unwrap().push(events.to_vec());
        Ok(())
    }
}

/// A publisher that silently discards everything.
#[derive(Debug)]
pub struct NullPublisher;

impl<E: DomainEvent> EventPublisher<E> for NullPublisher {
    fn publish(&self, _events: &[E]) -> Result<(), DomainError> {
        Ok(())
    }
}

/// A publisher that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingPublisher;

impl<E: DomainEvent> EventPublisher<E> for FailingPublisher {
    fn publish(&self, _events: &[E]) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("subscriber disconnected".into()))
    }
}
