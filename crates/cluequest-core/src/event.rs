//! Event envelopes.
//!
//! Every notification the quiz engine raises carries an [`EventMetadata`]
//! header; the payload type is defined by the context that raises it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Header stamped on each raised event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Fresh per event.
    pub event_id: Uuid,
    /// Namespaced name such as `quiz.answer_accepted`.
    pub event_type: String,
    /// The session that raised the event.
    pub aggregate_id: Uuid,
    /// Position of the event in the session's history, starting at 1.
    pub sequence_number: i64,
    /// Copied from the command that produced the event.
    pub correlation_id: Uuid,
    /// The command that produced the event.
    pub causation_id: Uuid,
    /// Clock reading when the event was raised.
    pub occurred_at: DateTime<Utc>,
}

/// An event a presenter or subscriber can consume.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Namespaced event name, matching `metadata().event_type`.
    fn event_type(&self) -> &'static str;

    /// The payload alone as JSON, tagged by variant.
    fn to_payload(&self) -> serde_json::Value;

    /// The event header.
    fn metadata(&self) -> &EventMetadata;
}
