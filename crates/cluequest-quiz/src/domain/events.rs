//! Domain events for the quiz context.
//!
//! These are the notifications a presentation layer renders. Each one is
//! raised by exactly one engine operation.

use chrono::{DateTime, Utc};
use cluequest_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emitted when a session is started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStarted {
    /// The session identifier.
    pub session_id: Uuid,
    /// When the session timer started.
    pub started_at: DateTime<Utc>,
    /// Number of questions in play.
    pub total_questions: usize,
    /// Fingerprint of the question set in play.
    pub question_set_fingerprint: String,
}

/// Emitted whenever a question becomes the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionShown {
    /// Zero-based question index.
    pub index: usize,
    /// Number of questions in play.
    pub total_questions: usize,
    /// The question prompt.
    pub prompt: String,
    /// The previous question's lead-in, shown before the prompt.
    pub lead_in: Option<String>,
}

/// Emitted when the current question is answered correctly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerAccepted {
    /// Zero-based index of the question that was answered.
    pub index: usize,
    /// Narrative revealed by the answer.
    pub reveal_text: String,
    /// Score after this answer.
    pub score: u32,
    /// Clues found after this answer.
    pub clues_found: u32,
}

/// Emitted when a non-empty answer does not match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRejected {
    /// Zero-based index of the question still awaiting an answer.
    pub index: usize,
}

/// Emitted when the submitted answer is empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationFailed {
    /// Message for the player.
    pub message: String,
}

/// Emitted after the last question is answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCompleted {
    /// Final score.
    pub final_score: u32,
    /// Total clues found.
    pub clues_found: u32,
    /// Frozen elapsed time in milliseconds.
    pub elapsed_ms: i64,
}

/// Emitted when a session is reset to its initial state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReset {
    /// The session identifier.
    pub session_id: Uuid,
}

/// Event type identifier for [`SessionStarted`].
pub const SESSION_STARTED_EVENT_TYPE: &str = "quiz.session_started";

/// Event type identifier for [`QuestionShown`].
pub const QUESTION_SHOWN_EVENT_TYPE: &str = "quiz.question_shown";

/// Event type identifier for [`AnswerAccepted`].
pub const ANSWER_ACCEPTED_EVENT_TYPE: &str = "quiz.answer_accepted";

/// Event type identifier for [`AnswerRejected`].
pub const ANSWER_REJECTED_EVENT_TYPE: &str = "quiz.answer_rejected";

/// Event type identifier for [`ValidationFailed`].
pub const VALIDATION_FAILED_EVENT_TYPE: &str = "quiz.validation_failed";

/// Event type identifier for [`SessionCompleted`].
pub const SESSION_COMPLETED_EVENT_TYPE: &str = "quiz.session_completed";

/// Event type identifier for [`SessionReset`].
pub const SESSION_RESET_EVENT_TYPE: &str = "quiz.session_reset";

/// Event payload variants for the quiz context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizEventKind {
    /// A session has started.
    SessionStarted(SessionStarted),
    /// A question is now current.
    QuestionShown(QuestionShown),
    /// An answer was correct.
    AnswerAccepted(AnswerAccepted),
    /// An answer was wrong.
    AnswerRejected(AnswerRejected),
    /// An answer was empty.
    ValidationFailed(ValidationFailed),
    /// The session is complete.
    SessionCompleted(SessionCompleted),
    /// The session was reset.
    SessionReset(SessionReset),
}

impl QuizEventKind {
    /// Returns the event type name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::SessionStarted(_) => SESSION_STARTED_EVENT_TYPE,
            Self::QuestionShown(_) => QUESTION_SHOWN_EVENT_TYPE,
            Self::AnswerAccepted(_) => ANSWER_ACCEPTED_EVENT_TYPE,
            Self::AnswerRejected(_) => ANSWER_REJECTED_EVENT_TYPE,
            Self::ValidationFailed(_) => VALIDATION_FAILED_EVENT_TYPE,
            Self::SessionCompleted(_) => SESSION_COMPLETED_EVENT_TYPE,
            Self::SessionReset(_) => SESSION_RESET_EVENT_TYPE,
        }
    }
}

/// Domain event envelope for the quiz context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: QuizEventKind,
}

impl DomainEvent for QuizEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Every payload field is a string, number, uuid or timestamp.
        serde_json::to_value(&self.kind).expect("QuizEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_to_payload_is_externally_tagged_by_variant() {
        // Arrange
        let kind = QuizEventKind::AnswerAccepted(AnswerAccepted {
            index: 0,
            reveal_text: "found it".to_owned(),
            score: 100,
            clues_found: 1,
        });
        let event = QuizEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: Uuid::new_v4(),
                sequence_number: 3,
                correlation_id: Uuid::new_v4(),
                causation_id: Uuid::new_v4(),
                occurred_at: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
            },
            kind: kind.clone(),
        };

        // Act
        let payload = event.to_payload();

        // Assert
        assert_eq!(event.event_type(), "quiz.answer_accepted");
        assert_eq!(payload["AnswerAccepted"]["index"], 0);
        assert_eq!(payload["AnswerAccepted"]["score"], 100);
        assert_eq!(payload["AnswerAccepted"]["clues_found"], 1);
        assert_eq!(payload["AnswerAccepted"]["reveal_text"], "found it");
        let back: QuizEventKind = serde_json::from_value(payload).unwrap();
        assert_eq!(back, kind);
    }

    #[test]
    fn test_event_type_names_are_namespaced() {
        let kind = QuizEventKind::ValidationFailed(ValidationFailed {
            message: "empty".to_owned(),
        });

        assert_eq!(kind.event_type(), "quiz.validation_failed");
    }
}
