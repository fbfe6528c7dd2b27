//! Command handlers for the quiz context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: run the command on the engine, drain the raised
//! events, publish them.

use cluequest_core::aggregate::AggregateRoot;
use cluequest_core::clock::Clock;
use cluequest_core::command::Command;
use cluequest_core::error::DomainError;
use cluequest_core::event::DomainEvent;
use cluequest_core::publisher::EventPublisher;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::domain::aggregates::{AnswerOutcome, QuizEngine, StartOutcome};
use crate::domain::commands::{RestartSession, StartSession, SubmitAnswer};
use crate::domain::events::QuizEvent;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct QuizCommandResult<O> {
    /// The session the command ran against.
    pub session_id: Uuid,
    /// What the command did.
    pub outcome: O,
    /// The events produced and published, oldest first.
    pub events: Vec<QuizEvent>,
}

fn publish_uncommitted(
    engine: &mut QuizEngine,
    publisher: &dyn EventPublisher<QuizEvent>,
) -> Result<Vec<QuizEvent>, DomainError> {
    let events = engine.take_uncommitted_events();
    if events.is_empty() {
        return Ok(events);
    }
    for event in &events {
        debug!(
            event_type = event.event_type(),
            sequence_number = event.metadata().sequence_number,
            payload = %event.to_payload(),
            "publishing event"
        );
    }
    publisher.publish(&events)?;
    Ok(events)
}

/// Handles the `StartSession` command: starts the timer, shows the first
/// question, and publishes the resulting events.
///
/// # Errors
///
/// Returns `DomainError` if publishing fails.
#[instrument(
    skip_all,
    fields(
        command_type = command.command_type(),
        session_id = %engine.id,
        correlation_id = %command.correlation_id,
    )
)]
pub fn handle_start_session(
    command: &StartSession,
    engine: &mut QuizEngine,
    clock: &dyn Clock,
    publisher: &dyn EventPublisher<QuizEvent>,
) -> Result<QuizCommandResult<StartOutcome>, DomainError> {
    let outcome = engine.start(command.correlation_id(), clock);
    match outcome {
        StartOutcome::Started => info!(
            questions = engine.questions().len(),
            fingerprint = engine.questions().fingerprint(),
            "session started"
        ),
        StartOutcome::AlreadyStarted => debug!(status = ?engine.state().status, "start ignored"),
    }

    let events = publish_uncommitted(engine, publisher)?;
    Ok(QuizCommandResult {
        session_id: engine.id,
        outcome,
        events,
    })
}

/// Handles the `SubmitAnswer` command: checks the answer against the current
/// question and publishes the resulting events.
///
/// # Errors
///
/// Returns `DomainError` if publishing fails.
#[instrument(
    skip_all,
    fields(
        command_type = command.command_type(),
        session_id = %engine.id,
        correlation_id = %command.correlation_id,
    )
)]
pub fn handle_submit_answer(
    command: &SubmitAnswer,
    engine: &mut QuizEngine,
    clock: &dyn Clock,
    publisher: &dyn EventPublisher<QuizEvent>,
) -> Result<QuizCommandResult<AnswerOutcome>, DomainError> {
    let position = engine.state().position;
    let outcome = engine.submit_answer(&command.answer, command.correlation_id(), clock);
    match outcome {
        AnswerOutcome::Ignored => {
            debug!(status = ?engine.state().status, "answer ignored outside a running session");
        }
        _ => info!(
            position,
            ?outcome,
            score = engine.state().score,
            "answer handled"
        ),
    }

    let events = publish_uncommitted(engine, publisher)?;
    Ok(QuizCommandResult {
        session_id: engine.id,
        outcome,
        events,
    })
}

/// Handles the `RestartSession` command: resets the session and publishes
/// the reset event.
///
/// # Errors
///
/// Returns `DomainError` if publishing fails.
#[instrument(
    skip_all,
    fields(
        command_type = command.command_type(),
        session_id = %engine.id,
        correlation_id = %command.correlation_id,
    )
)]
pub fn handle_restart_session(
    command: &RestartSession,
    engine: &mut QuizEngine,
    clock: &dyn Clock,
    publisher: &dyn EventPublisher<QuizEvent>,
) -> Result<QuizCommandResult<()>, DomainError> {
    info!(from = ?engine.state().status, "restarting session");
    engine.restart(command.correlation_id(), clock);

    let events = publish_uncommitted(engine, publisher)?;
    Ok(QuizCommandResult {
        session_id: engine.id,
        outcome: (),
        events,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeZone, Utc};
    use cluequest_core::aggregate::AggregateRoot;
    use cluequest_core::error::DomainError;
    use cluequest_core::event::DomainEvent;
    use uuid::Uuid;

    use crate::application::command_handlers::{
        handle_restart_session, handle_start_session, handle_submit_answer,
    };
    use crate::domain::aggregates::{AnswerOutcome, QuizEngine, StartOutcome};
    use crate::domain::commands::{RestartSession, StartSession, SubmitAnswer};
    use crate::domain::events::{QuizEvent, QuizEventKind};
    use crate::domain::questions::QuestionSet;
    use crate::domain::state::SessionStatus;
    use cluequest_test_support::{FailingPublisher, FixedClock, NullPublisher, RecordingPublisher};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
    }

    fn builtin_engine() -> QuizEngine {
        QuizEngine::new(Uuid::new_v4(), QuestionSet::builtin().unwrap())
    }

    fn submit(answer: &str) -> SubmitAnswer {
        SubmitAnswer {
            correlation_id: Uuid::new_v4(),
            answer: answer.to_owned(),
        }
    }

    #[test]
    fn test_handle_start_session_publishes_started_and_first_question() {
        // Arrange
        let correlation_id = Uuid::new_v4();
        let clock = FixedClock(fixed_now());
        let publisher = RecordingPublisher::<QuizEvent>::new();
        let mut engine = builtin_engine();

        let command = StartSession { correlation_id };

        // Act
        let result = handle_start_session(&command, &mut engine, &clock, &publisher).unwrap();

        // Assert
        assert_eq!(result.outcome, StartOutcome::Started);
        assert_eq!(result.session_id, engine.id);
        assert_eq!(result.events.len(), 2);

        let batches = publisher.batches();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0], result.events);

        let started = &batches[0][0];
        assert_eq!(started.event_type(), "quiz.session_started");
        assert_eq!(started.metadata().correlation_id, correlation_id);
        assert_eq!(started.metadata().occurred_at, fixed_now());
        match &started.kind {
            QuizEventKind::SessionStarted(payload) => {
                assert_eq!(payload.total_questions, 5);
                assert_eq!(
                    payload.question_set_fingerprint,
                    engine.questions().fingerprint()
                );
            }
            other => panic!("expected SessionStarted, got {other:?}"),
        }
        assert!(engine.uncommitted_events().is_empty());
    }

    #[test]
    fn test_handle_start_session_twice_publishes_nothing_the_second_time() {
        // Arrange
        let clock = FixedClock(fixed_now());
        let publisher = RecordingPublisher::<QuizEvent>::new();
        let mut engine = builtin_engine();
        let command = StartSession {
            correlation_id: Uuid::new_v4(),
        };
        handle_start_session(&command, &mut engine, &clock, &publisher).unwrap();

        // Act
        let result = handle_start_session(&command, &mut engine, &clock, &publisher).unwrap();

        // Assert
        assert_eq!(result.outcome, StartOutcome::AlreadyStarted);
        assert!(result.events.is_empty());
        assert_eq!(publisher.batches().len(), 1);
    }

    #[test]
    fn test_handle_submit_answer_publishes_rejection_for_wrong_answer() {
        // Arrange
        let clock = FixedClock(fixed_now());
        let publisher = RecordingPublisher::<QuizEvent>::new();
        let mut engine = builtin_engine();
        engine.start(Uuid::new_v4(), &clock);
        engine.take_uncommitted_events();

        // Act
        let result =
            handle_submit_answer(&submit("INSERT"), &mut engine, &clock, &publisher).unwrap();

        // Assert
        assert_eq!(result.outcome, AnswerOutcome::Incorrect);
        let events = publisher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "quiz.answer_rejected");
        assert_eq!(engine.state().score, 0);
    }

    #[test]
    fn test_handle_submit_answer_before_start_publishes_nothing() {
        // Arrange
        let clock = FixedClock(fixed_now());
        let publisher = RecordingPublisher::<QuizEvent>::new();
        let mut engine = builtin_engine();

        // Act
        let result =
            handle_submit_answer(&submit("SELECT"), &mut engine, &clock, &publisher).unwrap();

        // Assert
        assert_eq!(result.outcome, AnswerOutcome::Ignored);
        assert!(result.events.is_empty());
        assert!(publisher.batches().is_empty());
    }

    #[test]
    fn test_handle_restart_session_publishes_reset() {
        // Arrange
        let clock = FixedClock(fixed_now());
        let publisher = RecordingPublisher::<QuizEvent>::new();
        let mut engine = builtin_engine();
        let start = StartSession {
            correlation_id: Uuid::new_v4(),
        };
        handle_start_session(&start, &mut engine, &clock, &NullPublisher).unwrap();
        handle_submit_answer(&submit("select"), &mut engine, &clock, &NullPublisher).unwrap();

        let command = RestartSession {
            correlation_id: Uuid::new_v4(),
        };

        // Act
        let result = handle_restart_session(&command, &mut engine, &clock, &publisher).unwrap();

        // Assert
        assert_eq!(result.events.len(), 1);
        assert_eq!(publisher.events()[0].event_type(), "quiz.session_reset");
        assert_eq!(engine.state().status, SessionStatus::NotStarted);
        assert_eq!(engine.state().score, 0);
    }

    #[test]
    fn test_handler_returns_infrastructure_error_when_publish_fails() {
        // Arrange
        let clock = FixedClock(fixed_now());
        let mut engine = builtin_engine();
        let command = StartSession {
            correlation_id: Uuid::new_v4(),
        };

        // Act
        let result = handle_start_session(&command, &mut engine, &clock, &FailingPublisher);

        // Assert
        match result {
            Err(DomainError::Infrastructure(msg)) => assert!(msg.contains("disconnected")),
            other => panic!("expected Infrastructure, got {other:?}"),
        }
    }
}
