//! Query handlers for the quiz context.
//!
//! Read-only views over a running engine. Safe to call at any rate; the
//! timer display polls `get_session_view` on every tick.

use chrono::TimeDelta;
use cluequest_core::clock::Clock;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregates::QuizEngine;
use crate::domain::state::SessionStatus;

/// Read-only view of a quiz session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Lifecycle status.
    pub status: SessionStatus,
    /// Zero-based index of the current question.
    pub position: usize,
    /// Number of questions in play.
    pub total_questions: usize,
    /// Current score.
    pub score: u32,
    /// Correct answers so far.
    pub clues_found: u32,
    /// Highest reachable score.
    pub max_score: u32,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: i64,
    /// Elapsed time as `MM:SS`.
    pub elapsed_display: String,
    /// Progress bar fill, 0 to 100.
    pub progress_percent: u8,
    /// Fingerprint of the question set in play.
    pub question_set_fingerprint: String,
}

/// Builds a view of the engine as of `clock.now()`.
#[must_use]
pub fn get_session_view(engine: &QuizEngine, clock: &dyn Clock) -> SessionView {
    let state = engine.state();
    let elapsed = engine.elapsed_time(clock);
    SessionView {
        session_id: engine.id,
        status: state.status,
        position: state.position,
        total_questions: engine.questions().len(),
        score: state.score,
        clues_found: state.clues_found,
        max_score: engine.max_score(),
        elapsed_ms: elapsed.num_milliseconds(),
        elapsed_display: format_elapsed(elapsed),
        progress_percent: engine.progress().percent,
        question_set_fingerprint: engine.questions().fingerprint().to_owned(),
    }
}

/// Formats a duration as zero-padded `MM:SS`, truncating partial seconds.
///
/// Minutes are not wrapped into hours, so long sessions read `125:07`.
#[must_use]
pub fn format_elapsed(elapsed: TimeDelta) -> String {
    let total_seconds = elapsed.num_seconds().max(0);
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone, Utc};
    use uuid::Uuid;

    use crate::application::query_handlers::{format_elapsed, get_session_view};
    use crate::domain::aggregates::QuizEngine;
    use crate::domain::questions::QuestionSet;
    use crate::domain::state::SessionStatus;
    use cluequest_test_support::{FixedClock, ManualClock};

    #[test]
    fn test_format_elapsed_pads_minutes_and_seconds() {
        assert_eq!(format_elapsed(TimeDelta::zero()), "00:00");
        assert_eq!(format_elapsed(TimeDelta::milliseconds(999)), "00:00");
        assert_eq!(format_elapsed(TimeDelta::seconds(65)), "01:05");
        assert_eq!(format_elapsed(TimeDelta::seconds(7_527)), "125:27");
        assert_eq!(format_elapsed(TimeDelta::seconds(-3)), "00:00");
    }

    #[test]
    fn test_get_session_view_before_start() {
        // Arrange
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
        let engine = QuizEngine::new(Uuid::new_v4(), QuestionSet::builtin().unwrap());

        // Act
        let view = get_session_view(&engine, &clock);

        // Assert
        assert_eq!(view.session_id, engine.id);
        assert_eq!(view.status, SessionStatus::NotStarted);
        assert_eq!(view.total_questions, 5);
        assert_eq!(view.max_score, 500);
        assert_eq!(view.elapsed_display, "00:00");
        assert_eq!(view.progress_percent, 0);
    }

    #[test]
    fn test_get_session_view_reflects_progress_and_elapsed_time() {
        // Arrange
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
        let mut engine = QuizEngine::new(Uuid::new_v4(), QuestionSet::builtin().unwrap());
        engine.start(Uuid::new_v4(), &clock);
        engine.submit_answer("select", Uuid::new_v4(), &clock);
        clock.advance(TimeDelta::seconds(83));

        // Act
        let view = get_session_view(&engine, &clock);

        // Assert
        assert_eq!(view.status, SessionStatus::InProgress);
        assert_eq!(view.position, 1);
        assert_eq!(view.score, 100);
        assert_eq!(view.clues_found, 1);
        assert_eq!(view.elapsed_ms, 83_000);
        assert_eq!(view.elapsed_display, "01:23");
        assert_eq!(view.progress_percent, 40);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["status"], "in_progress");
    }
}
