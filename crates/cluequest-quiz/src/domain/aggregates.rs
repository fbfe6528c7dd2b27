//! Aggregate roots for the quiz context.

use chrono::{DateTime, TimeDelta, Utc};
use cluequest_core::aggregate::AggregateRoot;
use cluequest_core::clock::Clock;
use cluequest_core::event::EventMetadata;
use serde::Serialize;
use uuid::Uuid;

use super::events::{
    AnswerAccepted, AnswerRejected, QuestionShown, QuizEvent, QuizEventKind, SessionCompleted,
    SessionReset, SessionStarted, ValidationFailed,
};
use super::questions::{Question, QuestionSet, normalize_answer};
use super::state::{SCORE_PER_CLUE, SessionState, SessionStatus};

/// Message sent to the player when an answer is blank.
pub const EMPTY_ANSWER_MESSAGE: &str = "Please enter an answer!";

/// Result of submitting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// The answer matched and the session advanced.
    Correct,
    /// The answer did not match; nothing changed.
    Incorrect,
    /// The answer was blank; nothing changed.
    ValidationFailed,
    /// No session in progress; the call was a no-op.
    Ignored,
}

/// Result of a start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StartOutcome {
    /// The session moved to `InProgress`.
    Started,
    /// The session had already been started; the call was a no-op.
    AlreadyStarted,
}

/// Progress through the question list, as shown on a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// One-based number of the question on screen (0 before start).
    pub current: usize,
    /// Number of questions.
    pub total: usize,
    /// `current / total` as a whole percentage.
    pub percent: u8,
}

/// The aggregate root for one quiz playthrough.
///
/// Every state change goes through [`AggregateRoot::apply`]; operations only
/// decide which events to raise.
#[derive(Debug)]
pub struct QuizEngine {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Current version (event count).
    pub(crate) version: i64,
    questions: QuestionSet,
    state: SessionState,
    /// Uncommitted events pending publication.
    uncommitted_events: Vec<QuizEvent>,
}

impl QuizEngine {
    /// Creates an engine in the `NotStarted` state.
    #[must_use]
    pub fn new(id: Uuid, questions: QuestionSet) -> Self {
        Self {
            id,
            version: 0,
            questions,
            state: SessionState::default(),
            uncommitted_events: Vec::new(),
        }
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The question set in play.
    #[must_use]
    pub fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    /// The question awaiting an answer, if a session is in progress.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.state.status {
            SessionStatus::InProgress => self.questions.get(self.state.position),
            _ => None,
        }
    }

    /// Highest reachable score for this question set.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        u32::try_from(self.questions.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(SCORE_PER_CLUE)
    }

    /// Position on the progress bar.
    #[must_use]
    pub fn progress(&self) -> Progress {
        let total = self.questions.len();
        let current = match self.state.status {
            SessionStatus::NotStarted => 0,
            SessionStatus::InProgress => self.state.position + 1,
            SessionStatus::Complete => total,
        };
        let percent = u8::try_from(current * 100 / total).unwrap_or(100);
        Progress {
            current,
            total,
            percent,
        }
    }

    /// Time since start; frozen once complete and zero before start.
    #[must_use]
    pub fn elapsed_time(&self, clock: &dyn Clock) -> TimeDelta {
        self.state.elapsed_at(clock.now())
    }

    /// Starts the session and shows the first question.
    ///
    /// Does nothing unless the session is `NotStarted`.
    pub fn start(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> StartOutcome {
        if self.state.status != SessionStatus::NotStarted {
            return StartOutcome::AlreadyStarted;
        }

        let now = clock.now();
        self.raise(
            QuizEventKind::SessionStarted(SessionStarted {
                session_id: self.id,
                started_at: now,
                total_questions: self.questions.len(),
                question_set_fingerprint: self.questions.fingerprint().to_owned(),
            }),
            correlation_id,
            now,
        );
        self.show_question(0, None, correlation_id, now);
        StartOutcome::Started
    }

    /// Answers the current question.
    ///
    /// Raises exactly one of `ValidationFailed`, `AnswerAccepted` or
    /// `AnswerRejected` while a session is in progress, followed by either
    /// `QuestionShown` or `SessionCompleted` after a correct answer.
    pub fn submit_answer(
        &mut self,
        raw: &str,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> AnswerOutcome {
        let Some(question) = self.current_question() else {
            return AnswerOutcome::Ignored;
        };

        let guess = normalize_answer(raw);
        let now = clock.now();

        if guess.is_empty() {
            self.raise(
                QuizEventKind::ValidationFailed(ValidationFailed {
                    message: EMPTY_ANSWER_MESSAGE.to_owned(),
                }),
                correlation_id,
                now,
            );
            return AnswerOutcome::ValidationFailed;
        }

        let index = self.state.position;
        if !question.is_answered_by(&guess) {
            self.raise(
                QuizEventKind::AnswerRejected(AnswerRejected { index }),
                correlation_id,
                now,
            );
            return AnswerOutcome::Incorrect;
        }

        let reveal_text = question.reveal_on_correct.clone();
        let lead_in = question.lead_in.clone();
        self.raise(
            QuizEventKind::AnswerAccepted(AnswerAccepted {
                index,
                reveal_text,
                score: self.state.score + SCORE_PER_CLUE,
                clues_found: self.state.clues_found + 1,
            }),
            correlation_id,
            now,
        );

        if self.state.position == self.questions.len() {
            self.raise(
                QuizEventKind::SessionCompleted(SessionCompleted {
                    final_score: self.state.score,
                    clues_found: self.state.clues_found,
                    elapsed_ms: self.state.elapsed_at(now).num_milliseconds(),
                }),
                correlation_id,
                now,
            );
        } else {
            self.show_question(self.state.position, Some(lead_in), correlation_id, now);
        }
        AnswerOutcome::Correct
    }

    /// Abandons whatever is in progress and returns to `NotStarted`.
    pub fn restart(&mut self, correlation_id: Uuid, clock: &dyn Clock) {
        self.raise(
            QuizEventKind::SessionReset(SessionReset {
                session_id: self.id,
            }),
            correlation_id,
            clock.now(),
        );
    }

    fn show_question(
        &mut self,
        index: usize,
        lead_in: Option<String>,
        correlation_id: Uuid,
        now: DateTime<Utc>,
    ) {
        let Some(question) = self.questions.get(index) else {
            return;
        };
        let prompt = question.prompt.clone();
        self.raise(
            QuizEventKind::QuestionShown(QuestionShown {
                index,
                total_questions: self.questions.len(),
                prompt,
                lead_in,
            }),
            correlation_id,
            now,
        );
    }

    /// Returns the next sequence number for a new event.
    fn next_sequence_number(&self) -> i64 {
        self.version + 1
    }

    fn raise(&mut self, kind: QuizEventKind, correlation_id: Uuid, now: DateTime<Utc>) {
        let event = QuizEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: self.id,
                sequence_number: self.next_sequence_number(),
                correlation_id,
                causation_id: correlation_id,
                occurred_at: now,
            },
            kind,
        };
        self.apply(&event);
        self.uncommitted_events.push(event);
    }
}

impl AggregateRoot for QuizEngine {
    type Event = QuizEvent;

    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match &event.kind {
            QuizEventKind::SessionStarted(payload) => {
                self.state = SessionState {
                    started_at: Some(payload.started_at),
                    status: SessionStatus::InProgress,
                    ..SessionState::default()
                };
            }
            QuizEventKind::AnswerAccepted(payload) => {
                self.state.position = payload.index + 1;
                self.state.score = payload.score;
                self.state.clues_found = payload.clues_found;
            }
            QuizEventKind::SessionCompleted(payload) => {
                self.state.status = SessionStatus::Complete;
                self.state.frozen_elapsed = Some(TimeDelta::milliseconds(payload.elapsed_ms));
            }
            QuizEventKind::SessionReset(_) => {
                self.state = SessionState::default();
            }
            QuizEventKind::QuestionShown(_)
            | QuizEventKind::AnswerRejected(_)
            | QuizEventKind::ValidationFailed(_) => {}
        }
        self.version += 1;
    }

    fn uncommitted_events(&self) -> &[Self::Event] {
        &self.uncommitted_events
    }

    fn take_uncommitted_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.uncommitted_events)
    }
}
