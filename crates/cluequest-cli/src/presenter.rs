//! Plain-text rendering of quiz events.

use std::io::Write;
use std::sync::{Mutex, PoisonError};

use chrono::TimeDelta;
use cluequest_core::error::DomainError;
use cluequest_core::publisher::EventPublisher;
use cluequest_quiz::application::query_handlers::{SessionView, format_elapsed};
use cluequest_quiz::domain::events::{QuizEvent, QuizEventKind};
use cluequest_quiz::domain::state::SessionStatus;

/// Writes one line per notification to a terminal-like writer.
///
/// Also holds the last timer value pushed by the refresh tick, which the
/// prompt shows. It may lag behind the real elapsed time between ticks.
#[derive(Debug)]
pub struct TerminalPresenter<W> {
    title: String,
    out: Mutex<W>,
    timer: Mutex<String>,
}

impl<W: Write + Send> TerminalPresenter<W> {
    /// Create a presenter writing to `out`.
    #[must_use]
    pub fn new(out: W, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            out: Mutex::new(out),
            timer: Mutex::new(format_elapsed(TimeDelta::zero())),
        }
    }

    /// Returns the underlying writer.
    pub fn into_writer(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores the timer value shown by the next prompt.
    pub fn refresh_timer(&self, elapsed: TimeDelta) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        *timer = format_elapsed(elapsed);
    }

    /// Prints the intro screen.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if writing fails.
    pub fn render_intro(&self, total_questions: usize) -> Result<(), DomainError> {
        let title = if self.title.is_empty() {
            "Clue Quest"
        } else {
            self.title.as_str()
        };
        self.write_lines(&[
            format!("=== {title} ==="),
            format!("{total_questions} clues stand between you and the truth."),
            "Press Enter to begin. Commands: /status /restart /quit".to_owned(),
        ])
    }

    /// Prints the input prompt for the given status.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if writing fails.
    pub fn render_prompt(&self, status: SessionStatus) -> Result<(), DomainError> {
        let line = match status {
            SessionStatus::InProgress => {
                let timer = self
                    .timer
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .clone();
                format!("[{timer}] > ")
            }
            SessionStatus::NotStarted | SessionStatus::Complete => "> ".to_owned(),
        };
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        write!(out, "{line}")
            .and_then(|()| out.flush())
            .map_err(write_failed)
    }

    /// Prints a one-line scoreboard.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if writing fails.
    pub fn render_status(&self, view: &SessionView) -> Result<(), DomainError> {
        let status = match view.status {
            SessionStatus::NotStarted => "not started",
            SessionStatus::InProgress => "in progress",
            SessionStatus::Complete => "complete",
        };
        self.write_lines(&[format!(
            "Status: {status} | Score: {}/{} | Clues: {} | Progress: {}% | Time: {}",
            view.score, view.max_score, view.clues_found, view.progress_percent, view.elapsed_display
        )])
    }

    fn render_event(event: &QuizEvent) -> Vec<String> {
        match &event.kind {
            QuizEventKind::SessionStarted(payload) => vec![format!(
                "Investigation opened. {} questions to crack.",
                payload.total_questions
            )],
            QuizEventKind::QuestionShown(payload) => {
                let mut lines = Vec::with_capacity(2);
                if let Some(lead_in) = payload.lead_in.as_deref().filter(|s| !s.is_empty()) {
                    lines.push(format!("  >> {lead_in}"));
                }
                lines.push(format!(
                    "Question {} of {}: {}",
                    payload.index + 1,
                    payload.total_questions,
                    payload.prompt
                ));
                lines
            }
            QuizEventKind::AnswerAccepted(payload) => vec![
                format!("Correct! {}", payload.reveal_text).trim_end().to_owned(),
                format!(
                    "Score: {} | Clues found: {}",
                    payload.score, payload.clues_found
                ),
            ],
            QuizEventKind::AnswerRejected(_) => vec!["Incorrect. Try again.".to_owned()],
            QuizEventKind::ValidationFailed(payload) => vec![payload.message.clone()],
            QuizEventKind::SessionCompleted(payload) => vec![
                "Case closed!".to_owned(),
                format!(
                    "Final score: {} | Time: {}",
                    payload.final_score,
                    format_elapsed(TimeDelta::milliseconds(payload.elapsed_ms))
                ),
                "Type /restart to play again or /quit to leave.".to_owned(),
            ],
            QuizEventKind::SessionReset(_) => {
                vec!["Session reset. Press Enter to begin again.".to_owned()]
            }
        }
    }

    fn write_lines(&self, lines: &[String]) -> Result<(), DomainError> {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        for line in lines {
            writeln!(out, "{line}").map_err(write_failed)?;
        }
        out.flush().map_err(write_failed)
    }
}

impl<W: Write + Send> EventPublisher<QuizEvent> for TerminalPresenter<W> {
    fn publish(&self, events: &[QuizEvent]) -> Result<(), DomainError> {
        let lines: Vec<String> = events.iter().flat_map(Self::render_event).collect();
        self.write_lines(&lines)
    }
}

fn write_failed(e: std::io::Error) -> DomainError {
    DomainError::Infrastructure(format!("terminal write failed: {e}"))
}
