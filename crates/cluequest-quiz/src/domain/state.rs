//! Per-playthrough session state.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Points awarded for each correct answer.
pub const SCORE_PER_CLUE: u32 = 100;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Created or reset, waiting for `start`.
    #[default]
    NotStarted,
    /// Questions are being answered.
    InProgress,
    /// Every question has been answered.
    Complete,
}

/// Mutable state of one playthrough. Only the engine writes to it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    /// Index of the current question; equals the question count once complete.
    pub position: usize,
    /// Always `SCORE_PER_CLUE * clues_found`.
    pub score: u32,
    /// Number of correct answers given.
    pub clues_found: u32,
    /// Set once by `start`.
    pub started_at: Option<DateTime<Utc>>,
    /// Elapsed time captured at completion.
    pub frozen_elapsed: Option<TimeDelta>,
    /// Lifecycle status.
    pub status: SessionStatus,
}

impl SessionState {
    /// Time since `started_at`, frozen on completion and zero before start.
    #[must_use]
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> TimeDelta {
        match (self.status, self.started_at) {
            (SessionStatus::Complete, _) => self.frozen_elapsed.unwrap_or_default(),
            (SessionStatus::InProgress, Some(started_at)) => {
                (now - started_at).max(TimeDelta::zero())
            }
            _ => TimeDelta::zero(),
        }
    }
}
