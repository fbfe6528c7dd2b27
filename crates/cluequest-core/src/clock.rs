//! Time source for session timing.
//!
//! The engine reads the clock only through [`Clock`], so tests can pin or
//! step time.

use chrono::{DateTime, Utc};

/// Supplies the instants used for session start, completion and event stamps.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Reads `Utc::now()`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
