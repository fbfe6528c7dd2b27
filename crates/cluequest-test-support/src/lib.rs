//! Shared test mocks and utilities for the Clue Quest quiz engine.

mod clock;
mod publisher;

pub use clock::{FixedClock, ManualClock};
pub use publisher::{FailingPublisher, NullPublisher, RecordingPublisher};
