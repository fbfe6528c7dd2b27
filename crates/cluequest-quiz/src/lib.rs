//! Clue Quest — quiz progression bounded context.
//!
//! Responsible for question sequencing, scoring, session timing and
//! completion. Presentation is left to whoever subscribes to the events.

pub mod application;
pub mod domain;
