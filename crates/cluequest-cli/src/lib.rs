//! Clue Quest terminal front end.
//!
//! Renders quiz events as plain text and feeds stdin lines back into the
//! engine's command handlers.

pub mod config;
pub mod error;
pub mod presenter;
pub mod terminal;
