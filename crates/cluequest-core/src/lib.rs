//! Clue Quest Core — shared domain abstractions.
//!
//! This crate defines the traits and types the quiz context and its
//! presentation layers depend on. It contains no presentation code.

pub mod aggregate;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod publisher;
