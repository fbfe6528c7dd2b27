//! Domain model for the quiz context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod questions;
pub mod state;
