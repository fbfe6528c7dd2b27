//! Application layer for the quiz context.

pub mod command_handlers;
pub mod query_handlers;
