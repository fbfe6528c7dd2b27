//! Player requests.

use uuid::Uuid;

/// A request sent to the engine through a handler.
///
/// Handlers decide what a command means for the current session state; a
/// command that does not apply is a no-op, not an error.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Namespaced command name, e.g. `quiz.submit_answer`. Recorded on the
    /// handler's tracing span.
    fn command_type(&self) -> &'static str;

    /// Id copied onto every event the command raises.
    fn correlation_id(&self) -> Uuid;
}
