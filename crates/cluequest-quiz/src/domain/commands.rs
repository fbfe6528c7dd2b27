//! Commands for the quiz context.

use cluequest_core::command::Command;
use uuid::Uuid;

/// Command to start the session timer and show the first question.
#[derive(Debug, Clone)]
pub struct StartSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for StartSession {
    fn command_type(&self) -> &'static str {
        "quiz.start_session"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to answer the current question.
#[derive(Debug, Clone)]
pub struct SubmitAnswer {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The answer exactly as the player typed it.
    pub answer: String,
}

impl Command for SubmitAnswer {
    fn command_type(&self) -> &'static str {
        "quiz.submit_answer"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to abandon the current playthrough and return to the start.
#[derive(Debug, Clone)]
pub struct RestartSession {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for RestartSession {
    fn command_type(&self) -> &'static str {
        "quiz.restart_session"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_types_are_namespaced_and_carry_correlation_id() {
        let correlation_id = Uuid::new_v4();
        let start = StartSession { correlation_id };
        let submit = SubmitAnswer {
            correlation_id,
            answer: "select".to_owned(),
        };
        let restart = RestartSession { correlation_id };

        assert_eq!(start.command_type(), "quiz.start_session");
        assert_eq!(submit.command_type(), "quiz.submit_answer");
        assert_eq!(restart.command_type(), "quiz.restart_session");
        assert_eq!(submit.correlation_id(), correlation_id);
    }
}
