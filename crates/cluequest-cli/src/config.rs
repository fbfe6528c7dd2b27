//! Environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use cluequest_quiz::domain::questions::QuestionSet;

use crate::error::AppError;

/// Path to a YAML question file. Unset means the built-in set.
pub const QUESTIONS_VAR: &str = "CLUEQUEST_QUESTIONS";

/// Timer refresh period in milliseconds.
pub const TICK_MS_VAR: &str = "CLUEQUEST_TICK_MS";

const DEFAULT_TICK_MS: u64 = 1000;

/// Runtime configuration for the terminal front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Question file to load, if any.
    pub questions_path: Option<PathBuf>,
    /// How often the displayed timer is refreshed.
    pub tick: Duration,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let questions_path = lookup(QUESTIONS_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let tick_ms = match lookup(TICK_MS_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| AppError::Config(format!("{TICK_MS_VAR} must be a valid u64: {e}")))?,
            None => DEFAULT_TICK_MS,
        };
        if tick_ms == 0 {
            return Err(AppError::Config(format!(
                "{TICK_MS_VAR} must be greater than zero"
            )));
        }

        Ok(Self {
            questions_path,
            tick: Duration::from_millis(tick_ms),
        })
    }

    /// Loads the configured question set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Io` if the file cannot be read and
    /// `AppError::Domain` if its content is invalid.
    pub fn load_questions(&self) -> Result<QuestionSet, AppError> {
        match &self.questions_path {
            Some(path) => {
                let source = std::fs::read_to_string(path)?;
                Ok(QuestionSet::from_yaml(&source)?)
            }
            None => Ok(QuestionSet::builtin()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.questions_path, None);
        assert_eq!(config.tick, Duration::from_millis(1000));
    }

    #[test]
    fn test_reads_questions_path_and_tick() {
        let config = Config::from_lookup(lookup_from(&[
            (QUESTIONS_VAR, "/tmp/questions.yaml"),
            (TICK_MS_VAR, " 250 "),
        ]))
        .unwrap();

        assert_eq!(
            config.questions_path,
            Some(PathBuf::from("/tmp/questions.yaml"))
        );
        assert_eq!(config.tick, Duration::from_millis(250));
    }

    #[test]
    fn test_rejects_unparseable_tick() {
        let result = Config::from_lookup(lookup_from(&[(TICK_MS_VAR, "fast")]));

        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains(TICK_MS_VAR)),
            other => panic!("expected Config, got {other:?}"),
        }
    }

    #[test]
    fn test_rejects_zero_tick() {
        let result = Config::from_lookup(lookup_from(&[(TICK_MS_VAR, "0")]));

        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn test_load_questions_defaults_to_builtin_set() {
        let config = Config::from_lookup(lookup_from(&[(QUESTIONS_VAR, "  ")])).unwrap();

        let questions = config.load_questions().unwrap();

        assert_eq!(questions.len(), 5);
    }

    #[test]
    fn test_load_questions_reports_missing_file() {
        let config = Config::from_lookup(lookup_from(&[(
            QUESTIONS_VAR,
            "/nonexistent/cluequest/questions.yaml",
        )]))
        .unwrap();

        assert!(matches!(config.load_questions(), Err(AppError::Io(_))));
    }
}
