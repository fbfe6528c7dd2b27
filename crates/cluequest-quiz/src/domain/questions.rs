//! Question records and validated question sets.

use cluequest_core::error::DomainError;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The question set shipped with the crate.
const BUILTIN_QUESTIONS: &str = include_str!("../../content/sql_mystery.yaml");

/// Separates hashed fields so that `("ab", "c")` and `("a", "bc")` differ.
const FIELD_SEPARATOR: [u8; 1] = [0x1f];

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Trims surrounding whitespace and case-folds to uppercase.
///
/// A leading or trailing byte-order mark counts as whitespace. Both the
/// player's input and the expected answer go through this before they are
/// compared.
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
        .to_uppercase()
}

/// A single question with the narrative attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Text shown to the player.
    pub prompt: String,
    /// Canonical answer.
    #[serde(rename = "answer")]
    pub expected_answer: String,
    /// Narrative shown right after a correct answer.
    #[serde(rename = "reveal", default)]
    pub reveal_on_correct: String,
    /// Narrative shown before the next question's prompt.
    #[serde(default)]
    pub lead_in: String,
}

impl Question {
    /// Creates a question from its four text fields.
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        expected_answer: impl Into<String>,
        reveal_on_correct: impl Into<String>,
        lead_in: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            expected_answer: expected_answer.into(),
            reveal_on_correct: reveal_on_correct.into(),
            lead_in: lead_in.into(),
        }
    }

    /// Returns true if an already-normalized guess equals the expected answer.
    #[must_use]
    pub fn is_answered_by(&self, normalized_guess: &str) -> bool {
        normalize_answer(&self.expected_answer) == normalized_guess
    }
}

/// On-disk shape of a question file.
#[derive(Debug, Deserialize)]
struct QuestionSetDocument {
    #[serde(default)]
    title: String,
    questions: Vec<Question>,
}

/// A non-empty, ordered, immutable list of questions.
///
/// Fields are private so that every instance has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionSet {
    title: String,
    questions: Vec<Question>,
    fingerprint: String,
}

impl QuestionSet {
    /// Validates and wraps a list of questions.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `questions` is empty or if any
    /// expected answer is blank, since such a question can never be answered.
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Result<Self, DomainError> {
        if questions.is_empty() {
            return Err(DomainError::Validation(
                "question set must contain at least one question".into(),
            ));
        }
        if let Some(index) = questions
            .iter()
            .position(|q| normalize_answer(&q.expected_answer).is_empty())
        {
            return Err(DomainError::Validation(format!(
                "question {} has a blank expected answer",
                index + 1
            )));
        }

        let title = title.into();
        let fingerprint = fingerprint_of(&title, &questions);
        Ok(Self {
            title,
            questions,
            fingerprint,
        })
    }

    /// Parses a YAML question file.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Content` if the document is malformed and
    /// `DomainError::Validation` if it parses but is unusable.
    pub fn from_yaml(source: &str) -> Result<Self, DomainError> {
        let document: QuestionSetDocument = serde_yaml::from_str(source)
            .map_err(|e| DomainError::Content(format!("question file is not valid: {e}")))?;
        Self::new(document.title, document.questions)
    }

    /// The question set bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` if the bundled file fails to load.
    pub fn builtin() -> Result<Self, DomainError> {
        Self::from_yaml(BUILTIN_QUESTIONS)
    }

    /// Display title of the set.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All questions in play order.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Number of questions. Never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a validated set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// SHA-256 hex digest of the title and every question field.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint_of(title: &str, questions: &[Question]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    for question in questions {
        for field in [
            &question.prompt,
            &question.expected_answer,
            &question.reveal_on_correct,
            &question.lead_in,
        ] {
            hasher.update(FIELD_SEPARATOR);
            hasher.update(field.as_bytes());
        }
    }
    format!("{:x}", hasher.finalize())
}
