use thiserror::Error;

use crate::model::ids::{QuestionId, QuizId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question needs at least {min} options, got {count}")]
    TooFewOptions { min: usize, count: usize },

    #[error("answer {answer:?} is not one of the options")]
    AnswerNotAnOption { answer: String },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Validated question content that has not been assigned an id yet.
///
/// Guarantees at least two options and that `answer` equals one of them
/// exactly (case-sensitive, no trimming).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    text: String,
    options: Vec<String>,
    answer: String,
}

impl QuestionDraft {
    pub const MIN_OPTIONS: usize = 2;

    /// Validates question content.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::TooFewOptions` for fewer than two options.
    /// Returns `QuestionError::AnswerNotAnOption` if the answer is not an option.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let answer = answer.into();
        if options.len() < Self::MIN_OPTIONS {
            return Err(QuestionError::TooFewOptions {
                min: Self::MIN_OPTIONS,
                count: options.len(),
            });
        }
        if !options.iter().any(|option| *option == answer) {
            return Err(QuestionError::AnswerNotAnOption { answer });
        }
        Ok(Self {
            text: text.into(),
            options,
            answer,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question owned by a quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    quiz_id: QuizId,
    content: QuestionDraft,
}

impl Question {
    #[must_use]
    pub fn from_draft(id: QuestionId, quiz_id: QuizId, content: QuestionDraft) -> Self {
        Self {
            id,
            quiz_id,
            content,
        }
    }

    /// Rehydrate a question from storage, re-checking the content invariants.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the persisted content is invalid.
    pub fn from_persisted(
        id: QuestionId,
        quiz_id: QuizId,
        text: String,
        options: Vec<String>,
        answer: String,
    ) -> Result<Self, QuestionError> {
        let content = QuestionDraft::new(text, options, answer)?;
        Ok(Self::from_draft(id, quiz_id, content))
    }

    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.content.text()
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        self.content.options()
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        self.content.answer()
    }

    /// Returns the option at a zero-based position.
    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.content.options.get(index).map(String::as_str)
    }

    /// Exact string equality with the stored answer.
    #[must_use]
    pub fn is_correct(&self, selected: &str) -> bool {
        selected == self.content.answer
    }
}
