use thiserror::Error;

use crate::model::ids::QuizId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz name cannot be empty")]
    EmptyName,
}

/// A named group of questions. Names are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: QuizId,
    name: String,
}

impl Quiz {
    /// Creates a quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyName` if the name is blank.
    pub fn new(id: QuizId, name: impl Into<String>) -> Result<Self, QuizError> {
        let name = name.into();
        Self::check_name(&name)?;
        Ok(Self { id, name })
    }

    /// Validates a quiz name before an id exists for it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptyName` if the name is blank.
    pub fn check_name(name: &str) -> Result<(), QuizError> {
        if name.trim().is_empty() {
            return Err(QuizError::EmptyName);
        }
        Ok(())
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
