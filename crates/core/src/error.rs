use thiserror::Error;

use crate::attempt::AttemptError;
use crate::model::{QuestionError, QuizError, ScoreError};

/// Umbrella for every domain validation failure in this crate.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
}
