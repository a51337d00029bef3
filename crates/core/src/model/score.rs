use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::ids::{QuizId, ScoreRecordId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("score {correct} exceeds question count {total}")]
    ExceedsTotal { correct: u32, total: u32 },

    #[error("too many questions for a single attempt: {len}")]
    TooManyQuestions { len: usize },
}

/// Final result of one attempt: correct answers out of questions asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    correct: u32,
    total: u32,
}

impl Score {
    /// # Errors
    ///
    /// Returns `ScoreError::ExceedsTotal` if `correct > total`.
    pub fn new(correct: u32, total: u32) -> Result<Self, ScoreError> {
        if correct > total {
            return Err(ScoreError::ExceedsTotal { correct, total });
        }
        Ok(Self { correct, total })
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

/// Immutable historical fact: user U scored S on quiz Q.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    id: ScoreRecordId,
    user_id: UserId,
    quiz_id: QuizId,
    score: Score,
    recorded_at: DateTime<Utc>,
}

impl ScoreRecord {
    #[must_use]
    pub fn new(
        id: ScoreRecordId,
        user_id: UserId,
        quiz_id: QuizId,
        score: Score,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            quiz_id,
            score,
            recorded_at,
        }
    }

    /// Rehydrate a record from storage.
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::ExceedsTotal` if the stored score is out of range.
    pub fn from_persisted(
        id: ScoreRecordId,
        user_id: UserId,
        quiz_id: QuizId,
        correct: u32,
        total: u32,
        recorded_at: DateTime<Utc>,
    ) -> Result<Self, ScoreError> {
        let score = Score::new(correct, total)?;
        Ok(Self::new(id, user_id, quiz_id, score, recorded_at))
    }

    #[must_use]
    pub fn id(&self) -> ScoreRecordId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn quiz_id(&self) -> QuizId {
        self.quiz_id
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.score
    }

    #[must_use]
    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
