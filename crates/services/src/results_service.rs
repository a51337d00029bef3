use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use quiz_core::model::Score;
use storage::repository::{ScoreRepository, StorageError};

use crate::account_service::UserSession;

pub const NO_ATTEMPTS: &str = "No quiz attempts found.";

/// One past attempt as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultEntry {
    pub quiz_name: String,
    pub score: Score,
    pub recorded_at: DateTime<Utc>,
}

impl fmt::Display for ResultEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quiz: {}, Score: {}", self.quiz_name, self.score)
    }
}

/// Reads back a user's score history.
#[derive(Clone)]
pub struct ResultsService {
    scores: Arc<dyn ScoreRepository>,
}

impl ResultsService {
    #[must_use]
    pub fn new(scores: Arc<dyn ScoreRepository>) -> Self {
        Self { scores }
    }

    /// All attempts of the session's user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if repository access fails.
    pub async fn get_results(&self, session: &UserSession) -> Result<Vec<ResultEntry>, StorageError> {
        let rows = self.scores.results_for_user(session.user_id()).await?;
        Ok(rows
            .into_iter()
            .map(|row| ResultEntry {
                quiz_name: row.quiz_name,
                score: row.score,
                recorded_at: row.recorded_at,
            })
            .collect())
    }
}

/// Render a results listing, or the "no attempts" notice.
#[must_use]
pub fn results_report(entries: &[ResultEntry]) -> String {
    if entries.is_empty() {
        return NO_ATTEMPTS.to_owned();
    }
    let mut out = String::from("\nYour Quiz Results:");
    for entry in entries {
        out.push('\n');
        out.push_str(&entry.to_string());
    }
    out
}
