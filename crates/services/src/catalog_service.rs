use std::sync::Arc;

use quiz_core::model::{Question, Quiz, QuizId};
use storage::repository::QuizRepository;
use storage::seed::{CatalogSeed, SeedReport};

use crate::error::CatalogError;

/// Read access to quizzes and their questions, plus catalog seeding.
#[derive(Clone)]
pub struct CatalogService {
    quizzes: Arc<dyn QuizRepository>,
}

impl CatalogService {
    #[must_use]
    pub fn new(quizzes: Arc<dyn QuizRepository>) -> Self {
        Self { quizzes }
    }

    /// Quizzes ordered by id. An empty catalog is not an error.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn list_quizzes(&self) -> Result<Vec<Quiz>, CatalogError> {
        Ok(self.quizzes.list_quizzes().await?)
    }

    /// Questions of a quiz in stable order. Unknown quizzes yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn get_questions(&self, quiz_id: QuizId) -> Result<Vec<Question>, CatalogError> {
        Ok(self.quizzes.questions_for_quiz(quiz_id).await?)
    }

    /// Validate a catalog and insert whatever is not already stored.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Load` for an invalid catalog (nothing is
    /// written) and `CatalogError::Storage` if the write fails.
    pub async fn seed(&self, catalog: &CatalogSeed) -> Result<SeedReport, CatalogError> {
        let validated = catalog.validate()?;
        let report = self.quizzes.seed_catalog(&validated).await?;
        tracing::info!(
            quizzes = report.quizzes_inserted,
            questions = report.questions_inserted,
            "seeded catalog"
        );
        Ok(report)
    }
}
