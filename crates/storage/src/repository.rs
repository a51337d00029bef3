use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::model::{
    Credentials, Question, QuestionId, Quiz, QuizId, Score, ScoreRecord, ScoreRecordId, User,
    UserId,
};
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::seed::{SeedReport, ValidatedCatalog};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Score data for an attempt that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScoreRecord {
    pub user_id: UserId,
    pub quiz_id: QuizId,
    pub score: Score,
    pub recorded_at: DateTime<Utc>,
}

/// One line of a user's history: a score joined with its quiz name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub id: ScoreRecordId,
    pub quiz_name: String,
    pub score: Score,
    pub recorded_at: DateTime<Utc>,
}

/// Repository contract for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user with already-normalized credentials.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the username is taken.
    async fn insert_user(&self, credentials: &Credentials) -> Result<UserId, StorageError>;

    /// Find the user whose username and password both match exactly.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure; a miss is `Ok(None)`.
    async fn find_by_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<User>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn count_users(&self) -> Result<u64, StorageError>;
}

/// Repository contract for the quiz catalog.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// All quizzes ordered by id ascending.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError>;

    /// Questions of a quiz ordered by id ascending. Unknown quizzes yield an
    /// empty list.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if a stored row breaks question
    /// invariants, or other backend errors.
    async fn questions_for_quiz(&self, quiz_id: QuizId) -> Result<Vec<Question>, StorageError>;

    /// Insert quizzes and questions not already present.
    ///
    /// Quizzes are matched by name, questions by `(quiz, text)`, so running
    /// the same catalog twice writes nothing the second time.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any write fails; nothing is kept in that case.
    async fn seed_catalog(&self, catalog: &ValidatedCatalog) -> Result<SeedReport, StorageError>;
}

/// Repository contract for append-only score history.
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user or quiz does not exist.
    async fn append_score(&self, record: &NewScoreRecord) -> Result<ScoreRecordId, StorageError>;

    /// Scores joined with quiz names, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failure.
    async fn results_for_user(&self, user_id: UserId) -> Result<Vec<ResultRow>, StorageError>;
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    quizzes: Vec<Quiz>,
    questions: Vec<Question>,
    scores: Vec<ScoreRecord>,
    next_id: u64,
}

impl MemoryState {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Ids come from one shared counter, so they are unique and ascending in
/// insertion order across all tables.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn insert_user(&self, credentials: &Credentials) -> Result<UserId, StorageError> {
        let mut guard = self.lock()?;
        if guard
            .users
            .iter()
            .any(|u| u.username() == credentials.username())
        {
            return Err(StorageError::Conflict);
        }
        let id = UserId::new(guard.next_id());
        guard.users.push(User::new(id, credentials.clone()));
        Ok(id)
    }

    async fn find_by_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<User>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.users.iter().find(|u| u.matches(credentials)).cloned())
    }

    async fn count_users(&self) -> Result<u64, StorageError> {
        let guard = self.lock()?;
        u64::try_from(guard.users.len())
            .map_err(|_| StorageError::Serialization("user count overflow".into()))
    }
}

#[async_trait]
impl QuizRepository for InMemoryRepository {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.quizzes.clone())
    }

    async fn questions_for_quiz(&self, quiz_id: QuizId) -> Result<Vec<Question>, StorageError> {
        let guard = self.lock()?;
        Ok(guard
            .questions
            .iter()
            .filter(|q| q.quiz_id() == quiz_id)
            .cloned()
            .collect())
    }

    async fn seed_catalog(&self, catalog: &ValidatedCatalog) -> Result<SeedReport, StorageError> {
        let mut guard = self.lock()?;
        let mut report = SeedReport::default();

        for seed in &catalog.quizzes {
            let existing = guard
                .quizzes
                .iter()
                .find(|q| q.name() == seed.name)
                .map(Quiz::id);
            let quiz_id = match existing {
                Some(id) => id,
                None => {
                    let id = QuizId::new(guard.next_id());
                    let quiz = Quiz::new(id, seed.name.clone())
                        .map_err(|e| StorageError::Serialization(e.to_string()))?;
                    guard.quizzes.push(quiz);
                    report.quizzes_inserted += 1;
                    id
                }
            };

            for draft in &seed.questions {
                let present = guard
                    .questions
                    .iter()
                    .any(|q| q.quiz_id() == quiz_id && q.text() == draft.text());
                if present {
                    continue;
                }
                let id = QuestionId::new(guard.next_id());
                guard
                    .questions
                    .push(Question::from_draft(id, quiz_id, draft.clone()));
                report.questions_inserted += 1;
            }
        }

        Ok(report)
    }
}

#[async_trait]
impl ScoreRepository for InMemoryRepository {
    async fn append_score(&self, record: &NewScoreRecord) -> Result<ScoreRecordId, StorageError> {
        let mut guard = self.lock()?;
        let user_known = guard.users.iter().any(|u| u.id() == record.user_id);
        let quiz_known = guard.quizzes.iter().any(|q| q.id() == record.quiz_id);
        if !user_known || !quiz_known {
            return Err(StorageError::NotFound);
        }
        let id = ScoreRecordId::new(guard.next_id());
        guard.scores.push(ScoreRecord::new(
            id,
            record.user_id,
            record.quiz_id,
            record.score,
            record.recorded_at,
        ));
        Ok(id)
    }

    async fn results_for_user(&self, user_id: UserId) -> Result<Vec<ResultRow>, StorageError> {
        let guard = self.lock()?;
        let mut rows = Vec::new();
        for record in guard.scores.iter().filter(|s| s.user_id() == user_id) {
            let quiz = guard
                .quizzes
                .iter()
                .find(|q| q.id() == record.quiz_id())
                .ok_or(StorageError::NotFound)?;
            rows.push(ResultRow {
                id: record.id(),
                quiz_name: quiz.name().to_owned(),
                score: record.score(),
                recorded_at: record.recorded_at(),
            });
        }
        Ok(rows)
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub quizzes: Arc<dyn QuizRepository>,
    pub scores: Arc<dyn ScoreRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let users: Arc<dyn UserRepository> = Arc::new(repo.clone());
        let quizzes: Arc<dyn QuizRepository> = Arc::new(repo.clone());
        let scores: Arc<dyn ScoreRepository> = Arc::new(repo);
        Self {
            users,
            quizzes,
            scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::CatalogSeed;
    use quiz_core::time::fixed_now;

    async fn seeded() -> InMemoryRepository {
        let repo = InMemoryRepository::new();
        let catalog = CatalogSeed::builtin().validate().unwrap();
        repo.seed_catalog(&catalog).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn duplicate_username_conflicts() {
        let repo = InMemoryRepository::new();
        repo.insert_user(&Credentials::normalize("Alice", "pw"))
            .await
            .unwrap();
        let err = repo
            .insert_user(&Credentials::normalize(" alice ", "other"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
        assert_eq!(repo.count_users().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn seeding_twice_writes_nothing_new() {
        let repo = seeded().await;
        let catalog = CatalogSeed::builtin().validate().unwrap();
        let second = repo.seed_catalog(&catalog).await.unwrap();
        assert_eq!(second, SeedReport::default());

        let quizzes = repo.list_quizzes().await.unwrap();
        assert_eq!(quizzes.len(), 3);
        for quiz in &quizzes {
            assert_eq!(repo.questions_for_quiz(quiz.id()).await.unwrap().len(), 3);
        }
    }

    #[tokio::test]
    async fn score_requires_known_user_and_quiz() {
        let repo = seeded().await;
        let quiz = repo.list_quizzes().await.unwrap()[0].clone();
        let record = NewScoreRecord {
            user_id: UserId::new(999),
            quiz_id: quiz.id(),
            score: Score::new(1, 3).unwrap(),
            recorded_at: fixed_now(),
        };
        assert!(matches!(
            repo.append_score(&record).await,
            Err(StorageError::NotFound)
        ));
    }

    #[tokio::test]
    async fn results_join_quiz_names_in_insertion_order() {
        let repo = seeded().await;
        let user = repo
            .insert_user(&Credentials::normalize("bob", "pw"))
            .await
            .unwrap();
        let quizzes = repo.list_quizzes().await.unwrap();
        for (quiz, correct) in [(&quizzes[2], 2), (&quizzes[0], 3)] {
            repo.append_score(&NewScoreRecord {
                user_id: user,
                quiz_id: quiz.id(),
                score: Score::new(correct, 3).unwrap(),
                recorded_at: fixed_now(),
            })
            .await
            .unwrap();
        }

        let rows = repo.results_for_user(user).await.unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.quiz_name.as_str()).collect();
        assert_eq!(names, ["DSA", "Python"]);
        assert_eq!(rows[0].score.correct(), 2);
        assert!(repo.results_for_user(UserId::new(12345)).await.unwrap().is_empty());
    }
}
