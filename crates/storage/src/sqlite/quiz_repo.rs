use quiz_core::model::{Question, Quiz, QuizId};

use super::SqliteRepository;
use super::mapping::{db_err, encode_options, id_to_i64, map_question_row, map_quiz_row};
use crate::repository::{QuizRepository, StorageError};
use crate::seed::{SeedReport, ValidatedCatalog};

#[async_trait::async_trait]
impl QuizRepository for SqliteRepository {
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        let rows = sqlx::query("SELECT id, name FROM quizzes ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        rows.iter().map(map_quiz_row).collect()
    }

    async fn questions_for_quiz(&self, quiz_id: QuizId) -> Result<Vec<Question>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, quiz_id, question, options, answer
            FROM quiz_questions
            WHERE quiz_id = ?1
            ORDER BY id ASC
            ",
        )
        .bind(id_to_i64("quiz_id", quiz_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(map_question_row).collect()
    }

    async fn seed_catalog(&self, catalog: &ValidatedCatalog) -> Result<SeedReport, StorageError> {
        let mut report = SeedReport::default();
        let mut tx = self.pool.begin().await.map_err(db_err)?;

        for quiz in &catalog.quizzes {
            let existing: Option<i64> = sqlx::query_scalar(
                "SELECT id FROM quizzes WHERE name = ?1 ORDER BY id ASC LIMIT 1",
            )
            .bind(&quiz.name)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_err)?;

            let quiz_id = match existing {
                Some(id) => id,
                None => {
                    let res = sqlx::query("INSERT INTO quizzes (name) VALUES (?1)")
                        .bind(&quiz.name)
                        .execute(&mut *tx)
                        .await
                        .map_err(db_err)?;
                    report.quizzes_inserted += 1;
                    tracing::debug!(quiz = %quiz.name, "seeded quiz");
                    res.last_insert_rowid()
                }
            };

            for question in &quiz.questions {
                let present: Option<i64> = sqlx::query_scalar(
                    "SELECT 1 FROM quiz_questions WHERE quiz_id = ?1 AND question = ?2",
                )
                .bind(quiz_id)
                .bind(question.text())
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_err)?;
                if present.is_some() {
                    continue;
                }

                sqlx::query(
                    r"
                    INSERT INTO quiz_questions (quiz_id, question, options, answer)
                    VALUES (?1, ?2, ?3, ?4)
                    ",
                )
                .bind(quiz_id)
                .bind(question.text())
                .bind(encode_options(question.options())?)
                .bind(question.answer())
                .execute(&mut *tx)
                .await
                .map_err(db_err)?;
                report.questions_inserted += 1;
            }
        }

        tx.commit().await.map_err(db_err)?;
        Ok(report)
    }
}
