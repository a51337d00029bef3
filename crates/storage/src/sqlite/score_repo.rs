use quiz_core::model::{ScoreRecordId, UserId};

use super::SqliteRepository;
use super::mapping::{db_err, id_to_i64, map_result_row, score_id_from_i64};
use crate::repository::{NewScoreRecord, ResultRow, ScoreRepository, StorageError};

#[async_trait::async_trait]
impl ScoreRepository for SqliteRepository {
    async fn append_score(&self, record: &NewScoreRecord) -> Result<ScoreRecordId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO user_scores (user_id, quiz_id, score, total_questions, recorded_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(id_to_i64("user_id", record.user_id.value())?)
        .bind(id_to_i64("quiz_id", record.quiz_id.value())?)
        .bind(i64::from(record.score.correct()))
        .bind(i64::from(record.score.total()))
        .bind(record.recorded_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        score_id_from_i64(res.last_insert_rowid())
    }

    async fn results_for_user(&self, user_id: UserId) -> Result<Vec<ResultRow>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT
                user_scores.id AS id,
                user_scores.user_id AS user_id,
                user_scores.quiz_id AS quiz_id,
                user_scores.score AS score,
                user_scores.total_questions AS total_questions,
                user_scores.recorded_at AS recorded_at,
                quizzes.name AS quiz_name
            FROM user_scores
            JOIN quizzes ON user_scores.quiz_id = quizzes.id
            WHERE user_scores.user_id = ?1
            ORDER BY user_scores.id ASC
            ",
        )
        .bind(id_to_i64("user_id", user_id.value())?)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.iter().map(map_result_row).collect()
    }
}
