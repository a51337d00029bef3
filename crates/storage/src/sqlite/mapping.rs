use quiz_core::model::{
    Credentials, Question, QuestionId, Quiz, QuizId, ScoreRecord, ScoreRecordId, User, UserId,
};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::{ResultRow, StorageError};

/// Options are stored as one comma-joined column.
pub(crate) const OPTION_DELIMITER: char = ',';

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Maps driver errors, surfacing constraint violations as domain-level
/// storage errors.
pub(crate) fn db_err(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => StorageError::NotFound,
        _ => StorageError::Connection(e.to_string()),
    }
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn id_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn user_id_from_i64(v: i64) -> Result<UserId, StorageError> {
    Ok(UserId::new(i64_to_u64("user_id", v)?))
}

pub(crate) fn quiz_id_from_i64(v: i64) -> Result<QuizId, StorageError> {
    Ok(QuizId::new(i64_to_u64("quiz_id", v)?))
}

pub(crate) fn question_id_from_i64(v: i64) -> Result<QuestionId, StorageError> {
    Ok(QuestionId::new(i64_to_u64("question_id", v)?))
}

pub(crate) fn score_id_from_i64(v: i64) -> Result<ScoreRecordId, StorageError> {
    Ok(ScoreRecordId::new(i64_to_u64("score_id", v)?))
}

/// Joins options for the `options` column.
///
/// An option containing the delimiter would split differently on read, so it
/// is refused instead of silently corrupting the question.
pub(crate) fn encode_options(options: &[String]) -> Result<String, StorageError> {
    if let Some(bad) = options.iter().find(|o| o.contains(OPTION_DELIMITER)) {
        return Err(StorageError::Serialization(format!(
            "option {bad:?} contains the delimiter {OPTION_DELIMITER:?}"
        )));
    }
    Ok(options.join(&OPTION_DELIMITER.to_string()))
}

/// Splits the `options` column back into an ordered list. No trimming.
pub(crate) fn decode_options(raw: &str) -> Vec<String> {
    raw.split(OPTION_DELIMITER).map(str::to_owned).collect()
}

pub(crate) fn map_user_row(row: &SqliteRow) -> Result<User, StorageError> {
    let id = user_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
    let username: String = row.try_get("username").map_err(ser)?;
    let password: String = row.try_get("password").map_err(ser)?;
    Ok(User::new(id, Credentials::normalize(&username, &password)))
}

pub(crate) fn map_quiz_row(row: &SqliteRow) -> Result<Quiz, StorageError> {
    Quiz::new(
        quiz_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        row.try_get::<String, _>("name").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_question_row(row: &SqliteRow) -> Result<Question, StorageError> {
    let options: String = row.try_get("options").map_err(ser)?;
    Question::from_persisted(
        question_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        quiz_id_from_i64(row.try_get::<i64, _>("quiz_id").map_err(ser)?)?,
        row.try_get::<String, _>("question").map_err(ser)?,
        decode_options(&options),
        row.try_get::<String, _>("answer").map_err(ser)?,
    )
    .map_err(ser)
}

fn map_score_row(row: &SqliteRow) -> Result<ScoreRecord, StorageError> {
    ScoreRecord::from_persisted(
        score_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?,
        user_id_from_i64(row.try_get::<i64, _>("user_id").map_err(ser)?)?,
        quiz_id_from_i64(row.try_get::<i64, _>("quiz_id").map_err(ser)?)?,
        u32_from_i64("score", row.try_get::<i64, _>("score").map_err(ser)?)?,
        u32_from_i64(
            "total_questions",
            row.try_get::<i64, _>("total_questions").map_err(ser)?,
        )?,
        row.try_get("recorded_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_result_row(row: &SqliteRow) -> Result<ResultRow, StorageError> {
    let record = map_score_row(row)?;
    Ok(ResultRow {
        id: record.id(),
        quiz_name: row.try_get("quiz_name").map_err(ser)?,
        score: record.score(),
        recorded_at: record.recorded_at(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_keep_order_and_inner_whitespace() {
        let raw = "int x = 10,x = 10,variable x = 10 ,declare x = 10";
        let options = decode_options(raw);
        assert_eq!(options.len(), 4);
        assert_eq!(options[2], "variable x = 10 ");
        assert_eq!(encode_options(&options).unwrap(), raw);
    }

    #[test]
    fn option_with_delimiter_is_refused() {
        let options = vec!["a,b".to_owned(), "c".to_owned()];
        assert!(matches!(
            encode_options(&options),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn negative_ids_are_rejected() {
        assert!(user_id_from_i64(-1).is_err());
        assert_eq!(quiz_id_from_i64(3).unwrap(), QuizId::new(3));
    }
}
