use quiz_core::model::{Credentials, User, UserId};

use super::SqliteRepository;
use super::mapping::{db_err, map_user_row, ser, user_id_from_i64};
use crate::repository::{StorageError, UserRepository};

#[async_trait::async_trait]
impl UserRepository for SqliteRepository {
    async fn insert_user(&self, credentials: &Credentials) -> Result<UserId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO users (username, password)
            VALUES (?1, ?2)
            ",
        )
        .bind(credentials.username().as_str())
        .bind(credentials.password())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        user_id_from_i64(res.last_insert_rowid())
    }

    async fn find_by_credentials(
        &self,
        credentials: &Credentials,
    ) -> Result<Option<User>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, username, password
            FROM users
            WHERE username = ?1 AND password = ?2
            ",
        )
        .bind(credentials.username().as_str())
        .bind(credentials.password())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.as_ref().map(map_user_row).transpose()
    }

    async fn count_users(&self) -> Result<u64, StorageError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        u64::try_from(count).map_err(ser)
    }
}
