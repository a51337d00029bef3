use std::sync::Arc;

use quiz_core::model::{Credentials, UserId, Username};
use storage::repository::{StorageError, UserRepository};

use crate::error::AccountError;

/// Authenticated context handed to operations that need a logged-in user.
///
/// Only `AccountService::login` creates one, so holding a `UserSession`
/// means the credentials were checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSession {
    user_id: UserId,
    username: Username,
}

impl UserSession {
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn username(&self) -> &Username {
        &self.username
    }
}

/// Registers and authenticates accounts.
///
/// Credentials are compared in plaintext by the repository lookup.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
}

impl AccountService {
    #[must_use]
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Create an account. Does not log the user in.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::DuplicateUsername` if the normalized username
    /// already exists, or `AccountError::Storage` on persistence failure.
    pub async fn register(&self, username: &str, password: &str) -> Result<UserId, AccountError> {
        let credentials = Credentials::normalize(username, password);
        match self.users.insert_user(&credentials).await {
            Ok(id) => {
                tracing::info!(user_id = %id, username = %credentials.username(), "registered user");
                Ok(id)
            }
            Err(StorageError::Conflict) => Err(AccountError::DuplicateUsername),
            Err(e) => Err(e.into()),
        }
    }

    /// Check credentials and return the matching user's id.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidCredentials` when no user matches.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserId, AccountError> {
        self.login(username, password)
            .await
            .map(|session| session.user_id)
    }

    /// Authenticate and open a session context.
    ///
    /// # Errors
    ///
    /// Returns `AccountError::InvalidCredentials` when no user matches.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserSession, AccountError> {
        let credentials = Credentials::normalize(username, password);
        let Some(user) = self.users.find_by_credentials(&credentials).await? else {
            tracing::warn!(username = %credentials.username(), "rejected login");
            return Err(AccountError::InvalidCredentials);
        };
        tracing::info!(user_id = %user.id(), "user logged in");
        Ok(UserSession {
            user_id: user.id(),
            username: user.username().clone(),
        })
    }
}
