//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::AttemptError;
use storage::repository::StorageError;
use storage::seed::CatalogLoadError;
use storage::sqlite::SqliteInitError;

use crate::console::ConsoleError;

/// Errors emitted by `AccountService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccountError {
    #[error("username already registered")]
    DuplicateUsername,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Load(#[from] CatalogLoadError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while running a quiz attempt.
///
/// An empty quiz is not an error; see `AttemptOutcome::NoQuestionsAvailable`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("invalid quiz selection")]
    InvalidSelection,
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error(transparent)]
    Console(#[from] ConsoleError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
