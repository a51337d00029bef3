use std::sync::Arc;

use storage::repository::Storage;
use storage::seed::{CatalogSeed, SeedReport};

use crate::Clock;
use crate::account_service::AccountService;
use crate::catalog_service::CatalogService;
use crate::error::AppServicesError;
use crate::results_service::ResultsService;
use crate::sessions::QuizSessionService;

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    accounts: Arc<AccountService>,
    catalog: Arc<CatalogService>,
    sessions: Arc<QuizSessionService>,
    results: Arc<ResultsService>,
}

impl AppServices {
    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(Arc::clone(&storage.users))),
            catalog: Arc::new(CatalogService::new(Arc::clone(&storage.quizzes))),
            sessions: Arc::new(QuizSessionService::new(
                clock,
                Arc::clone(&storage.quizzes),
                Arc::clone(&storage.scores),
            )),
            results: Arc::new(ResultsService::new(Arc::clone(&storage.scores))),
        }
    }

    /// Open (or create) the `SQLite` store, initialize the schema, and seed
    /// the catalog. Safe to call on every startup.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the store cannot be opened or seeding
    /// fails; both are fatal to startup.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        catalog: &CatalogSeed,
    ) -> Result<(Self, SeedReport), AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let services = Self::from_storage(&storage, clock);
        let report = services.catalog.seed(catalog).await?;
        Ok((services, report))
    }

    #[must_use]
    pub fn accounts(&self) -> Arc<AccountService> {
        Arc::clone(&self.accounts)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn sessions(&self) -> Arc<QuizSessionService> {
        Arc::clone(&self.sessions)
    }

    #[must_use]
    pub fn results(&self) -> Arc<ResultsService> {
        Arc::clone(&self.results)
    }
}
