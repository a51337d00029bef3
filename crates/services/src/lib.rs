#![forbid(unsafe_code)]

pub mod account_service;
pub mod app_services;
pub mod catalog_service;
pub mod console;
pub mod error;
pub mod results_service;
pub mod sessions;

pub use quiz_core::Clock;

pub use account_service::{AccountService, UserSession};
pub use app_services::AppServices;
pub use catalog_service::CatalogService;
pub use console::{Console, ConsoleError, ScriptedConsole};
pub use error::{AccountError, AppServicesError, CatalogError, SessionError};
pub use results_service::{ResultEntry, ResultsService, results_report};
pub use sessions::{AttemptOutcome, CompletedAttempt, QuizSessionService};
