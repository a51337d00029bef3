#![forbid(unsafe_code)]

pub mod repository;
pub mod seed;
pub mod sqlite;

pub use repository::{Storage, StorageError};
pub use seed::{CatalogLoadError, CatalogSeed, SeedReport, ValidatedCatalog};
