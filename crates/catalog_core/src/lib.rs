//! Core domain logic for the hierarchical catalog.
//! This crate is the single source of truth for catalog invariants and the
//! persisted text format.

pub mod error;
pub mod format;
pub mod logging;
pub mod model;
pub mod store;

pub use error::{CatalogError, CatalogResult, KeyLevel};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::catalog::{Catalog, Category, SubCategory};
pub use model::record::Record;
pub use store::{backup_path_for, BackupOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
