//! Persistence of catalogs to delimited text files.
//!
//! # Responsibility
//! - Load catalogs from data files and save them back with a backup.
//! - Keep file handling out of the in-memory model.
//!
//! # Invariants
//! - File handles live only for the duration of one load or save call.
//! - Save output is header first, then rows in catalog enumeration order.

pub mod backup;
mod file_store;

pub use backup::{backup_path_for, BackupOutcome};
