//! Persisted text format.
//!
//! # Responsibility
//! - Define the on-disk row layout, separators and header.
//! - Keep quoting and delimiter rules out of the in-memory model.
//!
//! # Invariants
//! - Row 0 of a file is a header and never carries data.
//! - Every data row has exactly four fields:
//!   `category, sub_category, name, description`.

pub mod row;
