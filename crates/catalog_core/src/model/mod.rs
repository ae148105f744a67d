//! In-memory catalog model.
//!
//! # Responsibility
//! - Define the record leaf and the three-level container that owns it.
//!
//! # Invariants
//! - Records are owned by exactly one sub-category.
//! - Empty levels are removed as soon as they become empty.

pub mod catalog;
pub mod record;
