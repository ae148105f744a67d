//! Record leaf model.
//!
//! # Responsibility
//! - Hold a record name and free-text description.
//! - Render the two-line human-readable form used by the CLI.
//!
//! # Invariants
//! - No validation happens here; emptiness and uniqueness are enforced by
//!   the owning `Catalog`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Named leaf entity with a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: String,
    description: String,
}

impl Record {
    /// Creates a record. Always succeeds.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replaces the name.
    ///
    /// A record stored in a `Catalog` is keyed by name, so stored records
    /// are renamed through `Catalog::rename_item`, which re-keys them.
    pub fn rename(&mut self, new_name: impl Into<String>) {
        self.name = new_name.into();
    }

    /// Replaces the description.
    pub fn set_description(&mut self, new_description: impl Into<String>) {
        self.description = new_description.into();
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Item: {}\nDescription: {}", self.name, self.description)
    }
}
