//! Three-level catalog hierarchy.
//!
//! # Responsibility
//! - Own the category -> sub-category -> record structure.
//! - Enforce uniqueness and cascade removal in one place.
//! - Expose read-only level accessors for navigation.
//!
//! # Invariants
//! - Record keys are unique within their sub-category and equal the
//!   stored record's name.
//! - No empty sub-category or category survives a delete or rename.
//! - Category, sub-category and record keys are never blank.
//! - Levels are only mutated through `Catalog`; `Category` and
//!   `SubCategory` are read-only views to callers.

use crate::error::{CatalogError, CatalogResult, KeyLevel};
use crate::format::row::strip_wrapping_quotes;
use crate::model::record::Record;
use std::collections::BTreeMap;

/// Second level: records keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubCategory {
    records: BTreeMap<String, Record>,
}

impl SubCategory {
    /// Loads one record by name.
    pub fn get_record(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    pub fn record_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// First level: sub-categories keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    sub_categories: BTreeMap<String, SubCategory>,
}

impl Category {
    /// Loads one sub-category by name.
    pub fn get_sub_category(&self, name: &str) -> Option<&SubCategory> {
        self.sub_categories.get(name)
    }

    pub fn sub_category_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.sub_categories.keys().map(String::as_str)
    }

    pub fn sub_categories(&self) -> impl Iterator<Item = (&str, &SubCategory)> + '_ {
        self.sub_categories
            .iter()
            .map(|(name, sub_category)| (name.as_str(), sub_category))
    }

    /// Number of records across all sub-categories.
    pub fn record_count(&self) -> usize {
        self.sub_categories.values().map(SubCategory::len).sum()
    }
}

/// Hierarchical record store.
///
/// Enumeration order is lexicographic per level, which also makes saved
/// files deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    categories: BTreeMap<String, Category>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads one category by name.
    pub fn get_category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    /// Loads one sub-category by path.
    pub fn get_sub_category(&self, category: &str, sub_category: &str) -> Option<&SubCategory> {
        self.get_category(category)?.get_sub_category(sub_category)
    }

    pub fn category_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.categories.keys().map(String::as_str)
    }

    /// Lists sub-category names. Absent category yields nothing.
    pub fn sub_category_names<'a>(&'a self, category: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.get_category(category)
            .into_iter()
            .flat_map(|category| category.sub_category_names())
    }

    /// Lists record names. Absent path yields nothing.
    pub fn record_names<'a>(
        &'a self,
        category: &str,
        sub_category: &str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.get_sub_category(category, sub_category)
            .into_iter()
            .flat_map(|sub_category| sub_category.record_names())
    }

    /// Iterates `(category, sub_category, record)` depth-first.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &Record)> + '_ {
        self.categories.iter().flat_map(|(category_name, category)| {
            category
                .sub_categories
                .iter()
                .flat_map(move |(sub_category_name, sub_category)| {
                    sub_category.records.values().map(move |record| {
                        (category_name.as_str(), sub_category_name.as_str(), record)
                    })
                })
        })
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.categories.values().map(Category::record_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Inserts a new record, creating missing levels.
    ///
    /// One layer of wrapping double quotes is stripped from `description`.
    ///
    /// # Errors
    /// - `EmptyKey` when any key is blank; nothing is created.
    /// - `DuplicateKey` when `name` already exists in the sub-category; the
    ///   existing record is left untouched.
    pub fn add_item(
        &mut self,
        category: &str,
        sub_category: &str,
        name: &str,
        description: &str,
    ) -> CatalogResult<()> {
        let description = strip_wrapping_quotes(description);
        self.insert_record(category, sub_category, name, description)
    }

    /// Inserts a record with its description stored verbatim.
    pub(crate) fn insert_record(
        &mut self,
        category: &str,
        sub_category: &str,
        name: &str,
        description: &str,
    ) -> CatalogResult<()> {
        ensure_key(category, KeyLevel::Category)?;
        ensure_key(sub_category, KeyLevel::SubCategory)?;
        ensure_key(name, KeyLevel::Record)?;

        let records = &mut self
            .categories
            .entry(category.to_string())
            .or_default()
            .sub_categories
            .entry(sub_category.to_string())
            .or_default()
            .records;
        if records.contains_key(name) {
            return Err(CatalogError::duplicate(category, sub_category, name));
        }

        records.insert(name.to_string(), Record::new(name, description));
        Ok(())
    }

    pub fn has_item(&self, category: &str, sub_category: &str, name: &str) -> bool {
        self.get_item(category, sub_category, name).is_some()
    }

    /// Loads one record by path. Absent levels yield `None`.
    pub fn get_item(&self, category: &str, sub_category: &str, name: &str) -> Option<&Record> {
        self.get_sub_category(category, sub_category)?
            .get_record(name)
    }

    /// Replaces the description of an existing record.
    ///
    /// One layer of wrapping double quotes is stripped, as in `add_item`.
    pub fn set_description(
        &mut self,
        category: &str,
        sub_category: &str,
        name: &str,
        description: &str,
    ) -> CatalogResult<()> {
        let record = self
            .records_mut(category, sub_category)
            .and_then(|records| records.get_mut(name))
            .ok_or_else(|| CatalogError::not_found(category, sub_category, name))?;
        record.set_description(strip_wrapping_quotes(description));
        Ok(())
    }

    /// Renames a record and re-keys it under the new name.
    ///
    /// Renaming to the current name is a no-op.
    ///
    /// # Errors
    /// - `EmptyKey` when `new_name` is blank.
    /// - `NotFound` when the record does not exist.
    /// - `DuplicateKey` when `new_name` is taken in the same sub-category.
    pub fn rename_item(
        &mut self,
        category: &str,
        sub_category: &str,
        name: &str,
        new_name: &str,
    ) -> CatalogResult<()> {
        ensure_key(new_name, KeyLevel::Record)?;
        let records = self
            .records_mut(category, sub_category)
            .filter(|records| records.contains_key(name))
            .ok_or_else(|| CatalogError::not_found(category, sub_category, name))?;
        if name == new_name {
            return Ok(());
        }
        if records.contains_key(new_name) {
            return Err(CatalogError::duplicate(category, sub_category, new_name));
        }

        if let Some(mut record) = records.remove(name) {
            record.rename(new_name);
            records.insert(new_name.to_string(), record);
        }
        Ok(())
    }

    /// Removes a record and any levels left empty by its removal.
    ///
    /// Returns the removed record, or `None` when the path is absent.
    pub fn delete_item(&mut self, category: &str, sub_category: &str, name: &str) -> Option<Record> {
        let category_entry = self.categories.get_mut(category)?;
        let sub_category_entry = category_entry.sub_categories.get_mut(sub_category)?;
        let removed = sub_category_entry.records.remove(name)?;

        if sub_category_entry.is_empty() {
            category_entry.sub_categories.remove(sub_category);
        }
        if category_entry.sub_categories.is_empty() {
            self.categories.remove(category);
        }
        Some(removed)
    }

    fn records_mut(
        &mut self,
        category: &str,
        sub_category: &str,
    ) -> Option<&mut BTreeMap<String, Record>> {
        self.categories
            .get_mut(category)?
            .sub_categories
            .get_mut(sub_category)
            .map(|sub_category| &mut sub_category.records)
    }
}

fn ensure_key(value: &str, level: KeyLevel) -> CatalogResult<()> {
    if value.trim().is_empty() {
        return Err(CatalogError::EmptyKey(level));
    }
    Ok(())
}
