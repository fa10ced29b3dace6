//! In-memory catalog of library items.
//!
//! Items are keyed by their code and always iterate in ascending code order.
//! Nothing is persisted; the catalog lives as long as the process.

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::error::CatalogError;
use super::item::{CatalogItem, ItemUpdate, DEFAULT_CATEGORY};

/// Ordered collection of catalog items
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Items keyed by code
    items: BTreeMap<String, CatalogItem>,

    /// Category given to items added without one
    default_category: String,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::with_default_category(DEFAULT_CATEGORY)
    }

    /// Create an empty catalog that files uncategorized items under `category`
    pub fn with_default_category(category: impl Into<String>) -> Self {
        Self {
            items: BTreeMap::new(),
            default_category: category.into(),
        }
    }

    /// Add a new item.
    ///
    /// Fails with [`CatalogError::DuplicateKey`] if the code is taken (the
    /// existing entry is left untouched) or with a validation error if any
    /// field is invalid.
    pub fn add(
        &mut self,
        code: &str,
        title: &str,
        creator: &str,
        category: Option<&str>,
        availability: &str,
    ) -> Result<&CatalogItem, CatalogError> {
        let key = code.trim();
        if self.items.contains_key(key) {
            debug!(code = key, "rejected duplicate code");
            return Err(CatalogError::DuplicateKey(key.to_string()));
        }

        let category = category.unwrap_or(self.default_category.as_str()).to_string();
        let item = CatalogItem::new(key, title, creator, Some(category), availability)?;

        info!(code = key, "item added");
        Ok(&*self.items.entry(key.to_string()).or_insert(item))
    }

    /// Get an item by its exact code
    pub fn get(&self, code: &str) -> Option<&CatalogItem> {
        let item = self.items.get(code.trim());
        debug!(code, found = item.is_some(), "lookup");
        item
    }

    /// Check whether an item with this code exists
    pub fn contains(&self, code: &str) -> bool {
        self.items.contains_key(code.trim())
    }

    /// Search items by code or title (case-insensitive substring match).
    ///
    /// Matches come back in code order; an empty query matches everything.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a CatalogItem> + 'a {
        let query_lower = query.to_lowercase();
        debug!(query, "search");

        self.items.values().filter(move |item| {
            item.code().to_lowercase().contains(&query_lower)
                || item.title().to_lowercase().contains(&query_lower)
        })
    }

    /// Apply a partial update to an existing item.
    ///
    /// Invalid field values inside `update` are ignored by the item; only a
    /// missing code is an error.
    pub fn update(&mut self, code: &str, update: ItemUpdate) -> Result<&CatalogItem, CatalogError> {
        let key = code.trim();
        let item = self
            .items
            .get_mut(key)
            .ok_or_else(|| CatalogError::NotFound(key.to_string()))?;

        item.update_fields(update);
        info!(code = key, "item updated");
        Ok(&*item)
    }

    /// Remove an item by code, returning it if it was present
    pub fn remove(&mut self, code: &str) -> Option<CatalogItem> {
        let removed = self.items.remove(code.trim());
        if removed.is_some() {
            info!(code, "item removed");
        }
        removed
    }

    /// All items in ascending code order
    pub fn list(&self) -> impl Iterator<Item = &CatalogItem> + '_ {
        self.items.values()
    }

    /// Get the number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
