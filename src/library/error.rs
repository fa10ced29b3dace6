//! Errors raised by catalog items and the catalog store.

use thiserror::Error;

/// A field failed validation while constructing an item
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    Required { field: &'static str },

    #[error("Invalid availability status: {0:?} (expected \"Accessible\" or \"On Loan\")")]
    InvalidAvailability(String),
}

/// Errors returned by catalog operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Identifier already exists: {0}")]
    DuplicateKey(String),

    #[error("Item not found: {0}")]
    NotFound(String),
}
