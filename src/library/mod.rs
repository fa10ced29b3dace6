//! Library catalog: items and the store that holds them.
//!
//! # Record format
//!
//! ```text
//! [code] 'title' by creator | Category: category | availability
//! ```
//!
//! Codes are unique and immutable; the catalog keeps items sorted by code.

pub mod catalog;
pub mod error;
pub mod item;

pub use catalog::Catalog;
pub use error::{CatalogError, ValidationError};
pub use item::{Availability, CatalogItem, ItemUpdate, DEFAULT_CATEGORY};
