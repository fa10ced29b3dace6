//! digilib - In-memory library catalog
//!
//! An interactive console for cataloging library items (books, media, etc.)
//! for the lifetime of one process. Nothing is persisted.
//!
//! # Modules
//!
//! - `library`: Items, validation, and the ordered catalog store
//! - `cli`: Command-line surface and the menu-driven console
//! - `config`: Optional YAML configuration
//!
//! # Usage
//!
//! ```bash
//! # Start the interactive catalog
//! digilib
//!
//! # Show resolved configuration
//! digilib config
//! ```

pub mod cli;
pub mod config;
pub mod library;

// Re-export main types at crate root for convenience
pub use library::{
    Availability, Catalog, CatalogError, CatalogItem, ItemUpdate, ValidationError,
    DEFAULT_CATEGORY,
};
