//! # Hoopdex
//!
//! Hierarchical tool catalog and category-based discovery for NBA statistics
//! agents.
//!
//! An agent facing a large statistics-tool surface should not have to load
//! every tool definition into its context. Hoopdex classifies each tool with
//! one or more primary categories (player, team, game, ...) plus optional
//! modifiers (statistics, historical, tracking, ...) and answers discovery
//! queries over that classification: list the top-level groups, drill into a
//! group, intersect with modifiers, then resolve the chosen tool to its full
//! invocable definition.
//!
//! ## Features
//!
//! - Closed [`Category`] enumeration validated against a [`Taxonomy`]
//! - Immutable [`Catalog`] loaded once from a static TOML/YAML/JSON source
//! - Inverted [`TagIndex`] rebuilt wholesale from the catalog
//! - [`DiscoveryEngine`] with ALL/ANY multi-tag search
//! - [`ToolResolver`] handing out full descriptors for execution
//! - [`CatalogRegistry`] swapping catalog + index snapshots atomically
//!
//! ## Example
//!
//! ```rust,ignore
//! use hoopdex::{Category, CatalogRegistry, SearchMode};
//!
//! let registry = CatalogRegistry::builtin()?;
//! let engine = registry.engine()?;
//! for group in engine.list_top_level_categories() {
//!     println!("{} ({})", group.category, group.count);
//! }
//! let hits = engine.search(&[Category::Player, Category::Statistics], SearchMode::All)?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod catalog;
pub mod config;
pub mod discovery;
pub mod index;
pub mod mcp;
pub mod models;
pub mod observability;
pub mod registry;
pub mod resolver;
pub mod taxonomy;

// Re-exports for convenience
pub use catalog::{Catalog, CatalogSource, SourceFormat};
pub use config::HoopdexConfig;
pub use discovery::{DiscoveryEngine, Refinement};
pub use index::TagIndex;
pub use models::{
    Category, CategoryCount, CategoryKind, DispatchHandle, SearchMode, ToolDescriptor,
    ToolSummary,
};
pub use registry::{CatalogRegistry, Snapshot};
pub use resolver::{ToolExecutor, ToolResolver};
pub use taxonomy::Taxonomy;

/// Error type for hoopdex operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `Validation` | A tool definition is malformed at catalog load (fatal to startup) |
/// | `UnknownCategory` | A query names a category outside the taxonomy |
/// | `UnknownTool` | A query or resolve names a tool id not in the catalog |
/// | `EmptyQuery` | `search` / `find` called with nothing to narrow by |
/// | `InvalidInput` | Malformed meta-tool or invocation arguments, bad taxonomy config |
/// | `OperationFailed` | I/O, parse, lock and logging initialisation failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// A tool definition failed catalog validation.
    ///
    /// Raised when:
    /// - A tool has no categories, or no primary category
    /// - A category name is outside the taxonomy
    /// - Two tools share an id
    /// - A parameter definition is malformed
    #[error("invalid tool definition '{tool}': {reason}")]
    Validation {
        /// The offending tool id (or its position when the id is empty).
        tool: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A query named a category outside the taxonomy.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// A query named a tool id that is not in the catalog.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// A search was issued without any category (or keyword) to narrow by.
    #[error("search requires at least one category")]
    EmptyQuery,

    /// Invalid input was provided.
    ///
    /// Raised when:
    /// - Meta-tool arguments fail to deserialize
    /// - A required tool parameter is missing or an unknown one is given
    /// - A configured taxonomy is inconsistent
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - Catalog or config files cannot be read or parsed
    /// - The snapshot lock is poisoned
    /// - Logging is initialised twice
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

impl Error {
    /// Returns true for errors caused by the caller's query rather than the
    /// catalog or the environment.
    #[must_use]
    pub const fn is_query_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownCategory(_) | Self::UnknownTool(_) | Self::EmptyQuery
        )
    }
}

/// Result type alias for hoopdex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Returns the current Unix timestamp in seconds.
///
/// Falls back to 0 if the system clock is before the Unix epoch.
#[must_use]
pub fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
