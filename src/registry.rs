//! Catalog registry with atomic snapshot swapping.
//!
//! A [`Snapshot`] bundles one taxonomy, one catalog and the index built from
//! them. Snapshots are never modified; [`CatalogRegistry::reload`] builds a
//! complete new one and replaces the shared `Arc` in a single write, so a
//! reader sees either the old pair or the new pair.

use crate::catalog::{Catalog, CatalogSource, validation};
use crate::discovery::DiscoveryEngine;
use crate::index::TagIndex;
use crate::resolver::ToolResolver;
use crate::taxonomy::Taxonomy;
use crate::{Error, Result, current_timestamp};
use std::sync::{Arc, Mutex, RwLock};
use tracing::{info, instrument, warn};

/// Immutable taxonomy + catalog + index triple.
#[derive(Debug)]
pub struct Snapshot {
    taxonomy: Taxonomy,
    catalog: Catalog,
    index: TagIndex,
    generation: u64,
    loaded_at: u64,
}

impl Snapshot {
    /// Checks `catalog` against `taxonomy`, builds the index and bundles them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if any tool carries a category outside
    /// `taxonomy` or has no primary category within it.
    pub fn build(taxonomy: Taxonomy, catalog: Catalog, generation: u64) -> Result<Self> {
        for tool in catalog.iter() {
            validation::validate_descriptor(tool, &taxonomy)?;
        }
        let index = TagIndex::build(&catalog, &taxonomy);
        Ok(Self {
            taxonomy,
            catalog,
            index,
            generation,
            loaded_at: current_timestamp(),
        })
    }

    /// Loads `source` and builds a snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be read, parsed or validated.
    pub fn load(source: &CatalogSource, taxonomy: Taxonomy, generation: u64) -> Result<Self> {
        let catalog = Catalog::from_source(source, &taxonomy)?;
        Self::build(taxonomy, catalog, generation)
    }

    /// Returns the taxonomy.
    #[must_use]
    pub const fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Returns the catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the tag index.
    #[must_use]
    pub const fn index(&self) -> &TagIndex {
        &self.index
    }

    /// Returns the load counter, starting at 1.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the Unix timestamp the snapshot was built at.
    #[must_use]
    pub const fn loaded_at(&self) -> u64 {
        self.loaded_at
    }
}

/// Holds the current snapshot and hands out engines over it.
#[derive(Debug)]
pub struct CatalogRegistry {
    current: RwLock<Arc<Snapshot>>,
    /// Held for the whole of a reload so generations are never reused.
    reloading: Mutex<()>,
}

impl CatalogRegistry {
    /// Creates a registry from an already-built snapshot.
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
            reloading: Mutex::new(()),
        }
    }

    /// Creates a registry over the builtin catalog and standard taxonomy.
    ///
    /// # Errors
    ///
    /// Returns an error if the builtin catalog fails validation.
    pub fn builtin() -> Result<Self> {
        Self::from_source(&CatalogSource::Builtin, Taxonomy::standard())
    }

    /// Creates a registry by loading `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn from_source(source: &CatalogSource, taxonomy: Taxonomy) -> Result<Self> {
        let snapshot = Snapshot::load(source, taxonomy, 1)?;
        info!(
            source = %source,
            tools = snapshot.catalog().len(),
            categories = snapshot.taxonomy().categories().count(),
            "Catalog registry ready"
        );
        Ok(Self::new(snapshot))
    }

    /// Returns the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.current
            .read()
            .map(|guard| Arc::clone(&guard))
            .map_err(|e| Error::OperationFailed {
                operation: "read_snapshot".to_string(),
                cause: e.to_string(),
            })
    }

    /// Returns an engine pinned to the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn engine(&self) -> Result<DiscoveryEngine> {
        self.snapshot().map(DiscoveryEngine::new)
    }

    /// Returns a resolver pinned to the current snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock is poisoned.
    pub fn resolver(&self) -> Result<ToolResolver> {
        self.snapshot().map(ToolResolver::new)
    }

    /// Loads `source` with the current taxonomy and swaps it in.
    ///
    /// The new snapshot is fully built before the swap; if loading fails the
    /// current snapshot stays in place. Engines obtained earlier keep
    /// answering from the snapshot they were created with.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded or the lock is
    /// poisoned.
    #[instrument(skip(self, source), fields(operation = "registry.reload", source = %source))]
    pub fn reload(&self, source: &CatalogSource) -> Result<Arc<Snapshot>> {
        let _reloading = self.reloading.lock().map_err(|e| Error::OperationFailed {
            operation: "lock_reload".to_string(),
            cause: e.to_string(),
        })?;
        let previous = self.snapshot()?;
        let loaded = Snapshot::load(
            source,
            previous.taxonomy().clone(),
            previous.generation() + 1,
        );
        let snapshot = match loaded {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                warn!(error = %e, generation = previous.generation(), "Catalog reload failed");
                metrics::counter!("hoopdex_catalog_reloads_total", "status" => "error")
                    .increment(1);
                return Err(e);
            },
        };

        let mut current = self.current.write().map_err(|e| Error::OperationFailed {
            operation: "swap_snapshot".to_string(),
            cause: e.to_string(),
        })?;
        *current = Arc::clone(&snapshot);
        drop(current);

        info!(
            generation = snapshot.generation(),
            tools = snapshot.catalog().len(),
            "Catalog reloaded"
        );
        metrics::counter!("hoopdex_catalog_reloads_total", "status" => "success").increment(1);
        Ok(snapshot)
    }
}
