//! Tool catalog.
//!
//! The catalog is the immutable, ordered collection of validated
//! [`ToolDescriptor`]s plus a lookup by id. It is loaded once (at process
//! start or on reload) and never edited afterwards.
//!
//! # Module Structure
//!
//! - [`definition`]: raw serde shapes of a catalog source and JSON Schema construction
//! - [`source`]: builtin / file / inline sources and format detection
//! - [`validation`]: the rules a definition must satisfy to load

pub mod definition;
pub mod source;
pub mod validation;

pub use definition::{CatalogDocument, ParamDefinition, ParamType, ToolDefinition};
pub use source::{BUILTIN_CATALOG, CatalogSource, SourceFormat};

use crate::models::ToolDescriptor;
use crate::taxonomy::Taxonomy;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Immutable, validated tool collection.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Descriptors in load order.
    tools: Vec<Arc<ToolDescriptor>>,
    /// Tool id to position in `tools`.
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Validates raw definitions and builds a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for the first definition that breaks a
    /// rule, including an id that collides with an earlier one.
    pub fn load(definitions: &[ToolDefinition], taxonomy: &Taxonomy) -> Result<Self> {
        let descriptors = definitions
            .iter()
            .enumerate()
            .map(|(position, definition)| {
                validation::validate_definition(definition, position, taxonomy)
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_descriptors(descriptors, taxonomy)
    }

    /// Builds a catalog from already-typed descriptors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a descriptor breaks the category
    /// rules or an id repeats.
    pub fn from_descriptors(descriptors: Vec<ToolDescriptor>, taxonomy: &Taxonomy) -> Result<Self> {
        let mut tools = Vec::with_capacity(descriptors.len());
        let mut by_id = HashMap::with_capacity(descriptors.len());

        for descriptor in descriptors {
            validation::validate_descriptor(&descriptor, taxonomy)?;
            if by_id.contains_key(&descriptor.id) {
                return Err(Error::Validation {
                    tool: descriptor.id,
                    reason: "duplicate tool id".to_string(),
                });
            }
            by_id.insert(descriptor.id.clone(), tools.len());
            tools.push(Arc::new(descriptor));
        }

        debug!(tools = tools.len(), "Catalog validated");
        Ok(Self { tools, by_id })
    }

    /// Reads, parses and validates a catalog source.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or parsed, or any
    /// definition fails validation.
    pub fn from_source(source: &CatalogSource, taxonomy: &Taxonomy) -> Result<Self> {
        let document = source.read()?;
        let catalog = Self::load(&document.tools, taxonomy)?;
        info!(source = %source, tools = catalog.len(), "Loaded tool catalog");
        Ok(catalog)
    }

    /// Loads the builtin NBA statistics catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the builtin catalog violates `taxonomy` (possible
    /// only with a restricted taxonomy).
    pub fn builtin(taxonomy: &Taxonomy) -> Result<Self> {
        Self::from_source(&CatalogSource::Builtin, taxonomy)
    }

    /// Returns the number of tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Returns true if the catalog has no tools.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Iterates descriptors in load order.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor> {
        self.tools.iter().map(AsRef::as_ref)
    }

    /// Gets a descriptor by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Arc<ToolDescriptor>> {
        self.by_id.get(id).and_then(|&position| self.tools.get(position))
    }

    /// Returns true if a tool with `id` exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn definition(id: &str, categories: &[&str]) -> ToolDefinition {
        ToolDefinition {
            id: id.to_string(),
            name: None,
            description: format!("{id} description"),
            categories: categories.iter().map(ToString::to_string).collect(),
            dispatch: format!("endpoint.{id}"),
            params: Vec::new(),
        }
    }

    #[test]
    fn test_load_preserves_order_and_lookup() {
        let catalog = Catalog::load(
            &[
                definition("get_team_roster", &["team"]),
                definition("get_draft_board", &["draft"]),
                definition("get_all_players", &["player", "league"]),
            ],
            &Taxonomy::standard(),
        )
        .unwrap();

        let ids: Vec<_> = catalog.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["get_team_roster", "get_draft_board", "get_all_players"]);
        assert!(catalog.contains("get_draft_board"));
        assert_eq!(
            catalog.get("get_all_players").unwrap().categories.len(),
            2
        );
        assert!(catalog.get("get_nothing").is_none());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Catalog::load(
            &[
                definition("get_schedule", &["season"]),
                definition("get_schedule", &["league"]),
            ],
            &Taxonomy::standard(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation { tool, reason } if tool == "get_schedule" && reason.contains("duplicate")
        ));
    }

    #[test]
    fn test_from_descriptors_checks_primary() {
        let mut descriptor = validation::validate_definition(
            &definition("get_synergy_play_types", &["league", "advanced"]),
            0,
            &Taxonomy::standard(),
        )
        .unwrap();
        descriptor.categories.remove(&Category::League);

        let err = Catalog::from_descriptors(vec![descriptor], &Taxonomy::standard()).unwrap_err();
        assert!(err.to_string().contains("no primary category"));
    }

    #[test]
    fn test_empty_catalog_is_valid() {
        let catalog = Catalog::load(&[], &Taxonomy::standard()).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin(&Taxonomy::standard()).unwrap();
        assert_eq!(catalog.len(), 83);
        let roster = catalog.get("get_team_roster").unwrap();
        assert!(roster.parameter_schema.is_object());
        assert_eq!(
            roster.dispatch_handle.as_str(),
            "commonteamroster.CommonTeamRoster"
        );
    }

    #[test]
    fn test_builtin_rejected_by_restricted_taxonomy() {
        let taxonomy = Taxonomy::new(Category::primary().to_vec(), vec![Category::Statistics])
            .unwrap();
        assert!(matches!(
            Catalog::builtin(&taxonomy),
            Err(Error::Validation { .. })
        ));
    }
}
