//! Discovery engine.
//!
//! Answers category and search queries over one immutable [`Snapshot`].
//! Queries never return full descriptors; callers get [`ToolSummary`]s and
//! go through the [`crate::ToolResolver`] for the schema and dispatch handle.
//!
//! Result lists are always ordered by tool id ascending.

use crate::models::{Category, CategoryCount, SearchMode, ToolSummary};
use crate::registry::Snapshot;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Outcome of narrowing a primary category by modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Refinement {
    /// The primary category being refined.
    pub primary: Category,
    /// Modifiers applied so far.
    pub modifiers: Vec<Category>,
    /// Number of tools in the primary category.
    pub total: usize,
    /// Modifiers that still narrow the primary, with `primary ∩ modifier`
    /// counts. Zero counts are omitted.
    pub available: Vec<CategoryCount>,
    /// Tools carrying the primary and every applied modifier. Empty when no
    /// modifier was given.
    pub tools: Vec<ToolSummary>,
}

/// Stateless query layer over a catalog snapshot.
#[derive(Debug, Clone)]
pub struct DiscoveryEngine {
    snapshot: Arc<Snapshot>,
}

impl DiscoveryEngine {
    /// Creates an engine over `snapshot`.
    #[must_use]
    pub const fn new(snapshot: Arc<Snapshot>) -> Self {
        Self { snapshot }
    }

    /// Returns the snapshot this engine answers from.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Lists every primary category with its tool count, in taxonomy order.
    #[must_use]
    #[instrument(skip(self), fields(operation = "discovery.list_top_level_categories"))]
    pub fn list_top_level_categories(&self) -> Vec<CategoryCount> {
        let counts = self.counts(self.snapshot.taxonomy().primary_categories());
        count_query("list_top_level_categories");
        counts
    }

    /// Lists every secondary category with its tool count, in taxonomy order.
    #[must_use]
    #[instrument(skip(self), fields(operation = "discovery.list_secondary_categories"))]
    pub fn list_secondary_categories(&self) -> Vec<CategoryCount> {
        let counts = self.counts(self.snapshot.taxonomy().secondary_categories());
        count_query("list_secondary_categories");
        counts
    }

    /// Lists the tools tagged with `category`.
    ///
    /// A valid category with no tools yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] if `category` is outside the
    /// taxonomy.
    #[instrument(skip(self), fields(operation = "discovery.list_tools"))]
    pub fn list_tools(&self, category: Category) -> Result<Vec<ToolSummary>> {
        let result = self.ensure_valid(category).map(|()| {
            self.snapshot
                .index()
                .tools(category)
                .map(|ids| self.summaries(ids))
                .unwrap_or_default()
        });
        record("list_tools", &result);
        if let Ok(tools) = &result {
            debug!(category = %category, results = tools.len(), "Listed tools");
        }
        result
    }

    /// Lists the tools tagged with the category called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] if `name` is not a taxonomy
    /// category.
    pub fn list_tools_by_name(&self, name: &str) -> Result<Vec<ToolSummary>> {
        let category = self.parse_category(name, "list_tools")?;
        self.list_tools(category)
    }

    /// Searches by category tags.
    ///
    /// [`SearchMode::All`] returns tools carrying every tag, [`SearchMode::Any`]
    /// tools carrying at least one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQuery`] if `tags` is empty and
    /// [`Error::UnknownCategory`] if any tag is outside the taxonomy.
    #[instrument(skip(self), fields(operation = "discovery.search"))]
    pub fn search(&self, tags: &[Category], mode: SearchMode) -> Result<Vec<ToolSummary>> {
        let result = self.run_search(tags, mode);
        record("search", &result);
        if let Ok(tools) = &result {
            debug!(tags = tags.len(), mode = %mode, results = tools.len(), "Searched tools");
        }
        result
    }

    /// Searches by category names.
    ///
    /// # Errors
    ///
    /// Same as [`DiscoveryEngine::search`], with names resolved through the
    /// taxonomy first.
    pub fn search_by_names<S: AsRef<str>>(
        &self,
        names: &[S],
        mode: SearchMode,
    ) -> Result<Vec<ToolSummary>> {
        let tags = names
            .iter()
            .map(|name| self.parse_category(name.as_ref(), "search"))
            .collect::<Result<Vec<_>>>()?;
        self.search(&tags, mode)
    }

    /// Returns the summary of one tool.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTool`] if no tool has `tool_id`.
    #[instrument(skip(self), fields(operation = "discovery.get_summary"))]
    pub fn get_summary(&self, tool_id: &str) -> Result<ToolSummary> {
        let result = self
            .snapshot
            .catalog()
            .get(tool_id)
            .map(|tool| tool.summary())
            .ok_or_else(|| Error::UnknownTool(tool_id.to_string()));
        record("get_summary", &result);
        result
    }

    /// Narrows `primary` by `modifiers`.
    ///
    /// `available` lists the secondary categories that still select at least
    /// one tool together with `primary` and the applied modifiers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `primary` is a secondary category
    /// and [`Error::UnknownCategory`] if any category is outside the taxonomy.
    #[instrument(skip(self), fields(operation = "discovery.refine"))]
    pub fn refine(&self, primary: Category, modifiers: &[Category]) -> Result<Refinement> {
        let result = self.run_refine(primary, modifiers);
        record("refine", &result);
        result
    }

    /// Loads the tools of one or more primary categories given by name.
    ///
    /// Names are matched case-insensitively after trimming; the result is the
    /// union of the named categories. Modifiers are narrowed with
    /// [`Self::search`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQuery`] if `names` is empty and
    /// [`Error::UnknownCategory`] (listing the primary names) for a name that
    /// is not a primary category of the taxonomy.
    #[instrument(skip(self, names), fields(operation = "discovery.load_categories", requested = names.len()))]
    pub fn load_categories<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<ToolSummary>> {
        let result = names
            .iter()
            .map(|name| {
                let taxonomy = self.snapshot.taxonomy();
                match taxonomy.parse(name.as_ref()) {
                    Ok(category) if category.is_primary() => Ok(category),
                    _ => Err(Error::UnknownCategory(format!(
                        "'{}' (valid categories: {})",
                        name.as_ref().trim(),
                        taxonomy
                            .primary_categories()
                            .iter()
                            .map(Category::as_str)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ))),
                }
            })
            .collect::<Result<Vec<_>>>()
            .and_then(|tags| self.run_search(&tags, SearchMode::Any));
        record("load_categories", &result);
        result
    }

    /// Finds tools whose id, display name or description contains `query`
    /// (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQuery`] if `query` is blank.
    #[instrument(skip(self), fields(operation = "discovery.find"))]
    pub fn find(&self, query: &str) -> Result<Vec<ToolSummary>> {
        let needle = query.trim().to_lowercase();
        let result = if needle.is_empty() {
            Err(Error::EmptyQuery)
        } else {
            let mut hits: Vec<ToolSummary> = self
                .snapshot
                .catalog()
                .iter()
                .filter(|tool| {
                    tool.id.to_lowercase().contains(&needle)
                        || tool.display_name.to_lowercase().contains(&needle)
                        || tool.description.to_lowercase().contains(&needle)
                })
                .map(|tool| tool.summary())
                .collect();
            hits.sort_by(|a, b| a.id.cmp(&b.id));
            Ok(hits)
        };
        record("find", &result);
        result
    }

    fn run_search(&self, tags: &[Category], mode: SearchMode) -> Result<Vec<ToolSummary>> {
        if tags.is_empty() {
            return Err(Error::EmptyQuery);
        }
        for tag in tags {
            self.ensure_valid(*tag)?;
        }

        let index = self.snapshot.index();
        let ids = match mode {
            SearchMode::All => index.intersection(tags),
            SearchMode::Any => index.union(tags),
        };
        Ok(self.summaries(&ids))
    }

    fn run_refine(&self, primary: Category, modifiers: &[Category]) -> Result<Refinement> {
        self.ensure_valid(primary)?;
        if !primary.is_primary() {
            return Err(Error::InvalidInput(format!(
                "'{primary}' is a secondary category; refine starts from a primary category"
            )));
        }
        for modifier in modifiers {
            self.ensure_valid(*modifier)?;
        }

        let index = self.snapshot.index();
        let mut applied = Vec::with_capacity(modifiers.len() + 1);
        applied.push(primary);
        applied.extend(modifiers.iter().filter(|m| **m != primary));
        let selected = index.intersection(&applied);

        let available = self
            .snapshot
            .taxonomy()
            .secondary_categories()
            .iter()
            .filter(|candidate| !modifiers.contains(candidate))
            .filter_map(|candidate| {
                let count = index
                    .tools(*candidate)
                    .map_or(0, |ids| selected.intersection(ids).count());
                (count > 0).then(|| CategoryCount::new(*candidate, count))
            })
            .collect();

        let tools = if modifiers.is_empty() {
            Vec::new()
        } else {
            self.summaries(&selected)
        };

        Ok(Refinement {
            primary,
            modifiers: modifiers.to_vec(),
            total: index.count(primary),
            available,
            tools,
        })
    }

    fn counts(&self, categories: &[Category]) -> Vec<CategoryCount> {
        let index = self.snapshot.index();
        categories
            .iter()
            .map(|category| CategoryCount::new(*category, index.count(*category)))
            .collect()
    }

    fn summaries(&self, ids: &BTreeSet<String>) -> Vec<ToolSummary> {
        let catalog = self.snapshot.catalog();
        ids.iter()
            .filter_map(|id| catalog.get(id))
            .map(|tool| tool.summary())
            .collect()
    }

    fn ensure_valid(&self, category: Category) -> Result<()> {
        if self.snapshot.taxonomy().is_valid(category) {
            Ok(())
        } else {
            Err(Error::UnknownCategory(category.to_string()))
        }
    }

    fn parse_category(&self, name: &str, operation: &'static str) -> Result<Category> {
        let parsed = self.snapshot.taxonomy().parse(name);
        if parsed.is_err() {
            record(operation, &parsed);
        }
        parsed
    }
}

fn count_query(operation: &'static str) {
    metrics::counter!("hoopdex_discovery_queries_total", "operation" => operation).increment(1);
}

/// Emits the per-operation query counters.
fn record<T>(operation: &'static str, result: &Result<T>) {
    count_query(operation);
    if let Err(e) = result {
        warn!(operation, error = %e, "Rejected discovery query");
        metrics::counter!("hoopdex_discovery_errors_total", "operation" => operation)
            .increment(1);
    }
}
