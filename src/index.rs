//! Inverted tag index.
//!
//! Maps every taxonomy category to the ids of the tools carrying it. The
//! index is derived from a [`Catalog`] in one pass and never updated in
//! place; a catalog change means building a new index.

use crate::catalog::Catalog;
use crate::models::Category;
use crate::taxonomy::Taxonomy;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Category to tool-id sets.
///
/// Every category of the taxonomy has an entry, empty if no tool carries it.
/// Ids are kept in `BTreeSet`s so iteration is always id-ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    entries: BTreeMap<Category, BTreeSet<String>>,
}

impl TagIndex {
    /// Builds the index for `catalog`.
    ///
    /// The catalog is assumed validated against `taxonomy`; tags outside it
    /// are not indexed.
    #[must_use]
    pub fn build(catalog: &Catalog, taxonomy: &Taxonomy) -> Self {
        let mut entries: BTreeMap<Category, BTreeSet<String>> = taxonomy
            .categories()
            .map(|category| (category, BTreeSet::new()))
            .collect();

        for tool in catalog.iter() {
            for category in &tool.categories {
                if let Some(ids) = entries.get_mut(category) {
                    ids.insert(tool.id.clone());
                }
            }
        }

        debug!(
            categories = entries.len(),
            tools = catalog.len(),
            "Built tag index"
        );
        Self { entries }
    }

    /// Returns the ids tagged with `category`, or `None` if the category is
    /// not indexed.
    #[must_use]
    pub fn tools(&self, category: Category) -> Option<&BTreeSet<String>> {
        self.entries.get(&category)
    }

    /// Returns how many tools carry `category` (0 when not indexed).
    #[must_use]
    pub fn count(&self, category: Category) -> usize {
        self.entries.get(&category).map_or(0, BTreeSet::len)
    }

    /// Returns true if `category` has an entry.
    #[must_use]
    pub fn contains(&self, category: Category) -> bool {
        self.entries.contains_key(&category)
    }

    /// Iterates `(category, ids)` in category order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &BTreeSet<String>)> {
        self.entries.iter().map(|(category, ids)| (*category, ids))
    }

    /// Ids carrying every category in `categories`.
    ///
    /// Starts from the smallest entry and filters, so the cost is bounded by
    /// the rarest tag. An empty slice yields an empty set.
    #[must_use]
    pub fn intersection(&self, categories: &[Category]) -> BTreeSet<String> {
        let mut sets = Vec::with_capacity(categories.len());
        for category in categories {
            match self.entries.get(category) {
                Some(ids) => sets.push(ids),
                None => return BTreeSet::new(),
            }
        }
        sets.sort_by_key(|ids| ids.len());

        let Some((smallest, rest)) = sets.split_first() else {
            return BTreeSet::new();
        };
        smallest
            .iter()
            .filter(|id| rest.iter().all(|ids| ids.contains(*id)))
            .cloned()
            .collect()
    }

    /// Ids carrying at least one category in `categories`.
    #[must_use]
    pub fn union(&self, categories: &[Category]) -> BTreeSet<String> {
        categories
            .iter()
            .filter_map(|category| self.entries.get(category))
            .flatten()
            .cloned()
            .collect()
    }
}
