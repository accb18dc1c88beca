//! Search types.

use super::{Category, CategoryKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How multiple tags combine in a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Tools carrying every requested tag (set intersection).
    #[default]
    All,
    /// Tools carrying at least one requested tag (set union).
    Any,
}

impl SearchMode {
    /// Returns the mode as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Any => "any",
        }
    }

    /// Parses a search mode from a string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "and" => Some(Self::All),
            "any" | "or" => Some(Self::Any),
            _ => None,
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A category together with how many tools carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// The category.
    pub category: Category,
    /// Primary or secondary.
    pub kind: CategoryKind,
    /// Number of tools tagged with it.
    pub count: usize,
    /// One-line description.
    pub description: String,
}

impl CategoryCount {
    /// Creates a count entry for `category`.
    #[must_use]
    pub fn new(category: Category, count: usize) -> Self {
        Self {
            category,
            kind: category.kind(),
            count,
            description: category.description().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_mode_parse() {
        assert_eq!(SearchMode::parse("ALL"), Some(SearchMode::All));
        assert_eq!(SearchMode::parse("or"), Some(SearchMode::Any));
        assert_eq!(SearchMode::parse("xor"), None);
        assert_eq!(SearchMode::default(), SearchMode::All);
    }

    #[test]
    fn test_category_count_new() {
        let count = CategoryCount::new(Category::Tracking, 6);
        assert_eq!(count.kind, CategoryKind::Secondary);
        assert_eq!(count.count, 6);
        assert!(!count.description.is_empty());
    }
}
