//! Category taxonomy.
//!
//! The taxonomy fixes which categories a catalog may use and the order in
//! which they are listed. It is a build/config-time constant, never derived
//! from the catalog, so a tool tagged with something outside it fails catalog
//! validation instead of silently never matching a search.

use crate::models::{Category, CategoryKind};
use crate::{Error, Result};

/// Ordered set of valid primary and secondary categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    primary: Vec<Category>,
    secondary: Vec<Category>,
}

impl Taxonomy {
    /// Returns the full taxonomy: every [`Category`] in declaration order.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            primary: Category::primary().to_vec(),
            secondary: Category::secondary().to_vec(),
        }
    }

    /// Creates a restricted taxonomy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `primary` is empty, a category is
    /// listed under the wrong kind, or a category appears twice.
    pub fn new(primary: Vec<Category>, secondary: Vec<Category>) -> Result<Self> {
        if primary.is_empty() {
            return Err(Error::InvalidInput(
                "taxonomy must declare at least one primary category".to_string(),
            ));
        }
        check_kind(&primary, CategoryKind::Primary)?;
        check_kind(&secondary, CategoryKind::Secondary)?;

        let mut seen = std::collections::HashSet::new();
        for category in primary.iter().chain(secondary.iter()) {
            if !seen.insert(*category) {
                return Err(Error::InvalidInput(format!(
                    "taxonomy lists '{category}' more than once"
                )));
            }
        }

        Ok(Self { primary, secondary })
    }

    /// Creates a restricted taxonomy from category names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] for a name that is not a category,
    /// or any error from [`Taxonomy::new`].
    pub fn from_names<S: AsRef<str>>(primary: &[S], secondary: &[S]) -> Result<Self> {
        let parse = |names: &[S]| -> Result<Vec<Category>> {
            names.iter().map(|name| name.as_ref().parse()).collect()
        };
        Self::new(parse(primary)?, parse(secondary)?)
    }

    /// Returns the primary categories in listing order.
    #[must_use]
    pub fn primary_categories(&self) -> &[Category] {
        &self.primary
    }

    /// Returns the secondary categories in listing order.
    #[must_use]
    pub fn secondary_categories(&self) -> &[Category] {
        &self.secondary
    }

    /// Iterates primaries then secondaries.
    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.primary.iter().chain(self.secondary.iter()).copied()
    }

    /// Returns true if `category` belongs to this taxonomy.
    #[must_use]
    pub fn is_valid(&self, category: Category) -> bool {
        let pool = match category.kind() {
            CategoryKind::Primary => &self.primary,
            CategoryKind::Secondary => &self.secondary,
        };
        pool.contains(&category)
    }

    /// Parses a category name and checks it against the taxonomy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCategory`] if the name is not a category or
    /// the category is excluded from this taxonomy.
    pub fn parse(&self, name: &str) -> Result<Category> {
        let category: Category = name.parse()?;
        if self.is_valid(category) {
            Ok(category)
        } else {
            Err(Error::UnknownCategory(category.to_string()))
        }
    }

    /// Returns the category names, sorted, for error messages.
    #[must_use]
    pub fn allowed_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.categories().map(|c| c.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_kind(categories: &[Category], expected: CategoryKind) -> Result<()> {
    match categories.iter().find(|c| c.kind() != expected) {
        Some(category) => Err(Error::InvalidInput(format!(
            "'{category}' is a {} category, not {expected}",
            category.kind()
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_covers_every_category() {
        let taxonomy = Taxonomy::standard();
        assert_eq!(taxonomy.primary_categories().len(), 9);
        assert_eq!(taxonomy.secondary_categories().len(), 8);
        assert!(Category::all().iter().all(|c| taxonomy.is_valid(*c)));
    }

    #[test]
    fn test_restricted_taxonomy() {
        let taxonomy = Taxonomy::from_names(&["player", "team"], &["statistics"]).unwrap();
        assert!(taxonomy.is_valid(Category::Player));
        assert!(!taxonomy.is_valid(Category::Game));
        assert!(!taxonomy.is_valid(Category::Video));
        assert_eq!(
            taxonomy.categories().collect::<Vec<_>>(),
            vec![Category::Player, Category::Team, Category::Statistics]
        );
    }

    #[test]
    fn test_empty_primary_rejected() {
        let err = Taxonomy::new(vec![], vec![Category::Other]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_wrong_kind_rejected() {
        let err = Taxonomy::new(vec![Category::Statistics], vec![]).unwrap_err();
        assert!(err.to_string().contains("secondary"));
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = Taxonomy::new(vec![Category::Team, Category::Team], vec![]).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_parse_respects_restriction() {
        let taxonomy = Taxonomy::new(vec![Category::Player], vec![]).unwrap();
        assert_eq!(taxonomy.parse(" Player ").unwrap(), Category::Player);
        assert!(matches!(
            taxonomy.parse("team"),
            Err(Error::UnknownCategory(name)) if name == "team"
        ));
        assert!(matches!(
            taxonomy.parse("not_a_real_category"),
            Err(Error::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_allowed_names_sorted() {
        let names = Taxonomy::standard().allowed_names();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.contains(&"boxscore"));
    }
}
