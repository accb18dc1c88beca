//! Category types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tool classification tag.
///
/// The set is closed: a name that does not parse to one of these variants is
/// a configuration error, never a runtime-discoverable category. Declaration
/// order is the canonical listing order (primaries first).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Player-specific statistics and information.
    Player,
    /// Team-specific statistics and information.
    Team,
    /// League-wide statistics and standings.
    League,
    /// Game-specific data and events.
    Game,
    /// Box score variants for games.
    Boxscore,
    /// Draft-related data.
    Draft,
    /// Franchise history and leaders.
    Franchise,
    /// Playoff-specific data.
    Playoff,
    /// Season schedules and in-season tournament standings.
    Season,
    /// Statistical aggregates.
    Statistics,
    /// All-time and multi-season history.
    Historical,
    /// Player and ball tracking data.
    Tracking,
    /// Advanced and estimated metrics.
    Advanced,
    /// Shot locations and shooting detail.
    Shooting,
    /// Draft combine measurements and drills.
    Combine,
    /// Video availability and events.
    Video,
    /// Anything that fits no other modifier.
    Other,
}

/// Whether a category is a top-level group or a refinement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Top-level classification; every tool carries at least one.
    Primary,
    /// Modifier narrowing a primary category.
    Secondary,
}

impl Category {
    /// Returns all categories in declaration order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Player,
            Self::Team,
            Self::League,
            Self::Game,
            Self::Boxscore,
            Self::Draft,
            Self::Franchise,
            Self::Playoff,
            Self::Season,
            Self::Statistics,
            Self::Historical,
            Self::Tracking,
            Self::Advanced,
            Self::Shooting,
            Self::Combine,
            Self::Video,
            Self::Other,
        ]
    }

    /// Returns the primary categories in declaration order.
    #[must_use]
    pub const fn primary() -> &'static [Self] {
        &[
            Self::Player,
            Self::Team,
            Self::League,
            Self::Game,
            Self::Boxscore,
            Self::Draft,
            Self::Franchise,
            Self::Playoff,
            Self::Season,
        ]
    }

    /// Returns the secondary (modifier) categories in declaration order.
    #[must_use]
    pub const fn secondary() -> &'static [Self] {
        &[
            Self::Statistics,
            Self::Historical,
            Self::Tracking,
            Self::Advanced,
            Self::Shooting,
            Self::Combine,
            Self::Video,
            Self::Other,
        ]
    }

    /// Returns the category as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Player => "player",
            Self::Team => "team",
            Self::League => "league",
            Self::Game => "game",
            Self::Boxscore => "boxscore",
            Self::Draft => "draft",
            Self::Franchise => "franchise",
            Self::Playoff => "playoff",
            Self::Season => "season",
            Self::Statistics => "statistics",
            Self::Historical => "historical",
            Self::Tracking => "tracking",
            Self::Advanced => "advanced",
            Self::Shooting => "shooting",
            Self::Combine => "combine",
            Self::Video => "video",
            Self::Other => "other",
        }
    }

    /// Returns the kind of this category.
    #[must_use]
    pub const fn kind(&self) -> CategoryKind {
        match self {
            Self::Player
            | Self::Team
            | Self::League
            | Self::Game
            | Self::Boxscore
            | Self::Draft
            | Self::Franchise
            | Self::Playoff
            | Self::Season => CategoryKind::Primary,
            Self::Statistics
            | Self::Historical
            | Self::Tracking
            | Self::Advanced
            | Self::Shooting
            | Self::Combine
            | Self::Video
            | Self::Other => CategoryKind::Secondary,
        }
    }

    /// Returns true if this is a primary category.
    #[must_use]
    pub const fn is_primary(&self) -> bool {
        matches!(self.kind(), CategoryKind::Primary)
    }

    /// Returns a one-line description suitable for showing to an agent.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Player => "Player-specific statistics and information",
            Self::Team => "Team-specific statistics and information",
            Self::League => "League-wide statistics and standings",
            Self::Game => "Game-specific data and events",
            Self::Boxscore => "Box score variants for games",
            Self::Draft => "Draft-related data",
            Self::Franchise => "Franchise history and leaders",
            Self::Playoff => "Playoff-specific data",
            Self::Season => "Season schedules and IST standings",
            Self::Statistics => "Statistical aggregates and leaderboards",
            Self::Historical => "All-time and multi-season history",
            Self::Tracking => "Player tracking and hustle data",
            Self::Advanced => "Advanced and estimated metrics",
            Self::Shooting => "Shot charts and shooting detail",
            Self::Combine => "Draft combine measurements and drills",
            Self::Video => "Video availability and events",
            Self::Other => "Miscellaneous endpoints",
        }
    }

    /// Parses a category from a string.
    ///
    /// Case-insensitive; surrounding whitespace is ignored.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|category| category.as_str() == normalized)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::Error::UnknownCategory(s.trim().to_string()))
    }
}

impl CategoryKind {
    /// Returns the kind as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("player", Some(Category::Player); "lowercase")]
    #[test_case("TEAM", Some(Category::Team); "uppercase")]
    #[test_case("  Historical ", Some(Category::Historical); "padded mixed case")]
    #[test_case("teams", None; "plural typo")]
    #[test_case("base", None; "meta category is not a tool category")]
    #[test_case("", None; "empty")]
    fn test_category_parse(input: &str, expected: Option<Category>) {
        assert_eq!(Category::parse(input), expected);
    }

    #[test]
    fn test_primary_and_secondary_partition_all() {
        assert_eq!(
            Category::primary().len() + Category::secondary().len(),
            Category::all().len()
        );
        assert!(Category::primary().iter().all(Category::is_primary));
        assert!(!Category::secondary().iter().any(Category::is_primary));
    }

    #[test]
    fn test_as_str_roundtrips() {
        for category in Category::all() {
            assert_eq!(Category::parse(category.as_str()), Some(*category));
        }
    }

    #[test]
    fn test_declaration_order_is_ord() {
        let mut sorted = Category::all().to_vec();
        sorted.sort();
        assert_eq!(sorted, Category::all());
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "bogus".parse::<Category>().unwrap_err();
        assert!(matches!(err, crate::Error::UnknownCategory(name) if name == "bogus"));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Category::Boxscore).unwrap();
        assert_eq!(json, "\"boxscore\"");
        let back: Category = serde_json::from_str("\"video\"").unwrap();
        assert_eq!(back, Category::Video);
    }
}
