//! Tool descriptor types.

use super::Category;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Opaque reference to the executable behavior behind a tool.
///
/// The catalog never interprets the handle; the external execution layer
/// maps it to whatever actually fetches the data (for the builtin catalog,
/// an nba_api endpoint such as `commonteamroster.CommonTeamRoster`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DispatchHandle(String);

impl DispatchHandle {
    /// Creates a new dispatch handle.
    #[must_use]
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DispatchHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Full description of one invocable tool.
///
/// Only the resolver hands these out; discovery queries return the lighter
/// [`ToolSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique, stable tool identifier.
    pub id: String,
    /// Human-readable name.
    pub display_name: String,
    /// What the tool returns.
    pub description: String,
    /// At least one primary category plus any modifiers.
    pub categories: BTreeSet<Category>,
    /// JSON Schema of accepted inputs, passed through unchanged.
    pub parameter_schema: Value,
    /// Reference to the executable behavior.
    pub dispatch_handle: DispatchHandle,
}

impl ToolDescriptor {
    /// Returns true if the tool carries `category`.
    #[must_use]
    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    /// Returns the primary categories in declaration order.
    pub fn primary_categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.iter().copied().filter(Category::is_primary)
    }

    /// Returns the secondary categories in declaration order.
    pub fn secondary_categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.iter().copied().filter(|c| !c.is_primary())
    }

    /// Returns the names of parameters the schema marks as required.
    #[must_use]
    pub fn required_parameters(&self) -> Vec<&str> {
        self.parameter_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Projects the descriptor to a summary without schema or handle.
    #[must_use]
    pub fn summary(&self) -> ToolSummary {
        ToolSummary {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            categories: self.categories.iter().copied().collect(),
        }
    }
}

/// Lightweight projection of a [`ToolDescriptor`] returned by discovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSummary {
    /// Tool identifier.
    pub id: String,
    /// Human-readable name.
    pub display_name: String,
    /// What the tool returns.
    pub description: String,
    /// Categories in declaration order.
    pub categories: Vec<Category>,
}

/// Derives a display name from a tool id.
///
/// Drops a leading `get_` and title-cases the remaining words:
/// `get_team_roster` becomes `Team Roster`.
#[must_use]
pub fn display_name_from_id(id: &str) -> String {
    let stem = id.strip_prefix("get_").unwrap_or(id);
    stem.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn roster() -> ToolDescriptor {
        ToolDescriptor {
            id: "get_team_roster".to_string(),
            display_name: "Team Roster".to_string(),
            description: "Get team roster and coach information.".to_string(),
            categories: [Category::Team].into_iter().collect(),
            parameter_schema: json!({
                "type": "object",
                "properties": {
                    "team_name": {"type": "string"},
                    "season": {"type": "string"}
                },
                "required": ["team_name"]
            }),
            dispatch_handle: DispatchHandle::new("commonteamroster.CommonTeamRoster"),
        }
    }

    #[test]
    fn test_display_name_from_id() {
        assert_eq!(display_name_from_id("get_team_roster"), "Team Roster");
        assert_eq!(
            display_name_from_id("get_boxscore_advanced_v3"),
            "Boxscore Advanced V3"
        );
        assert_eq!(display_name_from_id("scoreboard"), "Scoreboard");
        assert_eq!(display_name_from_id("get__double"), "Double");
    }

    #[test]
    fn test_summary_drops_schema_and_handle() {
        let summary = roster().summary();
        assert_eq!(summary.id, "get_team_roster");
        assert_eq!(summary.categories, vec![Category::Team]);
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("parameter_schema").is_none());
        assert!(json.get("dispatch_handle").is_none());
    }

    #[test]
    fn test_required_parameters() {
        assert_eq!(roster().required_parameters(), vec!["team_name"]);
    }

    #[test]
    fn test_category_membership() {
        let mut tool = roster();
        tool.categories.insert(Category::Historical);
        assert!(tool.has_category(Category::Historical));
        assert!(!tool.has_category(Category::Playoff));
        assert_eq!(
            tool.primary_categories().collect::<Vec<_>>(),
            vec![Category::Team]
        );
        assert_eq!(
            tool.secondary_categories().collect::<Vec<_>>(),
            vec![Category::Historical]
        );
    }

    #[test]
    fn test_dispatch_handle_serializes_transparently() {
        let handle = DispatchHandle::new("videoevents.VideoEvents");
        assert_eq!(
            serde_json::to_value(&handle).unwrap(),
            json!("videoevents.VideoEvents")
        );
    }
}
