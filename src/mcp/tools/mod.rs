//! Discovery meta-tools.
//!
//! An agent is given these four tools instead of the full statistics
//! catalog. It lists categories, drills into the ones it needs, and asks for
//! the full definition of the tool it picked.
//!
//! # Module Structure
//!
//! - [`definitions`]: Tool schema definitions (JSON Schema for input validation)

mod definitions;

use super::tool_types::{
    DescribeToolArgs, KindFilter, ListCategoriesArgs, ListToolsArgs, MAX_QUERY_LENGTH,
    SearchToolsArgs, parse_args, parse_kind_filter, parse_search_mode, validate_category_count,
    validate_input_length,
};
use crate::models::{CategoryCount, CategoryKind, ToolSummary};
use crate::registry::CatalogRegistry;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Meta-tool names in listing order.
pub const META_TOOL_NAMES: [&str; 4] = [
    "list_tool_categories",
    "list_tools_in_category",
    "search_tools",
    "describe_tool",
];

/// Registry of the discovery meta-tools.
pub struct DiscoveryTools {
    /// Source of the current catalog snapshot.
    registry: Arc<CatalogRegistry>,
    /// Available tools, in [`META_TOOL_NAMES`] order.
    tools: Vec<ToolDefinition>,
}

impl DiscoveryTools {
    /// Creates the meta-tools over `registry`.
    ///
    /// Each call takes a fresh snapshot, so reloads are picked up. Schemas
    /// advertise the registry's taxonomy, which reloads keep.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] if the current snapshot cannot be
    /// read.
    pub fn new(registry: Arc<CatalogRegistry>) -> Result<Self> {
        let snapshot = registry.snapshot()?;
        let taxonomy = snapshot.taxonomy();
        let tools = vec![
            definitions::list_tool_categories_tool(),
            definitions::list_tools_in_category_tool(taxonomy),
            definitions::search_tools_tool(taxonomy),
            definitions::describe_tool_tool(),
        ];
        Ok(Self { registry, tools })
    }

    /// Returns all tool definitions.
    #[must_use]
    pub fn list_tools(&self) -> Vec<&ToolDefinition> {
        self.tools.iter().collect()
    }

    /// Gets a tool definition by name.
    #[must_use]
    pub fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|tool| tool.name == name)
    }

    /// Executes a meta-tool with the given arguments.
    ///
    /// Query errors (unknown category or tool, empty search) come back as a
    /// result with `is_error` set so the agent can correct itself.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an unknown meta-tool or malformed
    /// arguments, and [`Error::OperationFailed`] if the catalog snapshot is
    /// unavailable.
    pub fn execute(&self, name: &str, arguments: Value) -> Result<ToolResult> {
        let outcome = match name {
            "list_tool_categories" => self.execute_list_categories(arguments),
            "list_tools_in_category" => self.execute_list_tools(arguments),
            "search_tools" => self.execute_search(arguments),
            "describe_tool" => self.execute_describe(arguments),
            _ => return Err(Error::InvalidInput(format!("Unknown tool: {name}"))),
        };

        match outcome {
            Ok(result) => Ok(result),
            Err(e) if e.is_query_error() => {
                debug!(tool = name, error = %e, "Meta-tool query rejected");
                Ok(ToolResult::error(&e))
            },
            Err(e) => Err(e),
        }
    }

    fn execute_list_categories(&self, arguments: Value) -> Result<ToolResult> {
        let args: ListCategoriesArgs = parse_args(arguments)?;
        let filter = parse_kind_filter(args.kind.as_deref())?;
        let engine = self.registry.engine()?;

        let categories: Vec<CategoryCount> = match filter {
            KindFilter::Only(CategoryKind::Primary) => engine.list_top_level_categories(),
            KindFilter::Only(CategoryKind::Secondary) => engine.list_secondary_categories(),
            KindFilter::All => {
                let mut all = engine.list_top_level_categories();
                all.extend(engine.list_secondary_categories());
                all
            },
        };

        ToolResult::json(&json!({
            "total_tools": engine.snapshot().catalog().len(),
            "categories": categories,
        }))
    }

    fn execute_list_tools(&self, arguments: Value) -> Result<ToolResult> {
        let args: ListToolsArgs = parse_args(arguments)?;
        validate_category_count(&args.categories)?;
        let tools = self.registry.engine()?.load_categories(&args.categories)?;
        ToolResult::json(&tool_listing(&tools))
    }

    fn execute_search(&self, arguments: Value) -> Result<ToolResult> {
        let args: SearchToolsArgs = parse_args(arguments)?;
        let mode = parse_search_mode(args.mode.as_deref())?;
        let engine = self.registry.engine()?;

        let by_category = match args.categories.as_deref() {
            Some(names) if !names.is_empty() => {
                validate_category_count(names)?;
                Some(engine.search_by_names(names, mode)?)
            },
            _ => None,
        };
        let by_keyword = match args.query.as_deref() {
            Some(query) if !query.trim().is_empty() => {
                validate_input_length(query, "query", MAX_QUERY_LENGTH)?;
                Some(engine.find(query)?)
            },
            _ => None,
        };

        let tools = match (by_category, by_keyword) {
            (Some(tagged), Some(matched)) => {
                let keep: HashSet<&str> = matched.iter().map(|t| t.id.as_str()).collect();
                tagged
                    .into_iter()
                    .filter(|t| keep.contains(t.id.as_str()))
                    .collect()
            },
            (Some(tools), None) | (None, Some(tools)) => tools,
            (None, None) => return Err(Error::EmptyQuery),
        };
        ToolResult::json(&tool_listing(&tools))
    }

    fn execute_describe(&self, arguments: Value) -> Result<ToolResult> {
        let args: DescribeToolArgs = parse_args(arguments)?;
        let tool = self.registry.resolver()?.resolve(args.tool_id.trim())?;
        ToolResult::json(&json!({
            "id": tool.id,
            "name": tool.display_name,
            "description": tool.description,
            "categories": tool.categories,
            "input_schema": tool.parameter_schema,
        }))
    }
}

fn tool_listing(tools: &[ToolSummary]) -> Value {
    json!({
        "count": tools.len(),
        "tools": tools,
    })
}

/// Definition of an MCP tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Tool name.
    pub name: String,
    /// Tool description.
    pub description: String,
    /// JSON Schema for input validation.
    pub input_schema: Value,
}

/// Result of a tool execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    /// Content returned by the tool.
    pub content: Vec<ToolContent>,
    /// Whether the result represents an error.
    #[serde(default)]
    pub is_error: bool,
}

impl ToolResult {
    /// Wraps a serializable value as pretty JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` fails to serialize.
    pub fn json<T: Serialize>(value: &T) -> Result<Self> {
        let text = serde_json::to_string_pretty(value).map_err(|e| Error::OperationFailed {
            operation: "serialize_tool_result".to_string(),
            cause: e.to_string(),
        })?;
        Ok(Self {
            content: vec![ToolContent::Text { text }],
            is_error: false,
        })
    }

    /// Builds an error result carrying the error message.
    #[must_use]
    pub fn error(error: &Error) -> Self {
        Self {
            content: vec![ToolContent::Text {
                text: error.to_string(),
            }],
            is_error: true,
        }
    }

    /// Returns the first text content, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content
            .first()
            .map(|ToolContent::Text { text }| text.as_str())
    }
}

/// Content types that can be returned by tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolContent {
    /// Text content.
    Text {
        /// The text content.
        text: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogSource, SourceFormat};
    use crate::models::Category;
    use crate::taxonomy::Taxonomy;

    const FIXTURE: &str = r#"
[[tools]]
id = "get_team_roster"
description = "Get team roster and coach information."
categories = ["team"]
dispatch = "commonteamroster.CommonTeamRoster"

[[tools.params]]
name = "team_name"
required = true

[[tools]]
id = "get_player_career_stats_full"
description = "Get complete career statistics for a player."
categories = ["player", "statistics"]
dispatch = "playercareerstats.PlayerCareerStats"

[[tools]]
id = "get_team_stats"
description = "Team statistics for a season."
categories = ["team", "statistics"]
dispatch = "teamdashboardbygeneralsplits.TeamDashboardByGeneralSplits"
"#;

    fn tools_with(taxonomy: Taxonomy) -> DiscoveryTools {
        let source = CatalogSource::Inline {
            format: SourceFormat::Toml,
            contents: FIXTURE.to_string(),
        };
        let registry = CatalogRegistry::from_source(&source, taxonomy).unwrap();
        DiscoveryTools::new(Arc::new(registry)).unwrap()
    }

    fn tools() -> DiscoveryTools {
        tools_with(Taxonomy::standard())
    }

    fn advertised(tools: &DiscoveryTools, name: &str) -> Vec<String> {
        tools.get_tool(name).unwrap().input_schema["properties"]["categories"]["items"]["enum"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap().to_string())
            .collect()
    }

    fn payload(result: &ToolResult) -> Value {
        serde_json::from_str(result.text().unwrap()).unwrap()
    }

    #[test]
    fn test_definitions() {
        let tools = tools();
        let names: Vec<_> = tools.list_tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, META_TOOL_NAMES);

        let describe = tools.get_tool("describe_tool").unwrap();
        assert_eq!(describe.input_schema["required"], json!(["tool_id"]));
        assert!(tools.get_tool("get_team_roster").is_none());
    }

    #[test]
    fn test_list_categories() {
        let result = tools().execute("list_tool_categories", Value::Null).unwrap();
        assert!(!result.is_error);
        let body = payload(&result);
        assert_eq!(body["total_tools"], 3);
        assert_eq!(body["categories"].as_array().unwrap().len(), 9);
        assert_eq!(body["categories"][1]["category"], "team");
        assert_eq!(body["categories"][1]["count"], 2);

        let all = tools()
            .execute("list_tool_categories", json!({"kind": "all"}))
            .unwrap();
        assert_eq!(payload(&all)["categories"].as_array().unwrap().len(), 17);
    }

    #[test]
    fn test_list_tools_in_category() {
        let result = tools()
            .execute("list_tools_in_category", json!({"categories": ["Team"]}))
            .unwrap();
        let body = payload(&result);
        assert_eq!(body["count"], 2);
        assert_eq!(body["tools"][0]["id"], "get_team_roster");
    }

    #[test]
    fn test_search_tags_and_keyword() {
        let tools = tools();
        let result = tools
            .execute(
                "search_tools",
                json!({"categories": ["team", "statistics"], "mode": "all"}),
            )
            .unwrap();
        assert_eq!(payload(&result)["tools"][0]["id"], "get_team_stats");

        let result = tools
            .execute(
                "search_tools",
                json!({"categories": ["statistics"], "query": "career"}),
            )
            .unwrap();
        let body = payload(&result);
        assert_eq!(body["count"], 1);
        assert_eq!(body["tools"][0]["id"], "get_player_career_stats_full");
    }

    #[test]
    fn test_query_errors_become_error_results() {
        let tools = tools();
        let empty = tools.execute("search_tools", json!({})).unwrap();
        assert!(empty.is_error);
        assert!(empty.text().unwrap().contains("at least one category"));

        let unknown = tools
            .execute("list_tools_in_category", json!({"categories": ["teams"]}))
            .unwrap();
        assert!(unknown.is_error);
        assert!(unknown.text().unwrap().contains("valid categories"));

        let modifier = tools
            .execute("list_tools_in_category", json!({"categories": ["statistics"]}))
            .unwrap();
        assert!(modifier.is_error);

        let missing = tools
            .execute("describe_tool", json!({"tool_id": "nonexistent_tool"}))
            .unwrap();
        assert!(missing.is_error);
    }

    #[test]
    fn test_describe_tool() {
        let result = tools()
            .execute("describe_tool", json!({"tool_id": "get_team_roster"}))
            .unwrap();
        let body = payload(&result);
        assert_eq!(body["name"], "Team Roster");
        assert_eq!(body["input_schema"]["required"], json!(["team_name"]));
    }

    #[test]
    fn test_invalid_input_is_err() {
        let tools = tools();
        assert!(matches!(
            tools.execute("call_everything", Value::Null),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            tools.execute("search_tools", json!({"categories": ["team"], "mode": "xor"})),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            tools.execute("describe_tool", json!({"id": "get_team_roster"})),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_schemas_list_standard_taxonomy() {
        let tools = tools();
        assert_eq!(advertised(&tools, "search_tools").len(), 17);

        let listable = advertised(&tools, "list_tools_in_category");
        assert_eq!(listable.len(), 9);
        assert_eq!(listable[0], "player");
        assert!(!listable.contains(&"statistics".to_string()));
    }

    #[test]
    fn test_schemas_list_restricted_taxonomy() {
        let taxonomy = Taxonomy::new(
            vec![Category::Player, Category::Team],
            vec![Category::Statistics, Category::Historical],
        )
        .unwrap();
        let tools = tools_with(taxonomy);

        let searchable = advertised(&tools, "search_tools");
        assert_eq!(searchable, ["player", "team", "statistics", "historical"]);
        assert_eq!(advertised(&tools, "list_tools_in_category"), ["player", "team"]);

        for name in &searchable {
            let result = tools
                .execute("search_tools", json!({"categories": [name]}))
                .unwrap();
            assert!(!result.is_error, "{name} rejected");
        }
        let video = tools
            .execute("search_tools", json!({"categories": ["video"]}))
            .unwrap();
        assert!(video.is_error);
    }
}
