//! Tool definitions for the discovery meta-tools.
//!
//! Contains the JSON Schema definitions an agent sees instead of the full
//! statistics tool list. Category enums come from the taxonomy the catalog
//! was loaded with.

use super::ToolDefinition;
use crate::models::Category;
use crate::taxonomy::Taxonomy;

/// Defines the category listing tool.
pub fn list_tool_categories_tool() -> ToolDefinition {
    ToolDefinition {
        name: "list_tool_categories".to_string(),
        description: "List NBA statistics tool categories with how many tools each contains. \
            Start here, then load only the categories you need."
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "kind": {
                    "type": "string",
                    "description": "Which categories to list: primary groups (default), secondary modifiers, or all",
                    "enum": ["primary", "secondary", "all"]
                }
            }
        }),
    }
}

/// Defines the per-category tool listing tool.
///
/// Only primary categories can be loaded whole.
pub fn list_tools_in_category_tool(taxonomy: &Taxonomy) -> ToolDefinition {
    ToolDefinition {
        name: "list_tools_in_category".to_string(),
        description: "List the tools in one or more primary categories. Tools from any of \
            the given categories are returned, ordered by id. Use search_tools to narrow by \
            modifiers."
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "categories": {
                    "type": "array",
                    "items": {
                        "type": "string",
                        "enum": category_names(taxonomy.primary_categories())
                    },
                    "description": "Primary category names (case-insensitive)",
                    "minItems": 1
                }
            },
            "required": ["categories"]
        }),
    }
}

/// Defines the multi-tag search tool.
pub fn search_tools_tool(taxonomy: &Taxonomy) -> ToolDefinition {
    ToolDefinition {
        name: "search_tools".to_string(),
        description: "Search tools by category tags and/or keyword. With mode \"all\" a tool \
            must carry every tag (e.g. player AND statistics); with \"any\" at least one."
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "categories": {
                    "type": "array",
                    "items": {
                        "type": "string",
                        "enum": category_names(
                            taxonomy
                                .primary_categories()
                                .iter()
                                .chain(taxonomy.secondary_categories())
                        )
                    },
                    "description": "Category tags to match"
                },
                "mode": {
                    "type": "string",
                    "description": "How tags combine (default: all)",
                    "enum": ["all", "any"]
                },
                "query": {
                    "type": "string",
                    "description": "Keyword matched against tool id, name and description"
                }
            }
        }),
    }
}

/// Defines the tool description tool.
pub fn describe_tool_tool() -> ToolDefinition {
    ToolDefinition {
        name: "describe_tool".to_string(),
        description: "Get the full definition of one tool, including its parameter schema."
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "tool_id": {
                    "type": "string",
                    "description": "Tool id as returned by the listing and search tools"
                }
            },
            "required": ["tool_id"]
        }),
    }
}

fn category_names<'a>(categories: impl IntoIterator<Item = &'a Category>) -> Vec<&'static str> {
    categories.into_iter().map(Category::as_str).collect()
}
