//! Protocol-facing adapter.
//!
//! Exposes catalog discovery as a small set of MCP-style meta-tools so an
//! agent can explore the statistics tools progressively instead of receiving
//! all of them up front.
//!
//! ## Features
//!
//! - **Tools**: `list_tool_categories`, `list_tools_in_category`, `search_tools`, `describe_tool`
//! - **Results**: JSON text content; query errors are returned with `is_error` set
//!
//! Transport, authentication and serialization onto the wire belong to the
//! embedding server.

mod tool_types;
mod tools;

pub use tool_types::{
    DescribeToolArgs, ListCategoriesArgs, ListToolsArgs, MAX_CATEGORIES, MAX_QUERY_LENGTH,
    SearchToolsArgs,
};
pub use tools::{DiscoveryTools, META_TOOL_NAMES, ToolContent, ToolDefinition, ToolResult};
