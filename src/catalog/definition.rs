//! Raw tool definitions as they appear in a catalog source.
//!
//! These are the untyped, unvalidated shapes deserialized from TOML, YAML or
//! JSON. [`super::validation`] turns them into [`crate::ToolDescriptor`]s.
//!
//! # Security
//!
//! All definition types use `#[serde(deny_unknown_fields)]` so a misspelled
//! key (`catagories`) fails the load instead of being silently dropped.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt;

/// Top-level catalog document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogDocument {
    /// Tool definitions in catalog order.
    #[serde(default)]
    pub tools: Vec<ToolDefinition>,
}

/// One tool as written in a catalog source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolDefinition {
    /// Unique tool id (e.g., `get_team_roster`).
    pub id: String,
    /// Optional display name; derived from the id when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Tool description.
    pub description: String,
    /// Category names.
    #[serde(default)]
    pub categories: Vec<String>,
    /// Dispatch handle for the execution layer.
    pub dispatch: String,
    /// Accepted parameters.
    #[serde(default)]
    pub params: Vec<ParamDefinition>,
}

/// One tool parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamDefinition {
    /// Parameter name.
    pub name: String,
    /// JSON type name: string, integer, number, boolean or array.
    #[serde(rename = "type", default = "default_param_type")]
    pub kind: String,
    /// Parameter description.
    #[serde(default)]
    pub description: String,
    /// Whether the caller must supply it.
    #[serde(default)]
    pub required: bool,
    /// Default value applied by the execution layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

fn default_param_type() -> String {
    ParamType::String.as_str().to_string()
}

/// Supported parameter types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// JSON string.
    String,
    /// JSON integer.
    Integer,
    /// JSON number.
    Number,
    /// JSON boolean.
    Boolean,
    /// JSON array of strings.
    Array,
}

impl ParamType {
    /// Returns the JSON Schema type name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
        }
    }

    /// Parses a parameter type name.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "string" | "str" => Some(Self::String),
            "integer" | "int" => Some(Self::Integer),
            "number" | "float" => Some(Self::Number),
            "boolean" | "bool" => Some(Self::Boolean),
            "array" | "list" => Some(Self::Array),
            _ => None,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Builds the JSON Schema object for a parameter list.
///
/// Parameters must already be validated; unknown type names fall back to
/// `string`.
#[must_use]
pub fn build_input_schema(params: &[ParamDefinition]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for param in params {
        let kind = ParamType::parse(&param.kind).unwrap_or(ParamType::String);
        let mut property = Map::new();
        property.insert("type".to_string(), json!(kind.as_str()));
        if kind == ParamType::Array {
            property.insert("items".to_string(), json!({"type": "string"}));
        }
        if !param.description.is_empty() {
            property.insert("description".to_string(), json!(param.description));
        }
        if let Some(default) = &param.default {
            property.insert("default".to_string(), default.clone());
        }
        properties.insert(param.name.clone(), Value::Object(property));

        if param.required {
            required.push(json!(param.name));
        }
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}
