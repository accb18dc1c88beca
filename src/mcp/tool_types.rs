//! Argument types and helpers for the discovery meta-tools.
//!
//! # Security
//!
//! All argument types use `#[serde(deny_unknown_fields)]` so a misspelled or
//! injected field fails the call instead of being ignored.

use crate::models::{CategoryKind, SearchMode};
use crate::{Error, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Maximum allowed length for free-text queries.
pub const MAX_QUERY_LENGTH: usize = 10_240; // 10 KB

/// Maximum number of categories accepted in one call.
pub const MAX_CATEGORIES: usize = 17;

/// Arguments for `list_tool_categories`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListCategoriesArgs {
    /// "primary" (default), "secondary" or "all".
    pub kind: Option<String>,
}

/// Arguments for `list_tools_in_category`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListToolsArgs {
    /// Category names; tools from any of them are returned.
    pub categories: Vec<String>,
}

/// Arguments for `search_tools`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchToolsArgs {
    /// Category tags to match.
    pub categories: Option<Vec<String>>,
    /// "all" (default) or "any".
    pub mode: Option<String>,
    /// Keyword matched against id, name and description.
    pub query: Option<String>,
}

/// Arguments for `describe_tool`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DescribeToolArgs {
    /// Tool id to resolve.
    pub tool_id: String,
}

/// Which category kinds to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    /// One kind only.
    Only(CategoryKind),
    /// Both kinds.
    All,
}

/// Deserializes meta-tool arguments; `null` becomes `{}`.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the arguments do not match `T`.
pub fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T> {
    let arguments = if arguments.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        arguments
    };
    serde_json::from_value(arguments).map_err(|e| Error::InvalidInput(e.to_string()))
}

/// Parses the `kind` argument.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for anything but primary, secondary or all.
pub fn parse_kind_filter(kind: Option<&str>) -> Result<KindFilter> {
    match kind.map(|k| k.trim().to_lowercase()).as_deref() {
        None | Some("primary") => Ok(KindFilter::Only(CategoryKind::Primary)),
        Some("secondary" | "modifier" | "modifiers") => {
            Ok(KindFilter::Only(CategoryKind::Secondary))
        },
        Some("all") => Ok(KindFilter::All),
        Some(other) => Err(Error::InvalidInput(format!(
            "kind must be primary, secondary or all (got '{other}')"
        ))),
    }
}

/// Parses the `mode` argument, defaulting to ALL.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] for an unrecognised mode.
pub fn parse_search_mode(mode: Option<&str>) -> Result<SearchMode> {
    mode.map_or(Ok(SearchMode::All), |m| {
        SearchMode::parse(m)
            .ok_or_else(|| Error::InvalidInput(format!("mode must be all or any (got '{m}')")))
    })
}

/// Validates that a string input does not exceed the maximum allowed length.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the input exceeds `max_length`.
pub fn validate_input_length(input: &str, field_name: &str, max_length: usize) -> Result<()> {
    if input.len() > max_length {
        return Err(Error::InvalidInput(format!(
            "{field_name} exceeds maximum length ({} > {max_length} bytes)",
            input.len()
        )));
    }
    Ok(())
}

/// Rejects oversized category lists.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if more than [`MAX_CATEGORIES`] are given.
pub fn validate_category_count(categories: &[String]) -> Result<()> {
    if categories.len() > MAX_CATEGORIES {
        return Err(Error::InvalidInput(format!(
            "at most {MAX_CATEGORIES} categories may be given ({} provided)",
            categories.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_args_null_is_empty_object() {
        let args: ListCategoriesArgs = parse_args(Value::Null).unwrap();
        assert!(args.kind.is_none());
    }

    #[test]
    fn test_parse_args_rejects_unknown_fields() {
        let err = parse_args::<DescribeToolArgs>(json!({"tool_id": "x", "verbose": true}))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(msg) if msg.contains("verbose")));
    }

    #[test]
    fn test_parse_kind_filter() {
        assert_eq!(
            parse_kind_filter(None).unwrap(),
            KindFilter::Only(CategoryKind::Primary)
        );
        assert_eq!(
            parse_kind_filter(Some("Modifiers")).unwrap(),
            KindFilter::Only(CategoryKind::Secondary)
        );
        assert_eq!(parse_kind_filter(Some("all")).unwrap(), KindFilter::All);
        assert!(parse_kind_filter(Some("tertiary")).is_err());
    }

    #[test]
    fn test_parse_search_mode() {
        assert_eq!(parse_search_mode(None).unwrap(), SearchMode::All);
        assert_eq!(parse_search_mode(Some("ANY")).unwrap(), SearchMode::Any);
        assert!(parse_search_mode(Some("xor")).is_err());
    }

    #[test]
    fn test_length_limits() {
        assert!(validate_input_length("roster", "query", MAX_QUERY_LENGTH).is_ok());
        let long = "x".repeat(MAX_QUERY_LENGTH + 1);
        assert!(validate_input_length(&long, "query", MAX_QUERY_LENGTH).is_err());

        let many: Vec<String> = (0..=MAX_CATEGORIES).map(|i| i.to_string()).collect();
        assert!(validate_category_count(&many).is_err());
    }
}
