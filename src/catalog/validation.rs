//! Catalog validation.
//!
//! Every rule here is fatal: a catalog with one bad tool never loads.

use super::definition::{ParamType, ToolDefinition, build_input_schema};
use crate::models::{Category, DispatchHandle, ToolDescriptor, display_name_from_id};
use crate::taxonomy::Taxonomy;
use crate::{Error, Result};
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

/// Tool ids are snake_case identifiers.
static TOOL_ID_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").ok());

/// Converts a raw definition into a validated descriptor.
///
/// `position` identifies the entry in error messages when its id is empty.
///
/// # Errors
///
/// Returns [`Error::Validation`] when the id, description, dispatch handle,
/// categories or parameters are malformed.
pub fn validate_definition(
    definition: &ToolDefinition,
    position: usize,
    taxonomy: &Taxonomy,
) -> Result<ToolDescriptor> {
    let id = definition.id.trim();
    if id.is_empty() {
        return Err(invalid(&format!("#{position}"), "id is empty"));
    }
    if !is_valid_tool_id(id) {
        return Err(invalid(id, "id must be snake_case ([a-z][a-z0-9_]*)"));
    }
    if definition.description.trim().is_empty() {
        return Err(invalid(id, "description is empty"));
    }
    if definition.dispatch.trim().is_empty() {
        return Err(invalid(id, "dispatch handle is empty"));
    }

    let mut categories = BTreeSet::new();
    for name in &definition.categories {
        let category = Category::parse(name)
            .filter(|c| taxonomy.is_valid(*c))
            .ok_or_else(|| {
                invalid(
                    id,
                    &format!("category '{}' is not in the taxonomy", name.trim()),
                )
            })?;
        if !categories.insert(category) {
            return Err(invalid(id, &format!("category '{category}' listed twice")));
        }
    }

    let mut names = HashSet::new();
    for param in &definition.params {
        let name = param.name.trim();
        if name.is_empty() {
            return Err(invalid(id, "parameter with empty name"));
        }
        if !names.insert(name) {
            return Err(invalid(id, &format!("parameter '{name}' declared twice")));
        }
        if ParamType::parse(&param.kind).is_none() {
            return Err(invalid(
                id,
                &format!("parameter '{name}' has unknown type '{}'", param.kind),
            ));
        }
    }

    let display_name = definition
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map_or_else(|| display_name_from_id(id), ToString::to_string);

    let descriptor = ToolDescriptor {
        id: id.to_string(),
        display_name,
        description: definition.description.trim().to_string(),
        categories,
        parameter_schema: build_input_schema(&definition.params),
        dispatch_handle: DispatchHandle::new(definition.dispatch.trim()),
    };
    validate_descriptor(&descriptor, taxonomy)?;
    Ok(descriptor)
}

/// Checks the category cardinality rules on a descriptor.
///
/// # Errors
///
/// Returns [`Error::Validation`] if the tool has no categories, no primary
/// category, or a category outside `taxonomy`.
pub fn validate_descriptor(descriptor: &ToolDescriptor, taxonomy: &Taxonomy) -> Result<()> {
    let id = descriptor.id.as_str();
    if descriptor.categories.is_empty() {
        return Err(invalid(id, "tool has no categories"));
    }
    if let Some(outside) = descriptor.categories.iter().find(|c| !taxonomy.is_valid(**c)) {
        return Err(invalid(
            id,
            &format!("category '{outside}' is not in the taxonomy"),
        ));
    }
    if descriptor.primary_categories().next().is_none() {
        return Err(invalid(id, "tool has no primary category"));
    }
    Ok(())
}

/// Returns true if `id` is a well-formed tool id.
#[must_use]
pub fn is_valid_tool_id(id: &str) -> bool {
    TOOL_ID_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(id))
}

fn invalid(tool: &str, reason: &str) -> Error {
    Error::Validation {
        tool: tool.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::definition::ParamDefinition;
    use test_case::test_case;

    fn definition(id: &str, categories: &[&str]) -> ToolDefinition {
        ToolDefinition {
            id: id.to_string(),
            name: None,
            description: "Get something.".to_string(),
            categories: categories.iter().map(ToString::to_string).collect(),
            dispatch: "endpoint.Endpoint".to_string(),
            params: Vec::new(),
        }
    }

    #[test]
    fn test_valid_definition() {
        let def = definition("get_franchise_history", &["franchise", "team", "historical"]);
        let descriptor = validate_definition(&def, 0, &Taxonomy::standard()).unwrap();
        assert_eq!(descriptor.display_name, "Franchise History");
        assert_eq!(descriptor.categories.len(), 3);
        assert_eq!(descriptor.dispatch_handle.as_str(), "endpoint.Endpoint");
    }

    #[test_case(&[], "no categories"; "no categories")]
    #[test_case(&["statistics"], "no primary category"; "only modifiers")]
    #[test_case(&["player", "stats"], "not in the taxonomy"; "typo")]
    #[test_case(&["player", "PLAYER"], "listed twice"; "duplicate")]
    fn test_category_rules(categories: &[&str], expected: &str) {
        let err = validate_definition(&definition("get_x", categories), 0, &Taxonomy::standard())
            .unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "expected '{expected}' in '{err}'"
        );
    }

    #[test]
    fn test_category_excluded_by_restricted_taxonomy() {
        let taxonomy = Taxonomy::new(vec![Category::Game], vec![]).unwrap();
        let def = definition("get_video_events", &["game", "video"]);
        let err = validate_definition(&def, 0, &taxonomy).unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test_case("", "id is empty"; "empty id")]
    #[test_case("GetRoster", "snake_case"; "camel case id")]
    #[test_case("get roster", "snake_case"; "space in id")]
    fn test_id_rules(id: &str, expected: &str) {
        let err = validate_definition(&definition(id, &["team"]), 3, &Taxonomy::standard())
            .unwrap_err();
        assert!(err.to_string().contains(expected));
    }

    #[test]
    fn test_empty_id_reports_position() {
        let err = validate_definition(&definition(" ", &["team"]), 7, &Taxonomy::standard())
            .unwrap_err();
        assert!(matches!(err, Error::Validation { tool, .. } if tool == "#7"));
    }

    #[test]
    fn test_parameter_rules() {
        let mut def = definition("get_x", &["game"]);
        def.params = vec![
            ParamDefinition {
                name: "game_id".to_string(),
                kind: "string".to_string(),
                description: String::new(),
                required: true,
                default: None,
            },
            ParamDefinition {
                name: "game_id".to_string(),
                kind: "string".to_string(),
                description: String::new(),
                required: false,
                default: None,
            },
        ];
        let err = validate_definition(&def, 0, &Taxonomy::standard()).unwrap_err();
        assert!(err.to_string().contains("declared twice"));

        def.params.truncate(1);
        def.params[0].kind = "object".to_string();
        let err = validate_definition(&def, 0, &Taxonomy::standard()).unwrap_err();
        assert!(err.to_string().contains("unknown type"));
    }

    #[test]
    fn test_explicit_display_name_kept() {
        let mut def = definition("get_scoreboard", &["game"]);
        def.name = Some("Daily Scoreboard".to_string());
        let descriptor = validate_definition(&def, 0, &Taxonomy::standard()).unwrap();
        assert_eq!(descriptor.display_name, "Daily Scoreboard");
    }

    #[test]
    fn test_empty_dispatch_rejected() {
        let mut def = definition("get_scoreboard", &["game"]);
        def.dispatch = "  ".to_string();
        let err = validate_definition(&def, 0, &Taxonomy::standard()).unwrap_err();
        assert!(err.to_string().contains("dispatch"));
    }
}
