//! Tool resolution and invocation.
//!
//! The resolver is the only component that hands out full
//! [`ToolDescriptor`]s. Executing a tool belongs to an external
//! [`ToolExecutor`]; the resolver checks the call arguments against the
//! descriptor's parameter schema and passes the dispatch handle through.

use crate::models::{DispatchHandle, ToolDescriptor};
use crate::registry::Snapshot;
use crate::{Error, Result};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Executes the behavior behind a dispatch handle.
///
/// Implemented by the layer that actually fetches statistics data.
pub trait ToolExecutor: Send + Sync {
    /// Runs the tool referenced by `handle` with already-checked arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if execution fails.
    fn execute(&self, handle: &DispatchHandle, arguments: &Map<String, Value>) -> Result<Value>;
}

/// Looks up tools by id.
#[derive(Debug, Clone)]
pub struct ToolResolver {
    snapshot: Arc<Snapshot>,
}

impl ToolResolver {
    /// Creates a resolver over `snapshot`.
    #[must_use]
    pub const fn new(snapshot: Arc<Snapshot>) -> Self {
        Self { snapshot }
    }

    /// Returns the full descriptor for `tool_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTool`] if no tool has `tool_id`.
    #[instrument(skip(self), fields(operation = "resolver.resolve"))]
    pub fn resolve(&self, tool_id: &str) -> Result<Arc<ToolDescriptor>> {
        let result = self
            .snapshot
            .catalog()
            .get(tool_id)
            .cloned()
            .ok_or_else(|| Error::UnknownTool(tool_id.to_string()));
        let status = if result.is_ok() { "success" } else { "error" };
        metrics::counter!("hoopdex_resolve_total", "status" => status).increment(1);
        result
    }

    /// Resolves `tool_id`, checks `arguments` and runs it through `executor`.
    ///
    /// `Null` arguments are treated as an empty object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTool`] for an unknown id,
    /// [`Error::InvalidInput`] if the arguments are not an object, miss a
    /// required parameter or name an undeclared one, and any error from the
    /// executor.
    #[instrument(skip(self, arguments, executor), fields(operation = "resolver.invoke"))]
    pub fn invoke(
        &self,
        tool_id: &str,
        arguments: Value,
        executor: &dyn ToolExecutor,
    ) -> Result<Value> {
        let tool = self.resolve(tool_id)?;
        let arguments = match arguments {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(Error::InvalidInput(format!(
                    "arguments for '{tool_id}' must be an object, got {}",
                    json_type(&other)
                )));
            },
        };
        check_arguments(&tool, &arguments)?;

        debug!(
            tool = %tool.id,
            handle = %tool.dispatch_handle,
            arguments = arguments.len(),
            "Dispatching tool"
        );
        executor.execute(&tool.dispatch_handle, &arguments)
    }
}

/// Checks required and undeclared parameters.
///
/// Value types are left to the executor.
fn check_arguments(tool: &ToolDescriptor, arguments: &Map<String, Value>) -> Result<()> {
    let missing: Vec<&str> = tool
        .required_parameters()
        .into_iter()
        .filter(|name| arguments.get(*name).is_none_or(Value::is_null))
        .collect();
    if !missing.is_empty() {
        return Err(Error::InvalidInput(format!(
            "'{}' is missing required parameter(s): {}",
            tool.id,
            missing.join(", ")
        )));
    }

    let declared = tool
        .parameter_schema
        .get("properties")
        .and_then(Value::as_object);
    let mut unknown: Vec<&str> = arguments
        .keys()
        .filter(|name| !declared.is_some_and(|props| props.contains_key(*name)))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        unknown.sort_unstable();
        return Err(Error::InvalidInput(format!(
            "'{}' does not accept parameter(s): {}",
            tool.id,
            unknown.join(", ")
        )));
    }
    Ok(())
}

const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
