//! Data models for the tool catalog.
//!
//! This module contains the core types:
//! - [`Category`] and [`CategoryKind`]: the closed tag enumeration
//! - [`ToolDescriptor`] and [`ToolSummary`]: full and projected tool views
//! - [`DispatchHandle`]: opaque link to the execution layer
//! - [`SearchMode`] and [`CategoryCount`]: query inputs and listing outputs

mod category;
mod search;
mod tool;

pub use category::{Category, CategoryKind};
pub use search::{CategoryCount, SearchMode};
pub use tool::{DispatchHandle, ToolDescriptor, ToolSummary, display_name_from_id};
