//! Catalog definition sources.

use super::definition::CatalogDocument;
use crate::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// The builtin NBA statistics catalog.
pub const BUILTIN_CATALOG: &str = include_str!("../../catalog/nba_tools.toml");

/// Encoding of a catalog document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// TOML (`.toml`).
    Toml,
    /// YAML (`.yaml`, `.yml`).
    Yaml,
    /// JSON (`.json`).
    Json,
}

impl SourceFormat {
    /// Detects the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or unsupported.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(Error::OperationFailed {
                operation: "detect_catalog_format".to_string(),
                cause: format!(
                    "{}: unsupported extension '{other}' (expected toml, yaml, yml or json)",
                    path.display()
                ),
            }),
        }
    }

    /// Returns the format name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }

    /// Parses a catalog document in this format.
    ///
    /// # Errors
    ///
    /// Returns an error if the contents do not deserialize.
    pub fn parse(self, contents: &str) -> Result<CatalogDocument> {
        let parsed = match self {
            Self::Toml => toml::from_str(contents).map_err(|e| e.to_string()),
            Self::Yaml => serde_yaml_ng::from_str(contents).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(contents).map_err(|e| e.to_string()),
        };
        parsed.map_err(|cause| Error::OperationFailed {
            operation: format!("parse_catalog_{}", self.as_str()),
            cause,
        })
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Where a catalog is loaded from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogSource {
    /// The catalog compiled into the binary.
    #[default]
    Builtin,
    /// A definition file; format chosen by extension.
    File(PathBuf),
    /// In-memory contents.
    Inline {
        /// Encoding of `contents`.
        format: SourceFormat,
        /// The document text.
        contents: String,
    },
}

impl CatalogSource {
    /// Creates a file source.
    #[must_use]
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Reads and parses the source into a raw document.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the document does not
    /// parse.
    pub fn read(&self) -> Result<CatalogDocument> {
        match self {
            Self::Builtin => SourceFormat::Toml.parse(BUILTIN_CATALOG),
            Self::File(path) => {
                let format = SourceFormat::from_path(path)?;
                let contents =
                    std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
                        operation: "read_catalog_file".to_string(),
                        cause: format!("{}: {e}", path.display()),
                    })?;
                format.parse(&contents)
            },
            Self::Inline { format, contents } => format.parse(contents),
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => write!(f, "builtin"),
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Inline { format, .. } => write!(f, "inline {format}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            SourceFormat::from_path(Path::new("tools.TOML")).unwrap(),
            SourceFormat::Toml
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("a/b/tools.yml")).unwrap(),
            SourceFormat::Yaml
        );
        assert_eq!(
            SourceFormat::from_path(Path::new("tools.json")).unwrap(),
            SourceFormat::Json
        );
        assert!(SourceFormat::from_path(Path::new("tools.txt")).is_err());
        assert!(SourceFormat::from_path(Path::new("tools")).is_err());
    }

    #[test]
    fn test_builtin_parses() {
        let document = CatalogSource::Builtin.read().unwrap();
        assert_eq!(document.tools.len(), 83);
    }

    #[test]
    fn test_inline_yaml() {
        let source = CatalogSource::Inline {
            format: SourceFormat::Yaml,
            contents: "tools:\n  - id: get_schedule\n    description: Get league schedule.\n    categories: [season]\n    dispatch: scheduleleaguev2.ScheduleLeagueV2\n".to_string(),
        };
        let document = source.read().unwrap();
        assert_eq!(document.tools[0].id, "get_schedule");
        assert_eq!(document.tools[0].categories, vec!["season"]);
    }

    #[test]
    fn test_parse_error_names_format() {
        let err = SourceFormat::Json.parse("{not json").unwrap_err();
        assert!(err.to_string().contains("parse_catalog_json"));
    }

    #[test]
    fn test_missing_file() {
        let err = CatalogSource::file("/nonexistent/hoopdex/tools.toml")
            .read()
            .unwrap_err();
        assert!(err.to_string().contains("read_catalog_file"));
    }
}
