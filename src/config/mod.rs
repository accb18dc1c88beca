//! Configuration management.

use crate::catalog::CatalogSource;
use crate::models::Category;
use crate::registry::CatalogRegistry;
use crate::taxonomy::Taxonomy;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming an external catalog file.
pub const ENV_CATALOG_PATH: &str = "HOOPDEX_CATALOG_PATH";
/// Environment variable selecting the log format.
pub const ENV_LOG_FORMAT: &str = "HOOPDEX_LOG_FORMAT";
/// Environment variable holding the log filter directive.
pub const ENV_LOG_FILTER: &str = "HOOPDEX_LOG";
/// Environment variable naming the config file.
pub const ENV_CONFIG_PATH: &str = "HOOPDEX_CONFIG_PATH";

/// Main configuration for hoopdex.
#[derive(Debug, Clone, Default)]
pub struct HoopdexConfig {
    /// External catalog definition file; `None` uses the builtin catalog.
    pub catalog_path: Option<PathBuf>,
    /// Categories the catalog may use.
    pub taxonomy: Taxonomy,
    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Logging section of the config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct LoggingSettings {
    /// "pretty" or "json".
    pub format: Option<String>,
    /// `EnvFilter` directive (e.g., `hoopdex=debug`).
    pub filter: Option<String>,
    /// Append logs to this file instead of stderr.
    pub file: Option<PathBuf>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Catalog definition file.
    pub catalog_path: Option<String>,
    /// Restricted taxonomy.
    pub taxonomy: Option<ConfigFileTaxonomy>,
    /// Logging configuration.
    pub logging: Option<LoggingSettings>,
}

/// Taxonomy section in config file.
///
/// A missing list keeps every category of that kind.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileTaxonomy {
    /// Primary category names.
    pub primary: Option<Vec<String>>,
    /// Secondary category names.
    pub secondary: Option<Vec<String>>,
}

impl HoopdexConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// A relative `catalog_path` is resolved against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or its
    /// taxonomy section is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::OperationFailed {
            operation: "read_config_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;

        let file: ConfigFile = toml::from_str(&contents).map_err(|e| Error::OperationFailed {
            operation: "parse_config_file".to_string(),
            cause: e.to_string(),
        })?;

        let mut config = Self::from_config_file(file)?;
        if let (Some(catalog), Some(dir)) = (&config.catalog_path, path.parent()) {
            if catalog.is_relative() {
                config.catalog_path = Some(dir.join(catalog));
            }
        }
        Ok(config)
    }

    /// Loads configuration from the default location.
    ///
    /// Checks the following paths in order:
    /// 1. Platform-specific config dir (`~/Library/Application Support/hoopdex/` on macOS)
    /// 2. XDG config dir (`~/.config/hoopdex/` for Unix compatibility)
    ///
    /// Returns default configuration if no config file is found.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be loaded.
    pub fn load_default() -> Result<Self> {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Ok(Self::default());
        };

        let platform_config = base_dirs.config_dir().join("hoopdex").join("config.toml");
        if platform_config.exists() {
            return Self::load_from_file(&platform_config);
        }

        let xdg_config = base_dirs
            .home_dir()
            .join(".config")
            .join("hoopdex")
            .join("config.toml");
        if xdg_config.exists() {
            return Self::load_from_file(&xdg_config);
        }

        Ok(Self::default())
    }

    /// Applies `HOOPDEX_*` environment overrides.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary variable lookup.
    ///
    /// Blank values are ignored.
    #[must_use]
    pub fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(path) = get(ENV_CATALOG_PATH) {
            self.catalog_path = Some(PathBuf::from(path));
        }
        if let Some(format) = get(ENV_LOG_FORMAT) {
            self.logging.format = Some(format);
        }
        if let Some(filter) = get(ENV_LOG_FILTER) {
            self.logging.filter = Some(filter);
        }
        self
    }

    /// Sets the catalog file.
    #[must_use]
    pub fn with_catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Returns where the catalog should be loaded from.
    #[must_use]
    pub fn catalog_source(&self) -> CatalogSource {
        self.catalog_path
            .as_ref()
            .map_or(CatalogSource::Builtin, CatalogSource::file)
    }

    /// Loads the configured catalog into a registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn registry(&self) -> Result<CatalogRegistry> {
        CatalogRegistry::from_source(&self.catalog_source(), self.taxonomy.clone())
    }

    /// Converts a `ConfigFile` to `HoopdexConfig`.
    fn from_config_file(file: ConfigFile) -> Result<Self> {
        let mut config = Self::default();

        if let Some(catalog_path) = file.catalog_path.filter(|p| !p.trim().is_empty()) {
            config.catalog_path = Some(PathBuf::from(catalog_path));
        }
        if let Some(taxonomy) = file.taxonomy {
            config.taxonomy = taxonomy_from_section(taxonomy)?;
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        Ok(config)
    }
}

fn taxonomy_from_section(section: ConfigFileTaxonomy) -> Result<Taxonomy> {
    let names = |list: Option<Vec<String>>, all: &[Category]| -> Vec<String> {
        list.unwrap_or_else(|| all.iter().map(ToString::to_string).collect())
    };
    let primary = names(section.primary, Category::primary());
    let secondary = names(section.secondary, Category::secondary());
    Taxonomy::from_names(&primary, &secondary)
}
