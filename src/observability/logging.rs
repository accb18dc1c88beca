//! Structured logging configuration.

use crate::config::LoggingSettings;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Default filter when nothing is configured.
const DEFAULT_FILTER: &str = "hoopdex=info";

/// Default filter when `--verbose` is given.
const VERBOSE_FILTER: &str = "hoopdex=debug";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parses a format name; anything but "json" is pretty.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Resolved logging configuration.
#[derive(Debug)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,
    /// Event filter.
    pub filter: EnvFilter,
    /// Optional log file (append mode).
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Resolves settings into a logging configuration.
    ///
    /// `verbose` only changes the default filter; an explicit filter wins. An
    /// unparseable filter falls back to the default.
    #[must_use]
    pub fn from_settings(settings: Option<&LoggingSettings>, verbose: bool) -> Self {
        let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
        let directive = settings
            .and_then(|s| s.filter.as_deref())
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(default);
        let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(default));

        Self {
            format: settings
                .and_then(|s| s.format.as_deref())
                .map(LogFormat::parse)
                .unwrap_or_default(),
            filter,
            file: settings.and_then(|s| s.file.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parse() {
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("xml"), LogFormat::Pretty);
    }

    #[test]
    fn test_defaults() {
        let config = LoggingConfig::from_settings(None, false);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.file.is_none());
        assert!(config.filter.to_string().contains(DEFAULT_FILTER));

        let verbose = LoggingConfig::from_settings(None, true);
        assert!(verbose.filter.to_string().contains(VERBOSE_FILTER));
    }

    #[test]
    fn test_explicit_settings() {
        let settings = LoggingSettings {
            format: Some("json".to_string()),
            filter: Some("hoopdex=trace".to_string()),
            file: Some(PathBuf::from("/var/log/hoopdex.log")),
        };
        let config = LoggingConfig::from_settings(Some(&settings), true);
        assert_eq!(config.format, LogFormat::Json);
        assert!(config.filter.to_string().contains("hoopdex=trace"));
        assert_eq!(config.file, Some(PathBuf::from("/var/log/hoopdex.log")));
    }
}
