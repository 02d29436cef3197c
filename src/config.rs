//! Configuration management for infrascope
//!
//! Settings are loaded from environment variables with sensible defaults.
//! Command-line flags override individual fields after loading.
//!
//! # Environment Variables
//!
//! - `INFRASCOPE_MAX_DEPTH`: Deepest directory level to visit - default: unset (whole tree)
//! - `INFRASCOPE_MAX_FILES`: Stop each walk after this many files - default: "100000"
//! - `INFRASCOPE_RESPECT_GITIGNORE`: Skip git-ignored files (true|false) - default: "false"
//! - `INFRASCOPE_FOLLOW_LINKS`: Descend into symlinked directories (true|false) - default: "false"
//! - `INFRASCOPE_BLANKET_STATIC`: Mark static content for every visited file (true|false) - default: "false"
//! - `INFRASCOPE_HEURISTIC_LOG`: JSONL file receiving one entry per parsed file - default: unset
//! - `INFRASCOPE_LOG_LEVEL`: Logging level - default: "info"
//!
//! # Example
//!
//! ```no_run
//! use infrascope::InfrascopeConfig;
//!
//! let config = InfrascopeConfig::default();
//! config.validate().expect("Invalid configuration");
//!
//! let report = infrascope::discover_with(
//!     "/tmp/repos/customer-a",
//!     config.scan_config(),
//!     config.heuristic_logger(),
//! );
//! ```

use crate::discovery::ScanConfig;
use crate::heuristics::HeuristicLogger;
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_MAX_FILES: usize = 100_000;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

/// Main configuration structure for infrascope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfrascopeConfig {
    /// `None` walks the whole tree
    pub max_depth: Option<usize>,
    pub max_files: usize,
    pub respect_gitignore: bool,
    pub follow_links: bool,
    pub blanket_static_content: bool,
    pub heuristic_log: Option<PathBuf>,
    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for InfrascopeConfig {
    /// Loads from `INFRASCOPE_*` environment variables, falling back to the
    /// defaults for anything missing or unparsable.
    fn default() -> Self {
        Self {
            max_depth: env::var("INFRASCOPE_MAX_DEPTH")
                .ok()
                .and_then(|v| v.parse().ok()),
            max_files: env_or("INFRASCOPE_MAX_FILES", DEFAULT_MAX_FILES),
            respect_gitignore: env_or("INFRASCOPE_RESPECT_GITIGNORE", false),
            follow_links: env_or("INFRASCOPE_FOLLOW_LINKS", false),
            blanket_static_content: env_or("INFRASCOPE_BLANKET_STATIC", false),
            heuristic_log: env::var("INFRASCOPE_HEURISTIC_LOG")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            log_level: env::var("INFRASCOPE_LOG_LEVEL")
                .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
                .to_lowercase(),
        }
    }
}

impl InfrascopeConfig {
    /// Like [`Default::default`], but rejects values that are set and do
    /// not parse instead of silently using the default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            max_depth: env_strict_optional("INFRASCOPE_MAX_DEPTH")?,
            max_files: env_strict("INFRASCOPE_MAX_FILES", defaults.max_files)?,
            respect_gitignore: env_strict(
                "INFRASCOPE_RESPECT_GITIGNORE",
                defaults.respect_gitignore,
            )?,
            follow_links: env_strict("INFRASCOPE_FOLLOW_LINKS", defaults.follow_links)?,
            blanket_static_content: env_strict(
                "INFRASCOPE_BLANKET_STATIC",
                defaults.blanket_static_content,
            )?,
            ..defaults
        })
    }

    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any limit is zero or the log level is unknown
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == Some(0) {
            return Err(ConfigError::ValidationFailed(
                "Max depth must be at least 1".to_string(),
            ));
        }
        if self.max_files == 0 {
            return Err(ConfigError::ValidationFailed(
                "Max files must be at least 1".to_string(),
            ));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    pub fn scan_config(&self) -> ScanConfig {
        ScanConfig {
            max_depth: self.max_depth,
            max_files: self.max_files,
            respect_gitignore: self.respect_gitignore,
            follow_links: self.follow_links,
            blanket_static_content: self.blanket_static_content,
        }
    }

    fn max_depth_label(&self) -> String {
        self.max_depth
            .map_or_else(|| "unlimited".to_string(), |depth| depth.to_string())
    }

    pub fn heuristic_logger(&self) -> HeuristicLogger {
        HeuristicLogger::new(self.heuristic_log.clone())
    }

    /// Converts configuration to a display map for output formatting
    pub fn to_display_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();

        map.insert("max_depth".to_string(), self.max_depth_label());
        map.insert("max_files".to_string(), self.max_files.to_string());
        map.insert(
            "respect_gitignore".to_string(),
            self.respect_gitignore.to_string(),
        );
        map.insert("follow_links".to_string(), self.follow_links.to_string());
        map.insert(
            "blanket_static_content".to_string(),
            self.blanket_static_content.to_string(),
        );
        if let Some(ref path) = self.heuristic_log {
            map.insert("heuristic_log".to_string(), path.display().to_string());
        }
        map.insert("log_level".to_string(), self.log_level.clone());

        map
    }
}

impl fmt::Display for InfrascopeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Infrascope Configuration:")?;
        writeln!(f, "  Max Depth: {}", self.max_depth_label())?;
        writeln!(f, "  Max Files: {}", self.max_files)?;
        writeln!(f, "  Respect .gitignore: {}", self.respect_gitignore)?;
        writeln!(f, "  Follow Links: {}", self.follow_links)?;
        writeln!(
            f,
            "  Blanket Static Content: {}",
            self.blanket_static_content
        )?;
        if let Some(ref path) = self.heuristic_log {
            writeln!(f, "  Heuristic Log: {}", path.display())?;
        }
        writeln!(f, "  Log Level: {}", self.log_level)?;
        Ok(())
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn env_strict<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(value) => value.parse::<T>().map_err(|e| ConfigError::ParseError {
            field: key.to_string(),
            error: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

fn env_strict_optional<T>(key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match env::var(key) {
        Ok(value) if !value.is_empty() => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| ConfigError::ParseError {
                field: key.to_string(),
                error: e.to_string(),
            }),
        _ => Ok(None),
    }
}
