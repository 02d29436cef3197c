//! Structured logging setup
//!
//! Installs a `tracing` subscriber once per process. Console output is the
//! default; JSON lines are available for log shippers. `RUST_LOG` directives
//! are honored on top of the configured level.
//!
//! ```no_run
//! use infrascope::util::logging;
//!
//! logging::init_from_env();
//! tracing::info!(repo = "customer-a", "Discovery started");
//! ```

use std::env;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Minimum level for infrascope's own events
    pub level: Level,

    /// Emit JSON lines instead of human console output
    pub use_json: bool,

    pub include_target: bool,

    /// Include file and line number information
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            use_json: false,
            include_target: true,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    fn directive(&self) -> String {
        format!("infrascope={}", self.level)
    }
}

/// Parses a log level case-insensitively, falling back to `INFO`.
///
/// ```
/// use infrascope::util::logging::parse_level;
/// use tracing::Level;
///
/// assert_eq!(parse_level("WARN"), Level::WARN);
/// assert_eq!(parse_level("chatty"), Level::INFO);
/// ```
pub fn parse_level(level_str: &str) -> Level {
    match level_str.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        }
    }
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut filter = EnvFilter::from_default_env();
        match config.directive().parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("Ignoring log directive {}: {}", config.directive(), e),
        }

        // Subscribers write to stderr so stdout stays clean for reports.
        if config.use_json {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(config.include_target)
                        .with_file(config.include_location)
                        .with_line_number(config.include_location),
                )
                .init();
        }
    });
}

pub fn init_default() {
    init_logging(LoggingConfig::default());
}

/// Reads `INFRASCOPE_LOG_LEVEL` and `INFRASCOPE_LOG_JSON`.
pub fn init_from_env() {
    init_logging(config_from_env());
}

/// Settings from `INFRASCOPE_LOG_LEVEL` and `INFRASCOPE_LOG_JSON`, without
/// installing anything.
pub fn config_from_env() -> LoggingConfig {
    let level_str = env::var("INFRASCOPE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let use_json = env::var("INFRASCOPE_LOG_JSON")
        .ok()
        .and_then(|v| v.parse::<bool>().ok())
        .unwrap_or(false);

    LoggingConfig {
        level: parse_level(&level_str),
        use_json,
        ..Default::default()
    }
}
