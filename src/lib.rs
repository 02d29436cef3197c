//! infrascope - heuristic infrastructure service discovery
//!
//! Walks a repository tree and infers which infrastructure services the code
//! depends on by pattern-matching well-known files: Dockerfiles, compose
//! files, `package.json`, `requirements.txt`, Python sources and nginx-style
//! load balancer configuration. Results are merged into an [`Inventory`]
//! keyed by [`ServiceCategory`].
//!
//! # Example
//!
//! ```no_run
//! use infrascope::{discover, ServiceCategory};
//!
//! let report = discover("/srv/checkouts/shop")?;
//! if report.inventory.contains(&ServiceCategory::Database) {
//!     println!("databases: {:?}", report.inventory.tags(&ServiceCategory::Database));
//! }
//! # Ok::<(), infrascope::DiscoveryError>(())
//! ```
//!
//! # Project Structure
//!
//! - [`inventory`]: categories, fact shapes and merge rules
//! - [`parsers`]: per-file-kind extractors and the [`ParserRegistry`]
//! - [`discovery`]: the repository walk and concurrent multi-repository runs
//! - [`fs`]: filesystem abstraction with real and in-memory implementations

pub mod cli;
pub mod config;
pub mod discovery;
pub mod fs;
pub mod heuristics;
pub mod inventory;
pub mod matchers;
pub mod parsers;
pub mod util;

pub use config::{ConfigError, InfrascopeConfig};
pub use discovery::{
    discover, discover_many, discover_with, Diagnostic, DiagnosticKind, DiscoveryError,
    DiscoveryReport, ScanConfig, ServiceScanner,
};
pub use heuristics::HeuristicLogger;
pub use inventory::{FactDetail, Inventory, ServiceCategory, ServiceFact};
pub use parsers::{FileKind, ParseError, ParserRegistry, ServiceParser};
pub use util::{init_default, init_from_env, init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
