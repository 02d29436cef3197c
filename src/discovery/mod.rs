//! Repository walk and dispatch
//!
//! [`ServiceScanner`] visits every file under a repository root, classifies
//! it with the [`ParserRegistry`](crate::parsers::ParserRegistry), runs the
//! matching parser and merges the returned facts into a fresh
//! [`Inventory`](crate::inventory::Inventory). Files are visited in sorted
//! path order, so list-shaped details are ordered deterministically.
//!
//! Only a missing or unusable root is fatal. Unreadable or malformed files
//! are reported as [`Diagnostic`]s and the walk continues.

mod error;
mod report;
mod scanner;

pub use error::DiscoveryError;
pub use report::{Diagnostic, DiagnosticKind, DiscoveryReport};
pub use scanner::{ScanConfig, ServiceScanner};

use crate::heuristics::HeuristicLogger;
use std::path::{Path, PathBuf};
use tracing::error;

/// Discovers the services of one repository with the default configuration.
pub fn discover(root: impl AsRef<Path>) -> Result<DiscoveryReport, DiscoveryError> {
    discover_with(root, ScanConfig::default(), HeuristicLogger::disabled())
}

pub fn discover_with(
    root: impl AsRef<Path>,
    config: ScanConfig,
    heuristic_logger: HeuristicLogger,
) -> Result<DiscoveryReport, DiscoveryError> {
    let scanner = ServiceScanner::new(root.as_ref().to_path_buf())?
        .with_config(config)
        .with_heuristic_logger(heuristic_logger);
    Ok(scanner.scan())
}

/// Discovers several repositories concurrently, one blocking task each.
///
/// Results come back in the order of `roots`; a failure for one repository
/// does not affect the others.
pub async fn discover_many(
    roots: Vec<PathBuf>,
    config: ScanConfig,
    heuristic_logger: HeuristicLogger,
) -> Vec<(PathBuf, Result<DiscoveryReport, DiscoveryError>)> {
    let handles: Vec<_> = roots
        .into_iter()
        .map(|root| {
            let config = config.clone();
            let logger = heuristic_logger.clone();
            let task_root = root.clone();
            let handle =
                tokio::task::spawn_blocking(move || discover_with(&task_root, config, logger));
            (root, handle)
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for (root, handle) in handles {
        let result = match handle.await {
            Ok(result) => result,
            Err(join_err) => {
                error!(repo = %root.display(), error = %join_err, "Discovery task failed");
                Err(DiscoveryError::TaskFailed {
                    path: root.clone(),
                    message: join_err.to_string(),
                })
            }
        };
        results.push((root, result));
    }

    results
}
