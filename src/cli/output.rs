//! Output formatting for discovery reports and configuration
//!
//! JSON and YAML output is a list with one entry per requested repository,
//! in the order the paths were given. Each entry carries either the report
//! or the error that stopped the scan.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::InfrascopeConfig;
use crate::discovery::{DiscoveryError, DiscoveryReport};
use crate::inventory::FactDetail;

const RULE: &str = "\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format (machine-readable)
    Json,
    /// YAML format (human-friendly, version-control friendly)
    Yaml,
    /// Human-readable formatted text
    Human,
}

/// Serialized form of one repository's outcome
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum RepositoryOutcome<'a> {
    Ok {
        path: &'a Path,
        #[serde(flatten)]
        report: &'a DiscoveryReport,
    },
    Error {
        path: &'a Path,
        error: String,
    },
}

impl<'a> RepositoryOutcome<'a> {
    fn from_result(path: &'a Path, result: &'a Result<DiscoveryReport, DiscoveryError>) -> Self {
        match result {
            Ok(report) => Self::Ok { path, report },
            Err(e) => Self::Error {
                path,
                error: e.to_string(),
            },
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the outcome of every requested repository.
    pub fn format_results(
        &self,
        results: &[(PathBuf, Result<DiscoveryReport, DiscoveryError>)],
    ) -> Result<String> {
        let outcomes: Vec<_> = results
            .iter()
            .map(|(path, result)| RepositoryOutcome::from_result(path, result))
            .collect();

        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&outcomes)
                .context("Failed to serialize discovery results to JSON"),
            OutputFormat::Yaml => serde_yaml::to_string(&outcomes)
                .context("Failed to serialize discovery results to YAML"),
            OutputFormat::Human => Ok(self.format_results_human(results)),
        }
    }

    pub fn format_config(&self, config: &InfrascopeConfig) -> Result<String> {
        let config_map = config.to_display_map();
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(&config_map)
                .context("Failed to serialize config to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(&config_map).context("Failed to serialize config to YAML")
            }
            OutputFormat::Human => Ok(format!("{}\n{}", RULE, config)),
        }
    }

    fn format_results_human(
        &self,
        results: &[(PathBuf, Result<DiscoveryReport, DiscoveryError>)],
    ) -> String {
        let mut output = String::new();

        for (i, (path, result)) in results.iter().enumerate() {
            if i > 0 {
                output.push('\n');
            }
            match result {
                Ok(report) => output.push_str(&format_report_human(path, report)),
                Err(e) => {
                    output.push_str(&format!("\u{2717} {}\n{}\n\n", path.display(), RULE));
                    output.push_str(&format!("Error: {}\n", e));
                }
            }
        }

        output
    }
}

fn format_report_human(path: &Path, report: &DiscoveryReport) -> String {
    let mut output = String::new();

    let symbol = if report.is_complete() {
        "\u{2713}"
    } else {
        "\u{26A0}"
    };
    output.push_str(&format!("{} {}\n{}\n\n", symbol, path.display(), RULE));

    if report.inventory.is_empty() {
        output.push_str("Services: (none detected)\n");
    } else {
        output.push_str("Services:\n");
        let count = report.inventory.len();
        for (i, (category, detail)) in report.inventory.iter().enumerate() {
            let connector = if i == count - 1 {
                "\u{2514}"
            } else {
                "\u{251C}"
            };
            output.push_str(&format!(
                "{}\u{2500} {:<16} {}\n",
                connector,
                category.label(),
                describe_detail(detail)
            ));
        }
    }

    if !report.diagnostics.is_empty() {
        output.push_str("\n\u{26A0} Skipped:\n");
        for diagnostic in &report.diagnostics {
            match diagnostic.path {
                Some(ref p) => {
                    output.push_str(&format!("  - {}: {}\n", p.display(), diagnostic.message))
                }
                None => output.push_str(&format!("  - {}\n", diagnostic.message)),
            }
        }
    }

    if report.truncated {
        output.push_str(&format!(
            "\n\u{26A0} Walk stopped after {} files\n",
            report.files_scanned
        ));
    }

    output.push_str(&format!(
        "\nScanned {} files ({} matched) in {}ms\n",
        report.files_scanned, report.files_matched, report.scan_time_ms
    ));

    output
}

fn describe_detail(detail: &FactDetail) -> String {
    match detail {
        FactDetail::Enabled => "enabled".to_string(),
        FactDetail::Technology(name) => name.clone(),
        FactDetail::Tags(tags) => tags.join(", "),
        FactDetail::Backends {
            servers_count,
            servers,
        } => format!("{} backend(s): {}", servers_count, servers.join(", ")),
        FactDetail::Components(components) => {
            if components.is_empty() {
                "present".to_string()
            } else {
                components
                    .iter()
                    .map(|(sub, tech)| format!("{}={}", sub, tech))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        }
    }
}
