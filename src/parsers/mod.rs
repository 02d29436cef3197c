//! File-type parsers
//!
//! Each parser takes the raw text of one file and returns the facts it
//! implies. Parsers never touch the filesystem or the inventory; the walker
//! reads content, calls [`ServiceParser::parse`], and merges the result.
//! Absence of an expected pattern is never an error.

pub mod compose;
pub mod dockerfile;
pub mod generic;
pub mod load_balancer;
pub mod package_json;
pub mod python;
pub mod registry;
pub mod requirements;

pub use registry::ParserRegistry;

use crate::inventory::{ServiceCategory, ServiceFact};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Recognized file categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    Dockerfile,
    Compose,
    LoadBalancerConf,
    PackageJson,
    Requirements,
    PythonSource,
    ScriptSource,
    StaticAsset,
}

impl FileKind {
    /// Facts implied by the file's name alone, before any content is read.
    pub fn implied_facts(&self) -> Vec<ServiceFact> {
        match self {
            Self::StaticAsset => vec![ServiceFact::enabled(ServiceCategory::StaticContent)],
            Self::ScriptSource => vec![ServiceFact::enabled(ServiceCategory::WebServer)],
            _ => Vec::new(),
        }
    }

    /// Whether the file's content has to be read.
    pub fn needs_content(&self) -> bool {
        !matches!(self, Self::StaticAsset)
    }

    /// Source files are pattern-matched, so stray non-UTF-8 bytes (minified
    /// bundles, legacy encodings) are replaced rather than failing the read.
    pub fn reads_lossily(&self) -> bool {
        matches!(self, Self::PythonSource | Self::ScriptSource)
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Dockerfile => "dockerfile",
            Self::Compose => "compose",
            Self::LoadBalancerConf => "load_balancer_conf",
            Self::PackageJson => "package_json",
            Self::Requirements => "requirements",
            Self::PythonSource => "python_source",
            Self::ScriptSource => "script_source",
            Self::StaticAsset => "static_asset",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid {kind} manifest: {source}")]
    InvalidManifest {
        kind: FileKind,
        #[source]
        source: serde_json::Error,
    },
}

/// Heuristic extractor for one file kind
pub trait ServiceParser: Send + Sync {
    fn kind(&self) -> FileKind;

    fn parse(&self, content: &str) -> Result<Vec<ServiceFact>, ParseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_implied_facts() {
        assert_eq!(
            FileKind::StaticAsset.implied_facts(),
            vec![ServiceFact::enabled(ServiceCategory::StaticContent)]
        );
        assert_eq!(
            FileKind::ScriptSource.implied_facts(),
            vec![ServiceFact::enabled(ServiceCategory::WebServer)]
        );
        assert!(FileKind::Dockerfile.implied_facts().is_empty());
    }

    #[test]
    fn test_static_assets_are_not_read() {
        assert!(!FileKind::StaticAsset.needs_content());
        assert!(FileKind::PackageJson.needs_content());
    }

    #[test]
    fn test_only_sources_read_lossily() {
        assert!(FileKind::ScriptSource.reads_lossily());
        assert!(FileKind::PythonSource.reads_lossily());
        assert!(!FileKind::PackageJson.reads_lossily());
        assert!(!FileKind::Requirements.reads_lossily());
    }

    #[test]
    fn test_file_kind_display_matches_serde() {
        let json = serde_json::to_string(&FileKind::LoadBalancerConf).unwrap();
        assert_eq!(json, format!("\"{}\"", FileKind::LoadBalancerConf));
    }
}
