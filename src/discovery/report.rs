use crate::inventory::Inventory;
use crate::parsers::FileKind;
use serde::Serialize;
use std::path::PathBuf;

/// What went wrong with a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The walker could not list a directory entry
    Traversal,
    /// A directory sat at the depth limit and its contents were not visited
    DepthLimit,
    /// The file was listed but its content could not be read as text
    Unreadable,
    /// The file was read but its structured content did not parse
    Malformed,
}

/// A skipped file, reported instead of aborting the walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Path relative to the repository root, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_kind: Option<FileKind>,
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn traversal(message: impl Into<String>) -> Self {
        Self {
            path: None,
            file_kind: None,
            kind: DiagnosticKind::Traversal,
            message: message.into(),
        }
    }

    pub fn depth_limited(path: PathBuf, max_depth: usize) -> Self {
        Self {
            message: format!("Directory contents skipped at depth limit {}", max_depth),
            path: Some(path),
            file_kind: None,
            kind: DiagnosticKind::DepthLimit,
        }
    }

    pub fn unreadable(path: PathBuf, file_kind: FileKind, message: impl Into<String>) -> Self {
        Self {
            path: Some(path),
            file_kind: Some(file_kind),
            kind: DiagnosticKind::Unreadable,
            message: message.into(),
        }
    }

    pub fn malformed(path: PathBuf, file_kind: FileKind, message: impl Into<String>) -> Self {
        Self {
            path: Some(path),
            file_kind: Some(file_kind),
            kind: DiagnosticKind::Malformed,
            message: message.into(),
        }
    }
}

/// Result of discovering one repository
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryReport {
    /// Canonical repository root
    pub root: PathBuf,
    pub inventory: Inventory,
    pub diagnostics: Vec<Diagnostic>,
    pub files_scanned: usize,
    /// Files that matched a recognized kind
    pub files_matched: usize,
    /// True when the walk stopped at the configured file limit
    pub truncated: bool,
    pub scan_time_ms: u64,
}

impl DiscoveryReport {
    pub fn is_complete(&self) -> bool {
        self.diagnostics.is_empty() && !self.truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_diagnostic_serialization_skips_missing_path() {
        let diagnostic = Diagnostic::traversal("permission denied");
        assert_eq!(
            serde_json::to_value(&diagnostic).unwrap(),
            json!({"kind": "traversal", "message": "permission denied"})
        );
    }

    #[test]
    fn test_malformed_diagnostic() {
        let diagnostic = Diagnostic::malformed(
            PathBuf::from("web/package.json"),
            FileKind::PackageJson,
            "expected value at line 1 column 1",
        );
        let value = serde_json::to_value(&diagnostic).unwrap();
        assert_eq!(value["kind"], "malformed");
        assert_eq!(value["file_kind"], "package_json");
        assert_eq!(value["path"], "web/package.json");
    }

    #[test]
    fn test_depth_limited_diagnostic() {
        let diagnostic = Diagnostic::depth_limited(PathBuf::from("vendor/deep"), 3);
        assert_eq!(
            serde_json::to_value(&diagnostic).unwrap(),
            json!({
                "path": "vendor/deep",
                "kind": "depth_limit",
                "message": "Directory contents skipped at depth limit 3",
            })
        );
    }

    #[test]
    fn test_report_completeness() {
        let mut report = DiscoveryReport {
            root: PathBuf::from("/repo"),
            inventory: Inventory::new(),
            diagnostics: Vec::new(),
            files_scanned: 0,
            files_matched: 0,
            truncated: false,
            scan_time_ms: 0,
        };
        assert!(report.is_complete());

        report.diagnostics.push(Diagnostic::depth_limited(PathBuf::from("deep"), 1));
        assert!(!report.is_complete());

        report.diagnostics.clear();
        report.truncated = true;
        assert!(!report.is_complete());
    }
}
