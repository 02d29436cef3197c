use super::{Diagnostic, DiscoveryError, DiscoveryReport};
use crate::fs::{FileSystem, RealFileSystem, WalkEntry, WalkOptions};
use crate::heuristics::HeuristicLogger;
use crate::inventory::{Inventory, ServiceCategory};
use crate::parsers::ParserRegistry;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Deepest directory level to descend to; `None` walks the whole tree.
    /// Directories cut off by the limit are reported as diagnostics.
    pub max_depth: Option<usize>,
    pub max_files: usize,
    pub respect_gitignore: bool,
    pub follow_links: bool,
    /// Mark static content for every visited file rather than only for
    /// image and video files.
    pub blanket_static_content: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            max_files: 100_000,
            respect_gitignore: false,
            follow_links: false,
            blanket_static_content: false,
        }
    }
}

impl ScanConfig {
    fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            max_depth: self.max_depth,
            respect_gitignore: self.respect_gitignore,
            follow_links: self.follow_links,
        }
    }
}

/// Walks one repository and accumulates its service inventory.
pub struct ServiceScanner {
    repo_path: PathBuf,
    fs: Arc<dyn FileSystem>,
    registry: Arc<ParserRegistry>,
    config: ScanConfig,
    heuristic_logger: HeuristicLogger,
}

impl ServiceScanner {
    pub fn new(repo_path: PathBuf) -> Result<Self, DiscoveryError> {
        Self::with_fs(repo_path, Arc::new(RealFileSystem::new()))
    }

    pub fn with_fs(repo_path: PathBuf, fs: Arc<dyn FileSystem>) -> Result<Self, DiscoveryError> {
        if !fs.exists(&repo_path) {
            return Err(DiscoveryError::RootNotFound(repo_path));
        }
        if !fs.is_dir(&repo_path) {
            return Err(DiscoveryError::NotADirectory(repo_path));
        }

        let repo_path = fs
            .canonicalize(&repo_path)
            .map_err(|e| DiscoveryError::Canonicalize {
                path: repo_path.clone(),
                source: e.into(),
            })?;

        debug!(
            repo_path = %repo_path.display(),
            "ServiceScanner initialized"
        );

        Ok(Self {
            repo_path,
            fs,
            registry: Arc::new(ParserRegistry::with_defaults()),
            config: ScanConfig::default(),
            heuristic_logger: HeuristicLogger::disabled(),
        })
    }

    pub fn with_config(mut self, config: ScanConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_heuristic_logger(mut self, logger: HeuristicLogger) -> Self {
        self.heuristic_logger = logger;
        self
    }

    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    pub fn scan(&self) -> DiscoveryReport {
        let start = Instant::now();

        info!(
            repo = %self.repo_path.display(),
            max_depth = ?self.config.max_depth,
            max_files = self.config.max_files,
            blanket_static_content = self.config.blanket_static_content,
            "Starting service discovery"
        );

        let mut inventory = Inventory::new();
        let mut diagnostics = Vec::new();
        let mut files_scanned = 0;
        let mut files_matched = 0;
        let mut truncated = false;

        for entry in self
            .fs
            .walk_files(&self.repo_path, &self.config.walk_options())
        {
            let path = match entry {
                WalkEntry::File(path) => path,
                WalkEntry::DepthLimited(dir) => {
                    let rel_path = self.relative(&dir);
                    warn!(path = %rel_path.display(), "Directory below depth limit skipped");
                    let max_depth = self.config.max_depth.unwrap_or_default();
                    diagnostics.push(Diagnostic::depth_limited(rel_path, max_depth));
                    continue;
                }
                WalkEntry::Error(err) => {
                    let message = format!("{:#}", err);
                    warn!(error = %message, "Failed to read directory entry");
                    diagnostics.push(Diagnostic::traversal(message));
                    continue;
                }
            };

            if files_scanned >= self.config.max_files {
                warn!(
                    files_scanned,
                    max_files = self.config.max_files,
                    "Reached file limit, stopping scan"
                );
                truncated = true;
                break;
            }
            files_scanned += 1;

            if self.scan_file(&path, &mut inventory, &mut diagnostics) {
                files_matched += 1;
            }
        }

        let scan_time_ms = start.elapsed().as_millis() as u64;

        info!(
            repo = %self.repo_path.display(),
            services_found = inventory.len(),
            files_scanned,
            files_matched,
            diagnostics = diagnostics.len(),
            scan_time_ms,
            "Service discovery completed"
        );

        DiscoveryReport {
            root: self.repo_path.clone(),
            inventory,
            diagnostics,
            files_scanned,
            files_matched,
            truncated,
            scan_time_ms,
        }
    }

    /// Classifies and parses one file. Returns whether it was recognized.
    fn scan_file(
        &self,
        path: &Path,
        inventory: &mut Inventory,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> bool {
        if self.config.blanket_static_content {
            inventory.set_enabled(ServiceCategory::StaticContent);
        }

        let Some(kind) = self.registry.classify(path) else {
            return false;
        };

        let rel_path = self.relative(path);

        inventory.merge_all(kind.implied_facts());

        if !kind.needs_content() {
            debug!(path = %rel_path.display(), %kind, "Matched by extension");
            return true;
        }

        let Some(parser) = self.registry.get(kind) else {
            debug!(path = %rel_path.display(), %kind, "No parser registered");
            return true;
        };

        let read = if kind.reads_lossily() {
            self.fs.read_to_string_lossy(path)
        } else {
            self.fs.read_to_string(path)
        };
        let content = match read {
            Ok(content) => content,
            Err(err) => {
                let message = format!("{:#}", err);
                warn!(
                    path = %rel_path.display(),
                    %kind,
                    error = %message,
                    "Skipping unreadable file"
                );
                diagnostics.push(Diagnostic::unreadable(rel_path, kind, message));
                return true;
            }
        };

        let parse_start = Instant::now();
        match parser.parse(&content) {
            Ok(facts) => {
                let latency_us = parse_start.elapsed().as_micros() as u64;
                debug!(
                    path = %rel_path.display(),
                    %kind,
                    facts = facts.len(),
                    "Parsed file"
                );
                self.heuristic_logger
                    .log_file(&rel_path, kind, &facts, latency_us);
                inventory.merge_all(facts);
            }
            Err(err) => {
                let message = err.to_string();
                warn!(
                    path = %rel_path.display(),
                    %kind,
                    error = %message,
                    "Skipping malformed file"
                );
                diagnostics.push(Diagnostic::malformed(rel_path, kind, message));
            }
        }

        true
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.repo_path)
            .unwrap_or(path)
            .to_path_buf()
    }
}
