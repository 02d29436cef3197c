//! FileSystem trait definition

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Traversal options for [`FileSystem::walk_files`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Deepest level to descend to; files directly under the root are depth 1.
    /// `None` walks the whole tree.
    pub max_depth: Option<usize>,
    /// Honor `.gitignore`, `.ignore` and global git excludes
    pub respect_gitignore: bool,
    /// Descend into symlinked directories
    pub follow_links: bool,
}

/// One item produced by [`FileSystem::walk_files`]
#[derive(Debug)]
pub enum WalkEntry {
    File(PathBuf),
    /// A non-empty directory at the depth limit whose contents were skipped
    DepthLimited(PathBuf),
    /// An entry that could not be listed
    Error(anyhow::Error),
}

/// Abstraction over file system operations for testability
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Read file contents as string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Read file contents, replacing invalid UTF-8 with U+FFFD
    fn read_to_string_lossy(&self, path: &Path) -> Result<String>;

    /// Canonicalize a path
    fn canonicalize(&self, path: &Path) -> Result<PathBuf>;

    /// Every file below `root`, sorted by path.
    ///
    /// Entries that could not be listed and directories cut off by
    /// `max_depth` are reported in place, so the caller can record them
    /// without giving up on the rest of the tree.
    fn walk_files(&self, root: &Path, options: &WalkOptions) -> Vec<WalkEntry>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_walk_options_visit_everything() {
        let options = WalkOptions::default();
        assert!(!options.respect_gitignore);
        assert!(!options.follow_links);
        assert_eq!(options.max_depth, None);
    }
}
