use super::{FileSystem, WalkEntry, WalkOptions};
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

#[derive(Debug, Clone)]
enum MockEntry {
    File(String),
    Unreadable(String),
    /// A directory the walk cannot list
    WalkError(String),
    Directory,
}

/// In-memory file tree; relative paths are rooted at `/mock`.
pub struct MockFileSystem {
    entries: RwLock<BTreeMap<PathBuf, MockEntry>>,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        let fs = Self {
            entries: RwLock::new(BTreeMap::new()),
            root,
        };
        fs.add_dir(fs.root.clone());
        fs
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        self.insert(path.as_ref(), MockEntry::File(content.to_string()));
    }

    /// Adds a file that is listed by the walk but fails to read.
    pub fn add_unreadable_file(&self, path: impl AsRef<Path>, reason: &str) {
        self.insert(path.as_ref(), MockEntry::Unreadable(reason.to_string()));
    }

    /// Adds a directory whose listing fails during the walk.
    pub fn add_walk_error(&self, path: impl AsRef<Path>, reason: &str) {
        self.insert(path.as_ref(), MockEntry::WalkError(reason.to_string()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), MockEntry::Directory);
    }

    fn insert(&self, path: &Path, entry: MockEntry) {
        let path = self.normalize_path(path);
        let mut entries = self.entries.write().unwrap();

        if let Some(parent) = path.parent() {
            let mut current = PathBuf::new();
            for component in parent.components() {
                current.push(component);
                entries
                    .entry(current.clone())
                    .or_insert(MockEntry::Directory);
            }
        }

        entries.insert(path, entry);
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        self.entries.read().unwrap().contains_key(&path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = self.normalize_path(path);
        matches!(
            self.entries.read().unwrap().get(&path),
            Some(MockEntry::Directory)
        )
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        let path = self.normalize_path(path);
        let entries = self.entries.read().unwrap();

        match entries.get(&path) {
            Some(MockEntry::File(content)) => Ok(content.clone()),
            Some(MockEntry::Unreadable(reason)) => {
                Err(anyhow!("Failed to read file {:?}: {}", path, reason))
            }
            Some(MockEntry::Directory | MockEntry::WalkError(_)) => {
                Err(anyhow!("Not a file: {:?}", path))
            }
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn read_to_string_lossy(&self, path: &Path) -> Result<String> {
        self.read_to_string(path)
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        let normalized = self.normalize_path(path);
        if self.entries.read().unwrap().contains_key(&normalized) {
            Ok(normalized)
        } else {
            Err(anyhow!("Path not found: {:?}", path))
        }
    }

    fn walk_files(&self, root: &Path, options: &WalkOptions) -> Vec<WalkEntry> {
        let root = self.normalize_path(root);
        let entries = self.entries.read().unwrap();
        let within = |depth: usize| options.max_depth.map_or(true, |max| depth <= max);

        entries
            .iter()
            .filter_map(|(path, entry)| {
                let depth = path.strip_prefix(&root).ok()?.components().count();
                if depth == 0 || !within(depth) {
                    return None;
                }
                match entry {
                    MockEntry::File(_) | MockEntry::Unreadable(_) => {
                        Some(WalkEntry::File(path.clone()))
                    }
                    MockEntry::WalkError(reason) => Some(WalkEntry::Error(anyhow!(
                        "Failed to read directory entry {:?}: {}",
                        path,
                        reason
                    ))),
                    MockEntry::Directory => {
                        let has_children = entries
                            .range(path.clone()..)
                            .nth(1)
                            .is_some_and(|(next, _)| next.starts_with(path));
                        (options.max_depth == Some(depth) && has_children)
                            .then(|| WalkEntry::DepthLimited(path.clone()))
                    }
                }
            })
            .collect()
    }
}
