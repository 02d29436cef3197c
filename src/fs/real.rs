use super::{FileSystem, WalkEntry, WalkOptions};
use anyhow::{anyhow, Context, Result};
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};

pub struct RealFileSystem;

impl RealFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RealFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).context(format!("Failed to read file {:?}", path))
    }

    fn read_to_string_lossy(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).context(format!("Failed to read file {:?}", path))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        path.canonicalize()
            .context(format!("Failed to canonicalize path {:?}", path))
    }

    fn walk_files(&self, root: &Path, options: &WalkOptions) -> Vec<WalkEntry> {
        let mut entries = Vec::new();

        for result in WalkBuilder::new(root)
            .standard_filters(options.respect_gitignore)
            .hidden(false)
            .follow_links(options.follow_links)
            .max_depth(options.max_depth)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
        {
            match result {
                Ok(entry) => {
                    let at_limit = options.max_depth == Some(entry.depth());
                    let path = entry.into_path();
                    if path.is_file() {
                        entries.push(WalkEntry::File(path));
                    } else if at_limit && has_children(&path) {
                        entries.push(WalkEntry::DepthLimited(path));
                    }
                }
                Err(err) => entries.push(WalkEntry::Error(
                    anyhow!(err).context("Failed to read directory entry"),
                )),
            }
        }

        entries
    }
}

fn has_children(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut listing| listing.next().is_some())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();

        fs::create_dir_all(base.join("b/nested")).unwrap();
        fs::create_dir(base.join(".hidden")).unwrap();
        fs::create_dir(base.join("empty")).unwrap();
        fs::File::create(base.join("z.txt"))
            .unwrap()
            .write_all(b"hello world")
            .unwrap();
        fs::File::create(base.join("a.txt")).unwrap();
        fs::File::create(base.join("b/nested/deep.txt")).unwrap();
        fs::File::create(base.join(".hidden/secret.py")).unwrap();

        dir
    }

    fn relative(root: &Path, path: &Path) -> String {
        path.strip_prefix(root)
            .unwrap()
            .to_string_lossy()
            .replace('\\', "/")
    }

    fn files(root: &Path, entries: Vec<WalkEntry>) -> Vec<String> {
        entries
            .into_iter()
            .filter_map(|entry| match entry {
                WalkEntry::File(path) => Some(relative(root, &path)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_exists_and_is_dir() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        assert!(fs.exists(&temp.path().join("z.txt")));
        assert!(!fs.exists(&temp.path().join("nonexistent")));
        assert!(fs.is_dir(&temp.path().join("b")));
        assert!(!fs.is_dir(&temp.path().join("z.txt")));
    }

    #[test]
    fn test_read_to_string() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let content = fs.read_to_string(&temp.path().join("z.txt")).unwrap();
        assert_eq!(content, "hello world");
        assert!(fs.read_to_string(&temp.path().join("missing.txt")).is_err());
    }

    #[test]
    fn test_read_invalid_utf8() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("binary.js");
        fs::write(&path, [b'o', b'k', 0xff]).unwrap();
        let fs = RealFileSystem::new();

        assert!(fs.read_to_string(&path).is_err());
        assert_eq!(fs.read_to_string_lossy(&path).unwrap(), "ok\u{FFFD}");
        assert!(fs
            .read_to_string_lossy(&temp.path().join("missing.js"))
            .is_err());
    }

    #[test]
    fn test_walk_files_sorted_and_includes_hidden() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let entries = fs.walk_files(temp.path(), &WalkOptions::default());
        assert_eq!(
            files(temp.path(), entries),
            vec![".hidden/secret.py", "a.txt", "b/nested/deep.txt", "z.txt"]
        );
    }

    #[test]
    fn test_walk_files_unbounded_by_default() {
        let temp = TempDir::new().unwrap();
        let deep: PathBuf = (0..80).map(|i| format!("d{}", i)).collect();
        fs::create_dir_all(temp.path().join(&deep)).unwrap();
        fs::write(temp.path().join(&deep).join("requirements.txt"), "redis\n").unwrap();

        let entries = RealFileSystem::new().walk_files(temp.path(), &WalkOptions::default());
        assert_eq!(entries.len(), 1);
        assert!(matches!(&entries[0], WalkEntry::File(p) if p.ends_with("requirements.txt")));
    }

    #[test]
    fn test_walk_files_max_depth_reports_cut_directories() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();
        let options = WalkOptions {
            max_depth: Some(1),
            ..WalkOptions::default()
        };

        let entries = fs.walk_files(temp.path(), &options);
        let cut: Vec<String> = entries
            .iter()
            .filter_map(|entry| match entry {
                WalkEntry::DepthLimited(path) => Some(relative(temp.path(), path)),
                _ => None,
            })
            .collect();

        // `empty` has nothing below it, so nothing was skipped there
        assert_eq!(cut, vec![".hidden", "b"]);
        assert_eq!(files(temp.path(), entries), vec!["a.txt", "z.txt"]);
    }

    #[test]
    fn test_walk_files_respects_gitignore_when_asked() {
        let temp = create_test_dir();
        let base = temp.path();
        fs::create_dir(base.join(".git")).unwrap();
        fs::write(base.join(".gitignore"), "b/\n").unwrap();

        let fs = RealFileSystem::new();

        let all = files(base, fs.walk_files(base, &WalkOptions::default()));
        assert!(all.contains(&"b/nested/deep.txt".to_string()));

        let options = WalkOptions {
            respect_gitignore: true,
            ..WalkOptions::default()
        };
        let filtered = files(base, fs.walk_files(base, &options));
        assert!(!filtered.contains(&"b/nested/deep.txt".to_string()));
        assert!(filtered.contains(&"a.txt".to_string()));
    }

    #[test]
    fn test_canonicalize() {
        let temp = create_test_dir();
        let fs = RealFileSystem::new();

        let canonical = fs.canonicalize(temp.path()).unwrap();
        assert!(canonical.is_absolute());
    }
}
