//! Markdown file discovery
//!
//! Walks the content root and returns every `.md` file as a forward-slash
//! normalized path relative to the root. Directories on the exclusion list
//! are pruned wherever they appear in the tree.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Read-only recursive enumeration of markdown files
pub struct FileDiscovery {
    root: PathBuf,
    excluded: HashSet<String>,
}

impl FileDiscovery {
    /// Create a discovery over `root` with the given excluded directory names
    pub fn new<P: AsRef<Path>>(root: P, excluded: &[String]) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            excluded: excluded.iter().cloned().collect(),
        }
    }

    /// Enumerate all markdown files under the root.
    ///
    /// Paths are relative to the root, `/`-separated, and sorted so the
    /// result is stable for a given filesystem state. An unreadable root
    /// (or any entry the walk cannot stat) is an error.
    pub fn discover(&self) -> Result<Vec<String>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|entry| {
                if !entry.file_type().is_dir() {
                    return true;
                }
                entry
                    .file_name()
                    .to_str()
                    .map(|name| !self.excluded.contains(name))
                    .unwrap_or(true)
            });

        for entry in walker {
            let entry =
                entry.with_context(|| format!("failed to walk {:?}", self.root))?;
            let path = entry.path();

            if entry.file_type().is_file() && is_markdown_file(path) {
                let relative = path.strip_prefix(&self.root).unwrap_or(path);
                files.push(normalize_separators(relative));
            }
        }

        files.sort();
        Ok(files)
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md")
        .unwrap_or(false)
}

fn normalize_separators(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
