//! Document discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};

use crate::store::INDEX_KEY;

/// File extensions recognised as documents.
pub(crate) const EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Walks one collection directory and collects content keys.
pub(crate) struct Scanner {
    root: PathBuf,
}

impl Scanner {
    /// Create a scanner rooted at a collection directory.
    pub(crate) fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Scan the collection and return sorted, de-duplicated content keys.
    ///
    /// Returns an empty Vec if the directory doesn't exist.
    pub(crate) fn scan(&self) -> std::io::Result<Vec<String>> {
        let mut keys = Vec::new();
        if self.root.is_dir() {
            self.scan_directory(&self.root, "", &mut keys)?;
        }
        keys.sort();
        keys.dedup();
        Ok(keys)
    }

    fn scan_directory(&self, dir: &Path, prefix: &str, keys: &mut Vec<String>) -> std::io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();

            // Skip hidden files/dirs
            if name.starts_with('.') {
                continue;
            }

            let path = entry.path();
            if entry.file_type()?.is_dir() {
                let child_prefix = join_key(prefix, &name);
                self.scan_directory(&path, &child_prefix, keys)?;
            } else if let Some(stem) = document_stem(&path) {
                keys.push(file_key(prefix, &stem));
            }
        }
        Ok(())
    }
}

/// File stem of a markdown/MDX file, `None` for anything else.
fn document_stem(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_string_lossy().to_ascii_lowercase();
    if !EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    Some(path.file_stem()?.to_string_lossy().into_owned())
}

/// Content key for a file stem inside a directory prefix.
///
/// Examples:
/// - `index`, prefix `""` -> `"index"`
/// - `intro`, prefix `""` -> `"intro"`
/// - `index`, prefix `"functions"` -> `"functions"`
/// - `string`, prefix `"functions"` -> `"functions/string"`
pub(crate) fn file_key(prefix: &str, stem: &str) -> String {
    match (prefix.is_empty(), stem == INDEX_KEY) {
        (true, _) => stem.to_owned(),
        (false, true) => prefix.to_owned(),
        (false, false) => format!("{prefix}/{stem}"),
    }
}

fn join_key(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_owned()
    } else {
        format!("{prefix}/{name}")
    }
}
