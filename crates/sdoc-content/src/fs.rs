//! Filesystem content store.
//!
//! Layout: each collection is a directory under the source root, named after
//! its storage location (`<root>/surrealql/`, `<root>/sdk/rust/`). Documents are
//! `.md` or `.mdx` files; `index` files stand for their directory.

use std::path::{Path, PathBuf};

use crate::scanner::{EXTENSIONS, Scanner};
use crate::store::{ContentStore, INDEX_KEY, StorageError, is_valid_key};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Filesystem-backed [`ContentStore`].
#[derive(Debug, Clone)]
pub struct FsContentStore {
    source_dir: PathBuf,
}

impl FsContentStore {
    /// Create a store rooted at `source_dir`.
    #[must_use]
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    fn collection_dir(&self, collection: &str) -> Result<PathBuf, StorageError> {
        if !is_valid_key(collection) {
            return Err(StorageError::invalid_path(BACKEND, collection));
        }
        Ok(self.source_dir.join(collection))
    }

    /// Candidate files for a key, in lookup order.
    ///
    /// `functions` may live in `functions.md(x)` or `functions/index.md(x)`;
    /// the landing page only in `index.md(x)`.
    fn candidates(dir: &Path, key: &str) -> Vec<PathBuf> {
        let mut paths = Vec::with_capacity(EXTENSIONS.len() * 2);
        for ext in EXTENSIONS {
            paths.push(dir.join(format!("{key}.{ext}")));
        }
        if key != INDEX_KEY {
            for ext in EXTENSIONS {
                paths.push(dir.join(key).join(format!("{INDEX_KEY}.{ext}")));
            }
        }
        paths
    }

    /// Resolve a content key to an existing file.
    fn resolve(&self, collection: &str, key: &str) -> Result<PathBuf, StorageError> {
        let dir = self.collection_dir(collection)?;
        if !is_valid_key(key) {
            return Err(StorageError::invalid_path(BACKEND, format!("{collection}/{key}")));
        }

        Self::candidates(&dir, key)
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| StorageError::not_found(BACKEND, dir.join(key)))
    }
}

impl ContentStore for FsContentStore {
    fn members(&self, collection: &str) -> Result<Vec<String>, StorageError> {
        let dir = self.collection_dir(collection)?;
        let keys = Scanner::new(dir.clone())
            .scan()
            .map_err(|e| StorageError::from_io(BACKEND, e, dir))?;

        tracing::debug!(collection, count = keys.len(), "Scanned collection");
        Ok(keys)
    }

    fn read(&self, collection: &str, key: &str) -> Result<String, StorageError> {
        let path = self.resolve(collection, key)?;
        std::fs::read_to_string(&path)
            .map_err(|e| StorageError::from_io(BACKEND, e, path))
    }

    fn exists(&self, collection: &str, key: &str) -> bool {
        self.resolve(collection, key).is_ok()
    }
}
