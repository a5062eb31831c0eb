//! Mock content store for testing.
//!
//! Provides [`MockContentStore`] for unit testing without filesystem access.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::RwLock;

use crate::store::{ContentStore, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Mock";

/// In-memory content store.
///
/// # Example
///
/// ```ignore
/// use sdoc_content::{ContentStore, MockContentStore};
///
/// let store = MockContentStore::new()
///     .with_document("surrealql", "index", "# SurrealQL")
///     .with_document("surrealql", "functions", "# Functions");
///
/// assert_eq!(store.members("surrealql").unwrap(), vec!["functions", "index"]);
/// ```
#[derive(Debug, Default)]
pub struct MockContentStore {
    collections: RwLock<HashMap<String, BTreeMap<String, String>>>,
    failing: RwLock<HashSet<String>>,
}

impl MockContentStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document to a collection.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(
        self,
        collection: impl Into<String>,
        key: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.collections
            .write()
            .unwrap()
            .entry(collection.into())
            .or_default()
            .insert(key.into(), content.into());
        self
    }

    /// Make every operation on a collection fail with a permission error.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failing_collection(self, collection: impl Into<String>) -> Self {
        self.failing.write().unwrap().insert(collection.into());
        self
    }

    fn check(&self, collection: &str) -> Result<(), StorageError> {
        if self.failing.read().unwrap().contains(collection) {
            return Err(StorageError::new(BACKEND, StorageErrorKind::PermissionDenied).at(collection));
        }
        Ok(())
    }
}

impl ContentStore for MockContentStore {
    fn members(&self, collection: &str) -> Result<Vec<String>, StorageError> {
        self.check(collection)?;
        Ok(self
            .collections
            .read()
            .unwrap()
            .get(collection)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default())
    }

    fn read(&self, collection: &str, key: &str) -> Result<String, StorageError> {
        self.check(collection)?;
        self.collections
            .read()
            .unwrap()
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned()
            .ok_or_else(|| StorageError::not_found(BACKEND, format!("{collection}/{key}")))
    }

    fn exists(&self, collection: &str, key: &str) -> bool {
        self.read(collection, key).is_ok()
    }
}
