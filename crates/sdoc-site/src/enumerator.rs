//! Prerender path enumeration for static builds.

use std::collections::BTreeSet;

use rayon::prelude::*;
use sdoc_content::{ContentStore, StorageError};

use crate::collection::{CollectionName, CollectionRegistry};

/// Deduplicated, sorted set of URL paths to prerender.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct PrerenderPathSet(BTreeSet<String>);

impl PrerenderPathSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a path. Returns `false` if it was already present.
    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.0.insert(path.into())
    }

    /// Add every path of another set.
    pub fn union_with(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Whether the set holds `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    /// Paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Number of paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for PrerenderPathSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<S: Into<String>> FromIterator<S> for PrerenderPathSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Options for path enumeration.
#[derive(Clone, Copy, Debug, Default)]
pub struct EnumerateOptions {
    /// Include each collection root even without an `index` document.
    pub landing_page: bool,
    /// Log and skip collections whose listing fails instead of failing the
    /// whole enumeration.
    pub skip_failed: bool,
}

/// Listing a collection failed during [`enumerate_all`].
#[derive(Debug, thiserror::Error)]
#[error("Failed to list collection {collection}: {source}")]
pub struct EnumerateError {
    /// Collection whose listing failed.
    pub collection: CollectionName,
    /// Underlying storage error.
    #[source]
    pub source: StorageError,
}

/// Map the member keys of one collection to URL paths.
///
/// An empty member list is not an error: it yields an empty set, or just the
/// collection root when `options.landing_page` is set.
pub fn enumerate_paths<I>(
    collection: &CollectionName,
    members: I,
    options: EnumerateOptions,
) -> PrerenderPathSet
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut paths: PrerenderPathSet = members
        .into_iter()
        .map(|key| collection.path_for_key(key.as_ref()))
        .collect();
    if options.landing_page {
        paths.insert(collection.route_prefix());
    }
    paths
}

/// Enumerate prerender paths for every registered collection.
///
/// Collections are listed in parallel; the result is the union of all
/// per-collection sets.
///
/// # Errors
///
/// Returns the first [`EnumerateError`] in registry order, unless
/// `options.skip_failed` is set, in which case failed collections are logged
/// and left out.
pub fn enumerate_all(
    registry: &CollectionRegistry,
    store: &dyn ContentStore,
    options: EnumerateOptions,
) -> Result<PrerenderPathSet, EnumerateError> {
    let results: Vec<_> = registry
        .collections()
        .into_par_iter()
        .map(|collection| match store.members(&collection.storage_location()) {
            Ok(members) => Ok(enumerate_paths(&collection, &members, options)),
            Err(source) => Err(EnumerateError { collection, source }),
        })
        .collect();

    let mut all = PrerenderPathSet::new();
    for result in results {
        match result {
            Ok(paths) => all.union_with(paths),
            Err(e) if options.skip_failed => {
                tracing::warn!(collection = %e.collection, error = %e.source, "Skipping collection");
            }
            Err(e) => return Err(e),
        }
    }

    tracing::debug!(
        collections = registry.len(),
        paths = all.len(),
        "Enumerated prerender paths"
    );
    Ok(all)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sdoc_content::{MockContentStore, StorageErrorKind};

    use super::*;

    fn registry() -> CollectionRegistry {
        CollectionRegistry::new(["surrealdb", "surrealql"], ["rust"])
    }

    fn set(paths: &[&str]) -> PrerenderPathSet {
        paths.iter().copied().collect()
    }

    #[test]
    fn test_enumerate_paths() {
        let collection = registry().area("surrealdb").unwrap();

        let paths = enumerate_paths(&collection, ["index", "a", "a/b"], EnumerateOptions::default());

        assert_eq!(paths, set(&["/surrealdb", "/surrealdb/a", "/surrealdb/a/b"]));
    }

    #[test]
    fn test_enumerate_paths_dedupes_nested_index() {
        let collection = registry().sdk("rust").unwrap();

        let paths = enumerate_paths(
            &collection,
            ["index", "methods", "methods/index", "methods/select"],
            EnumerateOptions::default(),
        );

        assert_eq!(
            paths,
            set(&["/sdk/rust", "/sdk/rust/methods", "/sdk/rust/methods/select"])
        );
    }

    #[test]
    fn test_enumerate_paths_empty_collection() {
        let collection = registry().area("surrealql").unwrap();
        let members: [&str; 0] = [];

        assert!(enumerate_paths(&collection, members, EnumerateOptions::default()).is_empty());

        let landing = EnumerateOptions {
            landing_page: true,
            ..EnumerateOptions::default()
        };
        assert_eq!(enumerate_paths(&collection, members, landing), set(&["/surrealql"]));
    }

    #[test]
    fn test_enumerate_paths_landing_page_without_index() {
        let collection = registry().area("surrealql").unwrap();
        let landing = EnumerateOptions {
            landing_page: true,
            ..EnumerateOptions::default()
        };

        let paths = enumerate_paths(&collection, ["functions"], landing);

        assert_eq!(paths, set(&["/surrealql", "/surrealql/functions"]));
    }

    #[test]
    fn test_enumerate_all_unions_collections() {
        let store = MockContentStore::new()
            .with_document("surrealdb", "index", "# SurrealDB")
            .with_document("surrealdb", "install", "# Install")
            .with_document("sdk/rust", "index", "# Rust")
            .with_document("sdk/rust", "methods/select", "# select")
            .with_document("unregistered", "index", "# Ignored");

        let paths = enumerate_all(&registry(), &store, EnumerateOptions::default()).unwrap();

        assert_eq!(
            paths,
            set(&[
                "/sdk/rust",
                "/sdk/rust/methods/select",
                "/surrealdb",
                "/surrealdb/install",
            ])
        );
    }

    #[test]
    fn test_enumerate_all_propagates_failure() {
        let store = MockContentStore::new()
            .with_document("surrealdb", "index", "# SurrealDB")
            .with_failing_collection("surrealql");

        let err = enumerate_all(&registry(), &store, EnumerateOptions::default()).unwrap_err();

        assert_eq!(err.collection.to_string(), "doc-surrealql");
        assert_eq!(err.source.kind, StorageErrorKind::PermissionDenied);
    }

    #[test]
    fn test_enumerate_all_skips_failed() {
        let store = MockContentStore::new()
            .with_document("surrealdb", "index", "# SurrealDB")
            .with_failing_collection("surrealql");
        let options = EnumerateOptions {
            skip_failed: true,
            ..EnumerateOptions::default()
        };

        let paths = enumerate_all(&registry(), &store, options).unwrap();

        assert_eq!(paths, set(&["/surrealdb"]));
    }

    #[test]
    fn test_serialize_as_sorted_array() {
        let paths = set(&["/b", "/a", "/a"]);

        assert_eq!(serde_json::to_string(&paths).unwrap(), r#"["/a","/b"]"#);
    }
}
