//! Collection names and the registry of known collections.
//!
//! Every content area (`surrealql`, `cloud`, ...) is its own collection,
//! identified as `doc-<area>` and served under `/<area>`. Every SDK is a
//! collection identified as `doc-sdk-<sdk>` and served under `/sdk/<sdk>`.
//!
//! [`CollectionName`] values cannot be built from arbitrary strings; they come
//! out of a [`CollectionRegistry`], which rejects names it doesn't know.

use std::collections::BTreeSet;
use std::fmt;

use sdoc_content::INDEX_KEY;

use crate::resolver::RouteError;

/// Route segment that introduces an SDK collection.
pub const SDK_SEGMENT: &str = "sdk";

/// Prefix of every collection identifier.
const ID_PREFIX: &str = "doc-";

/// A known content collection.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CollectionName {
    /// Top-level content area, `doc-<area>`.
    Area(String),
    /// SDK reference, `doc-sdk-<sdk>`.
    Sdk(String),
}

impl CollectionName {
    /// URL prefix the collection is served under (`/surrealql`, `/sdk/rust`).
    #[must_use]
    pub fn route_prefix(&self) -> String {
        format!("/{}", self.storage_location())
    }

    /// Location of the collection inside the content store (`surrealql`, `sdk/rust`).
    #[must_use]
    pub fn storage_location(&self) -> String {
        match self {
            Self::Area(area) => area.clone(),
            Self::Sdk(sdk) => format!("{SDK_SEGMENT}/{sdk}"),
        }
    }

    /// Number of `/`-separated URL segments, counting the empty one before the
    /// leading slash, that belong to the collection rather than the content key.
    #[must_use]
    pub fn skip_segments(&self) -> usize {
        match self {
            Self::Area(_) => 2,
            Self::Sdk(_) => 3,
        }
    }

    /// URL path of a content key inside this collection.
    ///
    /// `index` maps to the bare collection root, `a/index` to `<root>/a`.
    #[must_use]
    pub fn path_for_key(&self, key: &str) -> String {
        let key = key.trim_matches('/');
        let key = if key == INDEX_KEY {
            ""
        } else {
            key.strip_suffix(INDEX_KEY)
                .and_then(|k| k.strip_suffix('/'))
                .unwrap_or(key)
        };

        let prefix = self.route_prefix();
        if key.is_empty() {
            prefix
        } else {
            format!("{prefix}/{key}")
        }
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Area(area) => write!(f, "{ID_PREFIX}{area}"),
            Self::Sdk(sdk) => write!(f, "{ID_PREFIX}{SDK_SEGMENT}-{sdk}"),
        }
    }
}

impl serde::Serialize for CollectionName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Read-only set of known areas and SDKs.
///
/// Built once at startup and shared (usually behind an `Arc`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollectionRegistry {
    areas: BTreeSet<String>,
    sdks: BTreeSet<String>,
}

impl CollectionRegistry {
    /// Create a registry from lists of area and SDK names.
    pub fn new<A, S>(areas: A, sdks: S) -> Self
    where
        A: IntoIterator,
        A::Item: Into<String>,
        S: IntoIterator,
        S::Item: Into<String>,
    {
        Self {
            areas: areas.into_iter().map(Into::into).collect(),
            sdks: sdks.into_iter().map(Into::into).collect(),
        }
    }

    /// Look up an area collection.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UnknownCollection`] if the area isn't registered.
    pub fn area(&self, name: &str) -> Result<CollectionName, RouteError> {
        if self.areas.contains(name) {
            Ok(CollectionName::Area(name.to_owned()))
        } else {
            Err(RouteError::UnknownCollection(format!("{ID_PREFIX}{name}")))
        }
    }

    /// Look up an SDK collection.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UnknownCollection`] if the SDK isn't registered.
    pub fn sdk(&self, name: &str) -> Result<CollectionName, RouteError> {
        if self.sdks.contains(name) {
            Ok(CollectionName::Sdk(name.to_owned()))
        } else {
            Err(RouteError::UnknownCollection(format!(
                "{ID_PREFIX}{SDK_SEGMENT}-{name}"
            )))
        }
    }

    /// Parse a collection identifier such as `doc-surrealql` or `doc-sdk-rust`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UnknownCollection`] if the identifier doesn't name
    /// a registered collection.
    pub fn parse(&self, id: &str) -> Result<CollectionName, RouteError> {
        let unknown = || RouteError::UnknownCollection(id.to_owned());
        let name = id.strip_prefix(ID_PREFIX).ok_or_else(unknown)?;

        if let Some(sdk) = name
            .strip_prefix(SDK_SEGMENT)
            .and_then(|rest| rest.strip_prefix('-'))
            && self.sdks.contains(sdk)
        {
            return Ok(CollectionName::Sdk(sdk.to_owned()));
        }
        self.area(name).map_err(|_| unknown())
    }

    /// All collections: areas first, then SDKs, each sorted by name.
    #[must_use]
    pub fn collections(&self) -> Vec<CollectionName> {
        self.areas
            .iter()
            .cloned()
            .map(CollectionName::Area)
            .chain(self.sdks.iter().cloned().map(CollectionName::Sdk))
            .collect()
    }

    /// Number of registered collections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.areas.len() + self.sdks.len()
    }

    /// Whether no collection is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.areas.is_empty() && self.sdks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn registry() -> CollectionRegistry {
        CollectionRegistry::new(["surrealdb", "surrealql", "cloud"], ["rust", "javascript"])
    }

    #[test]
    fn test_display() {
        let registry = registry();

        assert_eq!(registry.area("surrealql").unwrap().to_string(), "doc-surrealql");
        assert_eq!(registry.sdk("rust").unwrap().to_string(), "doc-sdk-rust");
    }

    #[test]
    fn test_unknown_names_rejected() {
        let registry = registry();

        assert_eq!(
            registry.area("nope"),
            Err(RouteError::UnknownCollection("doc-nope".to_owned()))
        );
        assert_eq!(
            registry.sdk("cobol"),
            Err(RouteError::UnknownCollection("doc-sdk-cobol".to_owned()))
        );
        // SDK names are not areas and vice versa
        assert!(registry.area("rust").is_err());
        assert!(registry.sdk("cloud").is_err());
    }

    #[test]
    fn test_parse_round_trips_display() {
        let registry = registry();

        for collection in registry.collections() {
            assert_eq!(registry.parse(&collection.to_string()), Ok(collection));
        }
        assert!(registry.parse("surrealql").is_err());
        assert!(registry.parse("doc-sdk-cobol").is_err());
    }

    #[test]
    fn test_parse_area_with_sdk_prefix() {
        let registry = CollectionRegistry::new(["sdk-guides"], ["rust"]);

        assert_eq!(
            registry.parse("doc-sdk-guides"),
            Ok(CollectionName::Area("sdk-guides".to_owned()))
        );
        assert_eq!(
            registry.parse("doc-sdk-rust"),
            Ok(CollectionName::Sdk("rust".to_owned()))
        );
    }

    #[test]
    fn test_route_prefix_and_storage_location() {
        let registry = registry();
        let area = registry.area("surrealdb").unwrap();
        let sdk = registry.sdk("rust").unwrap();

        assert_eq!(area.route_prefix(), "/surrealdb");
        assert_eq!(area.storage_location(), "surrealdb");
        assert_eq!(sdk.route_prefix(), "/sdk/rust");
        assert_eq!(sdk.storage_location(), "sdk/rust");
    }

    #[test]
    fn test_path_for_key() {
        let area = registry().area("surrealdb").unwrap();

        assert_eq!(area.path_for_key("index"), "/surrealdb");
        assert_eq!(area.path_for_key("a"), "/surrealdb/a");
        assert_eq!(area.path_for_key("a/b"), "/surrealdb/a/b");
        assert_eq!(area.path_for_key("a/index"), "/surrealdb/a");
        assert_eq!(area.path_for_key(""), "/surrealdb");
        // Only a whole "index" segment is special
        assert_eq!(area.path_for_key("reindex"), "/surrealdb/reindex");
    }

    #[test]
    fn test_collections_order() {
        let names: Vec<String> = registry()
            .collections()
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            names,
            vec![
                "doc-cloud",
                "doc-surrealdb",
                "doc-surrealql",
                "doc-sdk-javascript",
                "doc-sdk-rust",
            ]
        );
        assert_eq!(registry().len(), 5);
        assert!(CollectionRegistry::default().is_empty());
    }

    #[test]
    fn test_serialize_as_identifier() {
        let sdk = registry().sdk("rust").unwrap();

        assert_eq!(serde_json::to_string(&sdk).unwrap(), "\"doc-sdk-rust\"");
    }
}
