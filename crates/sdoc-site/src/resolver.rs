//! URL path to collection and content key resolution.
//!
//! ```text
//! /surrealql/functions/string  ->  doc-surrealql    ["functions", "string"]
//! /sdk/rust/methods/select     ->  doc-sdk-rust     ["methods", "select"]
//! /surrealdb                   ->  doc-surrealdb    ["index"]
//! ```

use std::fmt;

use sdoc_content::INDEX_KEY;

use crate::collection::{CollectionName, CollectionRegistry, SDK_SEGMENT};

/// Routing failure. Both variants mean "no such page" to a caller.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    /// The URL names an area or SDK that isn't registered.
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),
    /// The URL path can't be split into collection and key.
    #[error("Malformed URL path: {0:?}")]
    MalformedUrlPath(String),
}

/// Path segments identifying one document inside a collection.
///
/// Never empty: a URL that stops at the collection root resolves to
/// [`ContentKey::index`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentKey(Vec<String>);

impl ContentKey {
    /// The `["index"]` key of a collection landing page.
    #[must_use]
    pub fn index() -> Self {
        Self(vec![INDEX_KEY.to_owned()])
    }

    /// Whether this is the landing page key.
    #[must_use]
    pub fn is_index(&self) -> bool {
        self.0.len() == 1 && self.0[0] == INDEX_KEY
    }

    /// The key segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Last segment.
    #[must_use]
    pub fn last(&self) -> &str {
        self.0.last().map_or(INDEX_KEY, String::as_str)
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

impl serde::Serialize for ContentKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A fully resolved URL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    /// Collection owning the page.
    pub collection: CollectionName,
    /// Document key inside the collection.
    pub key: ContentKey,
}

impl Route {
    /// Canonical URL path of the route.
    #[must_use]
    pub fn path(&self) -> String {
        self.collection.path_for_key(&self.key.to_string())
    }
}

/// Path segments after the leading slash.
fn segments(url: &str) -> Result<std::str::Split<'_, char>, RouteError> {
    url.strip_prefix('/')
        .map(|rest| rest.split('/'))
        .ok_or_else(|| RouteError::MalformedUrlPath(url.to_owned()))
}

/// Find the collection a URL path belongs to.
///
/// The first segment selects an area, except `sdk`, which consumes a second
/// segment naming the SDK.
///
/// # Errors
///
/// Returns [`RouteError::MalformedUrlPath`] for paths without a leading slash,
/// an empty first segment, or `sdk` without an SDK name, and
/// [`RouteError::UnknownCollection`] for names missing from the registry.
pub fn resolve_collection(
    registry: &CollectionRegistry,
    url: &str,
) -> Result<CollectionName, RouteError> {
    let malformed = || RouteError::MalformedUrlPath(url.to_owned());
    let mut segments = segments(url)?;

    match segments.next() {
        Some(SDK_SEGMENT) => match segments.next() {
            Some(sdk) if !sdk.is_empty() => registry.sdk(sdk),
            _ => Err(malformed()),
        },
        Some(area) if !area.is_empty() => registry.area(area),
        _ => Err(malformed()),
    }
}

/// Extract the content key from a URL path.
///
/// The path is split on `/` (the empty string before the leading slash counts
/// as the first segment) and the first `skip_segments` segments are dropped.
/// Empty segments in the remainder are ignored; an empty remainder yields
/// [`ContentKey::index`].
///
/// # Errors
///
/// Returns [`RouteError::MalformedUrlPath`] if the path has fewer than
/// `skip_segments` segments or contains `.`/`..` segments.
pub fn resolve_content_key(url: &str, skip_segments: usize) -> Result<ContentKey, RouteError> {
    let malformed = || RouteError::MalformedUrlPath(url.to_owned());
    let all: Vec<&str> = url.split('/').collect();
    if all.len() < skip_segments {
        return Err(malformed());
    }

    let mut key = Vec::new();
    for segment in &all[skip_segments..] {
        match *segment {
            "" => {}
            "." | ".." => return Err(malformed()),
            s => key.push(s.to_owned()),
        }
    }

    if key.is_empty() {
        Ok(ContentKey::index())
    } else {
        Ok(ContentKey(key))
    }
}

/// Resolve a URL path to its collection and content key.
///
/// The number of leading segments belonging to the collection follows from
/// its kind, so callers never pass a skip count.
///
/// # Errors
///
/// Returns [`RouteError`] if either the collection or the key can't be resolved.
pub fn resolve(registry: &CollectionRegistry, url: &str) -> Result<Route, RouteError> {
    let collection = resolve_collection(registry, url)?;
    let key = resolve_content_key(url, collection.skip_segments())?;
    tracing::trace!(url, %collection, %key, "Resolved route");
    Ok(Route { collection, key })
}
