//! Site: routing, enumeration and page loading over one content store.

use std::sync::Arc;

use sdoc_content::{ContentStore, INDEX_KEY, StorageError};
use sdoc_markdown::{HeadingOptions, HeadingRecord, render_markdown};

use crate::collection::{CollectionName, CollectionRegistry};
use crate::enumerator::{
    EnumerateError, EnumerateOptions, PrerenderPathSet, enumerate_all, enumerate_paths,
};
use crate::resolver::{Route, RouteError, resolve};

/// Error returned when a page can't be produced.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// The URL doesn't resolve to a collection entry.
    #[error(transparent)]
    Route(#[from] RouteError),
    /// The document couldn't be loaded.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PageError {
    /// Whether the error means "no such page" rather than a failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Route(_) => true,
            Self::Storage(e) => e.is_not_found(),
        }
    }
}

/// Configuration for [`Site`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SiteConfig {
    /// Heading ID options for the table of contents.
    pub headings: HeadingOptions,
    /// Serve and prerender collection roots without an `index` document.
    pub landing_pages: bool,
    /// Leave out collections whose listing fails when enumerating paths.
    pub skip_failed: bool,
}

/// A rendered page.
#[derive(Clone, Debug)]
pub struct Page {
    /// Resolved route.
    pub route: Route,
    /// Title from the first H1, or derived from the route.
    pub title: String,
    /// Rendered HTML body.
    pub html: String,
    /// Table of contents.
    pub toc: Vec<HeadingRecord>,
    /// Whether the page has a backing document. Landing pages synthesised for
    /// collections without an `index` document don't.
    pub has_content: bool,
}

/// Documentation site over a collection registry and a content store.
///
/// Cheap to share: wrap in an `Arc` and hand out clones.
pub struct Site {
    registry: Arc<CollectionRegistry>,
    store: Arc<dyn ContentStore>,
    config: SiteConfig,
}

impl Site {
    /// Create a new site.
    #[must_use]
    pub fn new(
        registry: Arc<CollectionRegistry>,
        store: Arc<dyn ContentStore>,
        config: SiteConfig,
    ) -> Self {
        Self {
            registry,
            store,
            config,
        }
    }

    /// The collection registry.
    #[must_use]
    pub fn registry(&self) -> &CollectionRegistry {
        &self.registry
    }

    fn enumerate_options(&self) -> EnumerateOptions {
        EnumerateOptions {
            landing_page: self.config.landing_pages,
            skip_failed: self.config.skip_failed,
        }
    }

    /// Resolve a URL path to its route.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError`] for unknown collections or malformed paths.
    pub fn resolve(&self, url: &str) -> Result<Route, RouteError> {
        resolve(&self.registry, url)
    }

    /// Load and render the page at a URL path.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::Route`] if the URL doesn't resolve and
    /// [`PageError::Storage`] if the document can't be read.
    pub fn page(&self, url: &str) -> Result<Page, PageError> {
        let route = self.resolve(url)?;
        let location = route.collection.storage_location();

        let markdown = match self.store.read(&location, &route.key.to_string()) {
            Ok(markdown) => markdown,
            Err(e) if e.is_not_found() && route.key.is_index() && self.config.landing_pages => {
                return Ok(Self::landing_page(route));
            }
            Err(e) => return Err(e.into()),
        };

        let rendered = render_markdown(&markdown, self.config.headings);
        let title = rendered
            .title
            .unwrap_or_else(|| fallback_title(&route));
        tracing::debug!(url, collection = %route.collection, key = %route.key, "Rendered page");

        Ok(Page {
            route,
            title,
            html: rendered.html,
            toc: rendered.headings,
            has_content: true,
        })
    }

    fn landing_page(route: Route) -> Page {
        Page {
            title: fallback_title(&route),
            route,
            html: String::new(),
            toc: Vec::new(),
            has_content: false,
        }
    }

    /// Every URL path to prerender.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerateError`] if listing a collection fails and
    /// `skip_failed` isn't set.
    pub fn prerender_paths(&self) -> Result<PrerenderPathSet, EnumerateError> {
        enumerate_all(&self.registry, self.store.as_ref(), self.enumerate_options())
    }

    /// URL paths to prerender for one collection.
    ///
    /// # Errors
    ///
    /// Returns [`EnumerateError`] if the collection can't be listed.
    pub fn collection_paths(
        &self,
        collection: &CollectionName,
    ) -> Result<PrerenderPathSet, EnumerateError> {
        let members = self
            .store
            .members(&collection.storage_location())
            .map_err(|source| EnumerateError {
                collection: collection.clone(),
                source,
            })?;
        Ok(enumerate_paths(collection, &members, self.enumerate_options()))
    }

    /// Whether [`Site::page`] has something to show for `key` in `collection`:
    /// a document, or a landing page for the root.
    #[must_use]
    pub fn has_page(&self, collection: &CollectionName, key: &str) -> bool {
        (key == INDEX_KEY && self.config.landing_pages)
            || self.store.exists(&collection.storage_location(), key)
    }
}

/// Title for pages without an H1: the last key segment, or the collection
/// name for landing pages.
fn fallback_title(route: &Route) -> String {
    if route.key.is_index() {
        match &route.collection {
            CollectionName::Area(name) | CollectionName::Sdk(name) => titlecase(name),
        }
    } else {
        titlecase(route.key.last())
    }
}

/// `"getting-started"` -> `"Getting Started"`.
fn titlecase(slug: &str) -> String {
    slug.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
