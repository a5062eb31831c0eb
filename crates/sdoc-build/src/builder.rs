//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use sdoc_content::INDEX_KEY;
use sdoc_site::{CollectionName, EnumerateError, PageError, Route, Site};

use crate::template::{BreadcrumbData, PageData, render_page};

/// Name of the route manifest written next to the pages.
pub const ROUTES_FILENAME: &str = "routes.json";

/// Configuration for static site building.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Site name appended to every page title.
    pub site_name: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            site_name: "Documentation".to_owned(),
        }
    }
}

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Listing the prerender paths failed.
    #[error(transparent)]
    Enumerate(#[from] EnumerateError),
    /// A prerender path couldn't be rendered.
    #[error("Failed to render {path}: {source}")]
    Page {
        /// URL path of the page.
        path: String,
        /// Underlying page error.
        #[source]
        source: PageError,
    },
    /// Serialising the route manifest failed.
    #[error("Failed to write route manifest: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of a successful build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildSummary {
    /// Number of pages written.
    pub pages: usize,
}

/// Builds a static documentation site.
///
/// Every prerender path `/<p>` becomes `<output>/<p>/index.html`; the sorted
/// path list is written to `<output>/routes.json`.
pub struct StaticSiteBuilder {
    site: Arc<Site>,
    config: BuildConfig,
}

impl StaticSiteBuilder {
    /// Create a new builder.
    #[must_use]
    pub fn new(site: Arc<Site>, config: BuildConfig) -> Self {
        Self { site, config }
    }

    /// Render every prerender path into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if enumeration, rendering or writing fails.
    pub fn build(&self, output_dir: &Path) -> Result<BuildSummary, BuildError> {
        let paths = self.site.prerender_paths()?;
        fs::create_dir_all(output_dir)?;

        let list: Vec<&str> = paths.iter().collect();
        list.par_iter()
            .try_for_each(|path| self.build_page(path, output_dir))?;

        let manifest = serde_json::to_string_pretty(&paths)?;
        fs::write(output_dir.join(ROUTES_FILENAME), manifest)?;

        tracing::info!(pages = paths.len(), output = %output_dir.display(), "Static site built");
        Ok(BuildSummary { pages: paths.len() })
    }

    fn build_page(&self, path: &str, output_dir: &Path) -> Result<(), BuildError> {
        let page = self.site.page(path).map_err(|source| BuildError::Page {
            path: path.to_owned(),
            source,
        })?;

        let html = render_page(&PageData {
            site_name: &self.config.site_name,
            title: &page.title,
            collection: page.route.collection.to_string(),
            html_content: &page.html,
            breadcrumbs: breadcrumbs(&self.site, &page.route),
            toc: &page.toc,
        });

        let file = output_file(output_dir, path);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&file, html)?;
        tracing::debug!(path, file = %file.display(), "Wrote page");
        Ok(())
    }
}

/// `<output>/<path>/index.html`.
fn output_file(output_dir: &Path, path: &str) -> PathBuf {
    output_dir
        .join(path.trim_start_matches('/'))
        .join("index.html")
}

/// Collection root followed by every ancestor of the page. Ancestors without
/// a page of their own are not linked.
fn breadcrumbs(site: &Site, route: &Route) -> Vec<BreadcrumbData> {
    let collection = &route.collection;
    let (CollectionName::Area(name) | CollectionName::Sdk(name)) = collection;
    let mut path = collection.route_prefix();
    let mut crumbs = vec![BreadcrumbData {
        title: name.clone(),
        path: site.has_page(collection, INDEX_KEY).then(|| path.clone()),
    }];

    if route.key.is_index() {
        return crumbs;
    }

    let segments = route.key.segments();
    for (depth, segment) in segments[..segments.len() - 1].iter().enumerate() {
        path.push('/');
        path.push_str(segment);
        let key = segments[..=depth].join("/");
        crumbs.push(BreadcrumbData {
            title: segment.clone(),
            path: site.has_page(collection, &key).then(|| path.clone()),
        });
    }
    crumbs
}
