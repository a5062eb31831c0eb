//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod routes;
pub(crate) mod serve;
pub(crate) mod toc;

use std::sync::Arc;

use sdoc_config::Config;
use sdoc_content::FsContentStore;
use sdoc_site::{CollectionRegistry, HeadingOptions, Site, SiteConfig};

pub(crate) use build::BuildArgs;
pub(crate) use routes::RoutesArgs;
pub(crate) use serve::ServeArgs;
pub(crate) use toc::TocArgs;

/// Create a site over the configured source directory.
pub(crate) fn site_from_config(config: &Config, skip_failed: bool) -> Site {
    let registry = CollectionRegistry::new(
        config.collections.areas.iter().cloned(),
        config.collections.sdks.iter().cloned(),
    );
    let store = FsContentStore::new(config.docs_resolved.source_dir.clone());
    tracing::debug!(
        source_dir = %config.docs_resolved.source_dir.display(),
        collections = registry.len(),
        "Opening site"
    );
    let site_config = SiteConfig {
        headings: HeadingOptions {
            dedupe_ids: config.toc.dedupe_ids,
        },
        landing_pages: config.collections.landing_pages,
        skip_failed,
    };
    Site::new(Arc::new(registry), Arc::new(store), site_config)
}
