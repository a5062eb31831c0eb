//! Collection routing and static path resolution for sdoc.
//!
//! This crate provides:
//! - [`CollectionRegistry`] and [`CollectionName`]: the closed set of known
//!   content areas and SDKs
//! - [`resolve`], [`resolve_collection`], [`resolve_content_key`]: URL path to
//!   collection entry
//! - [`enumerate_paths`], [`enumerate_all`]: the URL paths a static build
//!   must prerender
//! - [`Site`]: the above plus page loading over a [`ContentStore`](sdoc_content::ContentStore)
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use sdoc_content::FsContentStore;
//! use sdoc_site::{CollectionRegistry, Site, SiteConfig};
//!
//! let registry = CollectionRegistry::new(["surrealql"], ["rust"]);
//! let store = FsContentStore::new(PathBuf::from("content"));
//! let site = Site::new(Arc::new(registry), Arc::new(store), SiteConfig::default());
//!
//! let page = site.page("/surrealql/functions")?;
//! println!("{}", page.title);
//! # Ok(())
//! # }
//! ```

mod collection;
mod enumerator;
mod resolver;
mod site;

pub use collection::{CollectionName, CollectionRegistry, SDK_SEGMENT};
pub use enumerator::{
    EnumerateError, EnumerateOptions, PrerenderPathSet, enumerate_all, enumerate_paths,
};
pub use resolver::{ContentKey, Route, RouteError, resolve, resolve_collection, resolve_content_key};
pub use site::{Page, PageError, Site, SiteConfig};

// Re-export for convenience
pub use sdoc_markdown::{HeadingOptions, HeadingRecord};
