//! Static site generation for sdoc.
//!
//! Renders every prerender path of a [`Site`](sdoc_site::Site) to HTML and
//! writes a `routes.json` manifest.

mod builder;
mod template;

pub use builder::{BuildConfig, BuildError, BuildSummary, ROUTES_FILENAME, StaticSiteBuilder};
