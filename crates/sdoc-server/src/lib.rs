//! JSON page API.
//!
//! `GET /api/pages/{*path}` resolves a URL path and returns the rendered page;
//! `GET /api/routes` lists every prerender path. Anything that doesn't resolve
//! to a document answers 404 with `{"error": "Page not found", "path": ...}`.

mod app;
mod error;
mod handlers;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use sdoc_content::{ContentStore, FsContentStore};
use sdoc_site::{CollectionRegistry, HeadingOptions, Site, SiteConfig};
use state::AppState;

pub use error::ServerError;

/// Everything [`run_server`] needs.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub source_dir: PathBuf,
    pub areas: Vec<String>,
    pub sdks: Vec<String>,
    /// Serve collection roots without an `index` document.
    pub landing_pages: bool,
    pub dedupe_ids: bool,
    /// Mixed into every `ETag`.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let defaults = sdoc_config::CollectionsConfig::default();
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            source_dir: PathBuf::from("content"),
            areas: defaults.areas,
            sdks: defaults.sdks,
            landing_pages: defaults.landing_pages,
            dedupe_ids: false,
            version: String::new(),
        }
    }
}

impl ServerConfig {
    fn site(&self) -> Site {
        let store: Arc<dyn ContentStore> = Arc::new(FsContentStore::new(self.source_dir.clone()));
        let registry = CollectionRegistry::new(self.areas.clone(), self.sdks.clone());
        let config = SiteConfig {
            headings: HeadingOptions {
                dedupe_ids: self.dedupe_ids,
            },
            landing_pages: self.landing_pages,
            skip_failed: true,
        };
        Site::new(Arc::new(registry), store, config)
    }
}

/// Serve until Ctrl-C.
///
/// # Errors
///
/// Fails on an unparsable host/port or when the listener can't bind.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let router = app::create_router(Arc::new(AppState {
        site: Arc::new(config.site()),
        version: config.version.clone(),
    }));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, source_dir = %config.source_dir.display(), "Listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(ctrl_c())
        .await?;

    Ok(())
}

async fn ctrl_c() {
    tokio::signal::ctrl_c()
        .await
        .expect("Ctrl-C handler");
    tracing::info!("Ctrl-C received, draining connections");
}

/// Server settings taken from a loaded [`sdoc_config::Config`].
#[must_use]
pub fn server_config_from_config(config: &sdoc_config::Config, version: String) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.docs_resolved.source_dir.clone(),
        areas: config.collections.areas.clone(),
        sdks: config.collections.sdks.clone(),
        landing_pages: config.collections.landing_pages,
        dedupe_ids: config.toc.dedupe_ids,
        version,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_server_config_from_config() {
        let mut config = sdoc_config::Config::default();
        config.server.port = 9000;
        config.toc.dedupe_ids = true;
        config.docs_resolved.source_dir = PathBuf::from("/docs/content");

        let server = server_config_from_config(&config, "1.2.3".to_owned());

        assert_eq!(server.port, 9000);
        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.source_dir, PathBuf::from("/docs/content"));
        assert!(server.dedupe_ids);
        assert!(server.areas.contains(&"surrealql".to_owned()));
        assert_eq!(server.version, "1.2.3");
    }
}
