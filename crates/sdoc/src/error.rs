//! CLI error types.

use sdoc_build::BuildError;
use sdoc_config::ConfigError;
use sdoc_site::{EnumerateError, RouteError};

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Enumerate(#[from] EnumerateError),

    #[error("{0}")]
    Route(#[from] RouteError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Server(String),
}
