//! Request failures and their JSON bodies.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sdoc_site::{EnumerateError, PageError};
use serde_json::{Value, json};

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Nothing is routed at this path.
    #[error("no page at {0}")]
    PageNotFound(String),

    #[error("could not load {path}")]
    Page {
        path: String,
        #[source]
        source: PageError,
    },

    #[error("could not enumerate routes")]
    Routes(#[from] EnumerateError),
}

fn not_found_body(path: &str) -> Value {
    json!({ "error": "Page not found", "path": path })
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::PageNotFound(path) => (StatusCode::NOT_FOUND, not_found_body(&path)),
            Self::Page { path, source } if source.is_not_found() => {
                tracing::debug!(%path, reason = %source, "No page for request");
                (StatusCode::NOT_FOUND, not_found_body(&path))
            }
            Self::Page { path, source } => {
                tracing::error!(%path, error = %source, "Page load failed");
                let body = json!({ "error": source.to_string(), "path": path });
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
            Self::Routes(err) => {
                tracing::error!(collection = %err.collection, error = %err.source, "Route listing failed");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": err.to_string() }))
            }
        };

        (status, Json(body)).into_response()
    }
}
