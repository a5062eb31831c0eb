//! HTTP request handlers.

pub(crate) mod pages;
pub(crate) mod routes;

use axum::http::Uri;

use crate::error::ServerError;

/// Convert a wildcard capture (without leading slash) to a URL path.
pub(crate) fn to_url_path(path: &str) -> String {
    format!("/{}", path.trim_start_matches('/'))
}

/// Fallback for unmatched requests.
pub(crate) async fn not_found(uri: Uri) -> ServerError {
    ServerError::PageNotFound(uri.path().to_owned())
}
