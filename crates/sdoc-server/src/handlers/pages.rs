//! Page lookup by URL path, answered as JSON with an `ETag`.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use md5::{Digest, Md5};
use sdoc_site::{HeadingRecord, Page};
use serde::Serialize;

use crate::error::ServerError;
use crate::handlers::to_url_path;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageResponse {
    /// `doc-surrealql`, `doc-sdk-rust`, ...
    collection: String,
    key: String,
    path: String,
    title: String,
    /// False for a generated landing page.
    has_content: bool,
    toc: Vec<HeadingRecord>,
    /// Rendered HTML.
    content: String,
}

impl From<Page> for PageResponse {
    fn from(page: Page) -> Self {
        Self {
            collection: page.route.collection.to_string(),
            key: page.route.key.to_string(),
            path: page.route.path(),
            title: page.title,
            has_content: page.has_content,
            toc: page.toc,
            content: page.html,
        }
    }
}

/// `GET /api/pages/{*path}`.
pub(crate) async fn get_page(
    Path(path): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let url = to_url_path(&path);
    let page = match state.site.page(&url) {
        Ok(page) => page,
        Err(source) => return Err(ServerError::Page { path: url, source }),
    };

    let tag = page_etag(&state.version, &page.html);
    let fresh = headers
        .get(header::IF_NONE_MATCH)
        .is_some_and(|seen| seen.as_bytes() == tag.as_bytes());
    if fresh {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    let cache = [
        (header::ETAG, tag),
        (header::CACHE_CONTROL, String::from("private, max-age=60")),
    ];
    Ok((cache, Json(PageResponse::from(page))).into_response())
}

/// Quoted hex of the first 8 bytes of `md5("{version}:{html}")`.
fn page_etag(version: &str, html: &str) -> String {
    let digest = Md5::new_with_prefix(version)
        .chain_update(":")
        .chain_update(html)
        .finalize();
    format!("\"{}\"", hex::encode(&digest[..8]))
}
