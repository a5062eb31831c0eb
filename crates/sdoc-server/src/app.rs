//! Router construction.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/routes", get(handlers::routes::get_routes))
        .route("/api/pages/{*path}", get(handlers::pages::get_page))
        .fallback(handlers::not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use pretty_assertions::assert_eq;
    use sdoc_content::MockContentStore;
    use sdoc_site::{CollectionRegistry, Site, SiteConfig};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    fn router() -> Router {
        let store = MockContentStore::new()
            .with_document("surrealql", "index", "# SurrealQL\n")
            .with_document(
                "surrealql",
                "functions/string",
                "# String functions\n\n## string::len\n\n## string::concat\n",
            )
            .with_document("sdk/rust", "index", "# Rust SDK\n")
            .with_failing_collection("cloud");
        let registry = CollectionRegistry::new(["surrealql", "cloud"], ["rust"]);
        let config = SiteConfig {
            skip_failed: true,
            ..SiteConfig::default()
        };
        let site = Site::new(Arc::new(registry), Arc::new(store), config);
        create_router(Arc::new(AppState {
            site: Arc::new(site),
            version: "test".to_owned(),
        }))
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_get_page() {
        let (status, json) = get(router(), "/api/pages/surrealql/functions/string").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["collection"], "doc-surrealql");
        assert_eq!(json["key"], "functions/string");
        assert_eq!(json["title"], "String functions");
        assert_eq!(json["toc"].as_array().unwrap().len(), 3);
        assert_eq!(json["toc"][1]["id"], "stringlen");
        assert!(json["content"].as_str().unwrap().contains("<h2 id=\"stringlen\">"));
    }

    #[tokio::test]
    async fn test_get_sdk_index_page() {
        let (status, json) = get(router(), "/api/pages/sdk/rust").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["collection"], "doc-sdk-rust");
        assert_eq!(json["key"], "index");
        assert_eq!(json["path"], "/sdk/rust");
    }

    #[tokio::test]
    async fn test_unknown_collection_is_404() {
        let (status, json) = get(router(), "/api/pages/blog/post").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Page not found");
        assert_eq!(json["path"], "/blog/post");
    }

    #[tokio::test]
    async fn test_sdk_without_name_is_404() {
        let (status, json) = get(router(), "/api/pages/sdk").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["path"], "/sdk");
    }

    #[tokio::test]
    async fn test_missing_document_is_404() {
        let (status, _) = get(router(), "/api/pages/surrealql/nope").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let (status, json) = get(router(), "/api/pages/cloud").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["path"], "/cloud");
    }

    #[tokio::test]
    async fn test_unmatched_route_is_404() {
        let (status, json) = get(router(), "/nothing/here").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["path"], "/nothing/here");
    }

    #[tokio::test]
    async fn test_get_routes_skips_failed_collection() {
        let (status, json) = get(router(), "/api/routes").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            serde_json::json!(["/sdk/rust", "/surrealql", "/surrealql/functions/string"])
        );
    }

    #[tokio::test]
    async fn test_etag_not_modified() {
        let response = router()
            .oneshot(
                Request::get("/api/pages/surrealql")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let etag = response.headers()[header::ETAG].clone();

        let response = router()
            .oneshot(
                Request::get("/api/pages/surrealql")
                    .header(header::IF_NONE_MATCH, etag)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    }
}
