//! Routes API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use sdoc_site::PrerenderPathSet;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /api/routes: every prerender path, sorted.
pub(crate) async fn get_routes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PrerenderPathSet>, ServerError> {
    Ok(Json(state.site.prerender_paths()?))
}
