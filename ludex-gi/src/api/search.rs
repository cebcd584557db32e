//! Storefront search proxy endpoint

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::SearchItem;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub term: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub items: Vec<SearchItem>,
}

/// GET /api/search?term=...
///
/// Proxies a free-text storefront search.
pub async fn search_store(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<SearchResponse>> {
    let term = params.term.unwrap_or_default().trim().to_string();
    if term.is_empty() {
        return Err(ApiError::BadRequest("term required".to_string()));
    }

    let items = state.steam.search_store(&term).await?;

    tracing::debug!(term = %term, hits = items.len(), "Storefront search");

    Ok(Json(SearchResponse { items }))
}

/// Build search routes
pub fn search_routes() -> Router<AppState> {
    Router::new().route("/api/search", get(search_store))
}
