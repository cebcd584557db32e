//! App detail endpoints

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::error::ApiResult;
use crate::models::AppDetail;
use crate::services::steam_client::RequirementsHtml;
use crate::AppState;

use super::parse_appid;

/// GET /api/app/:appid
///
/// Assembled storefront detail for one app, including parsed requirement
/// spec blocks.
pub async fn app_detail(
    State(state): State<AppState>,
    Path(appid): Path<String>,
) -> ApiResult<Json<AppDetail>> {
    let appid = parse_appid(&appid)?;
    let detail = state.steam.app_details(appid).await?;
    Ok(Json(detail))
}

#[derive(Debug, Serialize)]
pub struct RequirementsResponse {
    pub pc_requirements: RequirementsHtml,
}

/// GET /api/app/:appid/requirements
///
/// Raw requirement HTML blocks, unparsed.
pub async fn app_requirements(
    State(state): State<AppState>,
    Path(appid): Path<String>,
) -> ApiResult<Json<RequirementsResponse>> {
    let appid = parse_appid(&appid)?;
    let pc_requirements = state.steam.requirements_html(appid).await?;
    Ok(Json(RequirementsResponse { pc_requirements }))
}

/// Build app detail routes
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/api/app/:appid", get(app_detail))
        .route("/api/app/:appid/requirements", get(app_requirements))
}
