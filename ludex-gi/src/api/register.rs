//! Game registration endpoint

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::{GameRecord, ScoreRecord};
use crate::AppState;

use super::parse_appid;

/// POST /api/register request
///
/// The app id may arrive as a JSON number or a numeric string.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub appid: Option<serde_json::Value>,
}

/// POST /api/register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub ok: bool,
    pub saved: GameRecord,
    pub scores: ScoreRecord,
}

/// POST /api/register
///
/// Imports one storefront app into the catalog: metadata, artwork, parsed
/// requirement specs, and resolved hardware benchmark scores.
pub async fn register_game(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    let appid = appid_from_value(request.appid.as_ref())?;

    match state.registrar.register(appid).await {
        Ok(outcome) => Ok(Json(RegisterResponse {
            ok: true,
            saved: outcome.saved,
            scores: outcome.scores,
        })),
        Err(e) => {
            tracing::error!(appid = appid, error = %e, "Registration failed");
            *state.last_error.write().await = Some(e.to_string());
            Err(e.into())
        }
    }
}

/// Accept an app id as a JSON number or digit string.
fn appid_from_value(value: Option<&serde_json::Value>) -> Result<i64, ApiError> {
    match value {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .filter(|id| *id >= 0)
            .ok_or_else(|| ApiError::BadRequest("valid appid required".to_string())),
        Some(serde_json::Value::String(s)) => parse_appid(s),
        _ => Err(ApiError::BadRequest("valid appid required".to_string())),
    }
}

/// Build registration routes
pub fn register_routes() -> Router<AppState> {
    Router::new().route("/api/register", post(register_game))
}
