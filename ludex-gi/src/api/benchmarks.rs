//! Benchmark catalog ingestion endpoint

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::services::hardware::HardwareTable;
use crate::AppState;

/// One benchmark catalog entry
#[derive(Debug, Deserialize)]
pub struct BenchmarkEntry {
    pub model: String,
    pub score: f64,
}

/// POST /api/benchmarks request
#[derive(Debug, Deserialize)]
pub struct LoadBenchmarksRequest {
    pub table: HardwareTable,
    pub entries: Vec<BenchmarkEntry>,
}

/// POST /api/benchmarks response
#[derive(Debug, Serialize)]
pub struct LoadBenchmarksResponse {
    pub ok: bool,
    pub table: HardwareTable,
    pub inserted: usize,
}

/// POST /api/benchmarks
///
/// Bulk-loads hardware benchmark rows into one catalog table. Score
/// resolution needs these tables populated; rows are append-only here.
pub async fn load_benchmarks(
    State(state): State<AppState>,
    Json(request): Json<LoadBenchmarksRequest>,
) -> ApiResult<Json<LoadBenchmarksResponse>> {
    if request.entries.is_empty() {
        return Err(ApiError::BadRequest("entries required".to_string()));
    }

    let mut inserted = 0;
    for entry in &request.entries {
        let model = entry.model.trim();
        if model.is_empty() {
            continue;
        }
        db::benchmarks::insert_benchmark(&state.db, request.table, model, entry.score).await?;
        inserted += 1;
    }

    tracing::info!(table = %request.table, inserted = inserted, "Benchmark rows loaded");

    Ok(Json(LoadBenchmarksResponse {
        ok: true,
        table: request.table,
        inserted,
    }))
}

/// Build benchmark ingestion routes
pub fn benchmark_routes() -> Router<AppState> {
    Router::new().route("/api/benchmarks", post(load_benchmarks))
}
