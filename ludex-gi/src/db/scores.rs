//! Per-game hardware score rows

use ludex_common::{Error, Result};
use sqlx::SqlitePool;

use crate::models::ScoreRecord;
use crate::services::score_resolver::ScoreMap;

/// Insert or update the score row for one game.
pub async fn upsert_scores(pool: &SqlitePool, record: &ScoreRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO game_scores (
            steam_app_id, min_cpu_score, min_gpu_score, rec_cpu_score, rec_gpu_score
        )
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(steam_app_id) DO UPDATE SET
            min_cpu_score = excluded.min_cpu_score,
            min_gpu_score = excluded.min_gpu_score,
            rec_cpu_score = excluded.rec_cpu_score,
            rec_gpu_score = excluded.rec_gpu_score,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(record.steam_app_id)
    .bind(map_to_json(&record.min_cpu_score)?)
    .bind(map_to_json(&record.min_gpu_score)?)
    .bind(map_to_json(&record.rec_cpu_score)?)
    .bind(map_to_json(&record.rec_gpu_score)?)
    .execute(pool)
    .await?;

    tracing::debug!(appid = record.steam_app_id, "Upserted score row");

    Ok(())
}

/// Fetch the score row for one game.
pub async fn get_scores(pool: &SqlitePool, appid: i64) -> Result<Option<ScoreRecord>> {
    let row: Option<(i64, String, String, String, String)> = sqlx::query_as(
        r#"
        SELECT steam_app_id, min_cpu_score, min_gpu_score, rec_cpu_score, rec_gpu_score
        FROM game_scores WHERE steam_app_id = ?
        "#,
    )
    .bind(appid)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    Ok(Some(ScoreRecord {
        steam_app_id: row.0,
        min_cpu_score: map_from_json(&row.1)?,
        min_gpu_score: map_from_json(&row.2)?,
        rec_cpu_score: map_from_json(&row.3)?,
        rec_gpu_score: map_from_json(&row.4)?,
    }))
}

fn map_to_json(map: &ScoreMap) -> Result<String> {
    serde_json::to_string(map)
        .map_err(|e| Error::Internal(format!("Score map serialization failed: {}", e)))
}

fn map_from_json(json: &str) -> Result<ScoreMap> {
    serde_json::from_str(json)
        .map_err(|e| Error::Internal(format!("Score map in database is corrupt: {}", e)))
}
