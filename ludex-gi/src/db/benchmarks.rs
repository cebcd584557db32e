//! Hardware benchmark catalog tables

use ludex_common::Result;
use sqlx::SqlitePool;

use crate::services::hardware::HardwareTable;

/// Insert one benchmark row into the selected catalog table.
pub async fn insert_benchmark(
    pool: &SqlitePool,
    table: HardwareTable,
    model: &str,
    score: f64,
) -> Result<()> {
    // Table name comes from the enum, never from user input.
    sqlx::query(&format!(
        "INSERT INTO {} (model, score) VALUES (?, ?)",
        table.table_name()
    ))
    .bind(model)
    .bind(score)
    .execute(pool)
    .await?;

    Ok(())
}

/// All (model, score) rows of the selected catalog table.
pub async fn all_models(pool: &SqlitePool, table: HardwareTable) -> Result<Vec<(String, f64)>> {
    let rows: Vec<(String, f64)> = sqlx::query_as(&format!(
        "SELECT model, score FROM {}",
        table.table_name()
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Row count of the selected catalog table.
pub async fn count(pool: &SqlitePool, table: HardwareTable) -> Result<i64> {
    let (count,): (i64,) =
        sqlx::query_as(&format!("SELECT COUNT(*) FROM {}", table.table_name()))
            .fetch_one(pool)
            .await?;

    Ok(count)
}
