//! Database access for ludex-gi

pub mod benchmarks;
pub mod games;
pub mod scores;

use anyhow::Result;
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize database connection pool
///
/// Connects to ludex.db in the root folder, creating it if missing.
pub async fn init_database_pool(db_path: &Path) -> Result<SqlitePool> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Use proper SQLite URI with mode=rwc (read, write, create)
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    tracing::debug!("Connecting to database: {}", db_url);

    let pool = SqlitePool::connect(&db_url).await?;

    init_tables(&pool).await?;

    Ok(pool)
}

/// Initialize ludex-gi tables
///
/// Creates the games catalog, per-game score rows, and the two hardware
/// benchmark tables if they don't exist.
pub async fn init_tables(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS games (
            steam_app_id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            slug TEXT NOT NULL UNIQUE,
            genre TEXT NOT NULL DEFAULT '',
            developer TEXT NOT NULL DEFAULT '',
            publisher TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            cover_image_url TEXT NOT NULL DEFAULT '',
            media_folder TEXT NOT NULL DEFAULT '',
            release_date TEXT,
            platform TEXT NOT NULL DEFAULT '',
            price INTEGER,
            specs_min TEXT,
            specs_rec TEXT,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS game_scores (
            steam_app_id INTEGER PRIMARY KEY,
            min_cpu_score TEXT NOT NULL DEFAULT '{}',
            min_gpu_score TEXT NOT NULL DEFAULT '{}',
            rec_cpu_score TEXT NOT NULL DEFAULT '{}',
            rec_gpu_score TEXT NOT NULL DEFAULT '{}',
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    for table in ["cpu_tb", "gpu_tb"] {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                model TEXT NOT NULL,
                score REAL NOT NULL
            )
            "#,
            table
        ))
        .execute(pool)
        .await?;
    }

    tracing::info!("Database tables initialized (games, game_scores, cpu_tb, gpu_tb)");

    Ok(())
}
