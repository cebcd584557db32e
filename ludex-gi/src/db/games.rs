//! Games catalog queries

use ludex_common::{Error, Result};
use sqlx::SqlitePool;

use crate::models::GameRecord;
use crate::services::spec_parser::SpecMap;

/// Insert or update a game row, keyed by the storefront app id.
pub async fn upsert_game(pool: &SqlitePool, game: &GameRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO games (
            steam_app_id, title, slug, genre, developer, publisher,
            description, cover_image_url, media_folder, release_date,
            platform, price, specs_min, specs_rec
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(steam_app_id) DO UPDATE SET
            title = excluded.title,
            slug = excluded.slug,
            genre = excluded.genre,
            developer = excluded.developer,
            publisher = excluded.publisher,
            description = excluded.description,
            cover_image_url = excluded.cover_image_url,
            media_folder = excluded.media_folder,
            release_date = excluded.release_date,
            platform = excluded.platform,
            price = excluded.price,
            specs_min = excluded.specs_min,
            specs_rec = excluded.specs_rec,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(game.steam_app_id)
    .bind(&game.title)
    .bind(&game.slug)
    .bind(&game.genre)
    .bind(&game.developer)
    .bind(&game.publisher)
    .bind(&game.description)
    .bind(&game.cover_image_url)
    .bind(&game.media_folder)
    .bind(&game.release_date)
    .bind(&game.platform)
    .bind(game.price)
    .bind(specs_to_json(&game.specs_min)?)
    .bind(specs_to_json(&game.specs_rec)?)
    .execute(pool)
    .await?;

    tracing::debug!(appid = game.steam_app_id, slug = %game.slug, "Upserted game row");

    Ok(())
}

/// Whether `slug` is already used by a different app.
///
/// A slug row owned by the same app id does not count as taken, so
/// re-registering a game keeps its slug stable.
pub async fn slug_taken_by_other(pool: &SqlitePool, slug: &str, appid: i64) -> Result<bool> {
    let row: Option<(i64,)> =
        sqlx::query_as("SELECT steam_app_id FROM games WHERE slug = ? LIMIT 1")
            .bind(slug)
            .fetch_optional(pool)
            .await?;

    Ok(matches!(row, Some((owner,)) if owner != appid))
}

/// Fetch one game row by app id.
pub async fn get_game(pool: &SqlitePool, appid: i64) -> Result<Option<GameRecord>> {
    let row: Option<(
        i64,
        String,
        String,
        String,
        String,
        String,
        String,
        String,
        String,
        Option<String>,
        String,
        Option<i64>,
        Option<String>,
        Option<String>,
    )> = sqlx::query_as(
        r#"
        SELECT steam_app_id, title, slug, genre, developer, publisher,
               description, cover_image_url, media_folder, release_date,
               platform, price, specs_min, specs_rec
        FROM games WHERE steam_app_id = ?
        "#,
    )
    .bind(appid)
    .fetch_optional(pool)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    Ok(Some(GameRecord {
        steam_app_id: row.0,
        title: row.1,
        slug: row.2,
        genre: row.3,
        developer: row.4,
        publisher: row.5,
        description: row.6,
        cover_image_url: row.7,
        media_folder: row.8,
        release_date: row.9,
        platform: row.10,
        price: row.11,
        specs_min: specs_from_json(row.12.as_deref())?,
        specs_rec: specs_from_json(row.13.as_deref())?,
    }))
}

fn specs_to_json(specs: &Option<SpecMap>) -> Result<Option<String>> {
    specs
        .as_ref()
        .map(serde_json::to_string)
        .transpose()
        .map_err(|e| Error::Internal(format!("Spec map serialization failed: {}", e)))
}

fn specs_from_json(json: Option<&str>) -> Result<Option<SpecMap>> {
    json.map(serde_json::from_str)
        .transpose()
        .map_err(|e| Error::Internal(format!("Spec map in database is corrupt: {}", e)))
}
