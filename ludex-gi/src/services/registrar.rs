//! Game registration workflow
//!
//! Orchestrates one catalog registration: fetch the storefront detail,
//! derive a stable slug, cache artwork, persist the game row, then resolve
//! hardware benchmark scores for all four tier/table slots and persist
//! those. Score enrichment is best-effort and never fails a registration.

use ludex_common::{Error, Result};
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::db;
use crate::models::{AppDetail, GameRecord, RegistrationOutcome, RequirementTier, ScoreRecord};
use crate::services::hardware::HardwareTable;
use crate::services::media_store::MediaStore;
use crate::services::score_resolver::{resolve_scores, ScoreLookup};
use crate::services::steam_client::{SteamClient, SteamError};
use crate::utils::slug::safe_slug;

/// Spec-field keywords for requirement selection, including the localized
/// spellings the storefront serves for this catalog's locale.
const CPU_FIELD_KEYWORDS: &[&str] = &["cpu", "processor", "프로세서", "proc"];
const GPU_FIELD_KEYWORDS: &[&str] = &["graphic", "video", "gpu", "그래픽", "비디오"];

/// One registration pass over a storefront app
#[derive(Clone)]
pub struct GameRegistrar<L: ScoreLookup> {
    db: SqlitePool,
    steam: Arc<SteamClient>,
    lookup: L,
    media: MediaStore,
}

impl<L: ScoreLookup> GameRegistrar<L> {
    pub fn new(db: SqlitePool, steam: Arc<SteamClient>, lookup: L, media: MediaStore) -> Self {
        Self {
            db,
            steam,
            lookup,
            media,
        }
    }

    /// Fetch the app detail from the storefront and register it.
    pub async fn register(&self, appid: i64) -> Result<RegistrationOutcome> {
        let detail = self.steam.app_details(appid).await.map_err(|e| match e {
            SteamError::AppNotFound(id) => Error::NotFound(format!("App not found: {}", id)),
            other => Error::Upstream(other.to_string()),
        })?;

        tracing::info!(appid = appid, title = %detail.name, "Registration started");

        self.register_detail(detail).await
    }

    /// Register an already-fetched app detail.
    pub async fn register_detail(&self, detail: AppDetail) -> Result<RegistrationOutcome> {
        let appid = detail.appid;

        let base_slug = safe_slug(&detail.name);
        let slug = ensure_unique_slug(&self.db, &base_slug, appid).await?;
        let media_folder = if base_slug.is_empty() {
            format!("app-{}", appid)
        } else {
            format!("{}-{}", base_slug, appid)
        };

        // Artwork caching is best-effort; the upstream URL stays in place
        // when a download fails.
        let mut cover_image_url = detail.header_image.clone().unwrap_or_default();
        if let Some(url) = &detail.header_image {
            match self.media.cache_cover(&media_folder, url).await {
                Ok(public_path) => cover_image_url = public_path,
                Err(e) => {
                    tracing::warn!(appid = appid, error = %e, "Cover cache failed");
                }
            }
        }
        if !detail.screenshots.is_empty() {
            let stored = self
                .media
                .cache_screenshots(&media_folder, &detail.screenshots)
                .await;
            tracing::debug!(appid = appid, stored = stored, "Screenshots cached");
        }

        let game = GameRecord {
            steam_app_id: appid,
            title: detail.name.clone(),
            slug,
            genre: detail.genres.join(","),
            developer: detail.developers.clone(),
            publisher: detail.publishers.clone(),
            description: detail.description.clone(),
            cover_image_url,
            media_folder,
            release_date: detail.release_date.date_iso.clone(),
            platform: detail.platforms.to_list(),
            price: detail.price_cents.map(|cents| (cents as f64 / 100.0).round() as i64),
            specs_min: detail.specs_min.clone(),
            specs_rec: detail.specs_rec.clone(),
        };

        db::games::upsert_game(&self.db, &game).await?;

        let (min_cpu_text, min_gpu_text) = tier_fields(&detail, RequirementTier::Minimum);
        let (rec_cpu_text, rec_gpu_text) = tier_fields(&detail, RequirementTier::Recommended);

        tracing::debug!(appid = appid, cpu = ?min_cpu_text, gpu = ?min_gpu_text, "Minimum tier fields");

        // The four resolutions are independent reads and run concurrently.
        let (min_cpu, min_gpu, rec_cpu, rec_gpu) = tokio::join!(
            resolve_scores(&self.lookup, HardwareTable::Cpu, min_cpu_text),
            resolve_scores(&self.lookup, HardwareTable::Gpu, min_gpu_text),
            resolve_scores(&self.lookup, HardwareTable::Cpu, rec_cpu_text),
            resolve_scores(&self.lookup, HardwareTable::Gpu, rec_gpu_text),
        );

        let scores = ScoreRecord {
            steam_app_id: appid,
            min_cpu_score: min_cpu,
            min_gpu_score: min_gpu,
            rec_cpu_score: rec_cpu,
            rec_gpu_score: rec_gpu,
        };

        // A failed score save never fails the registration itself.
        if let Err(e) = db::scores::upsert_scores(&self.db, &scores).await {
            tracing::error!(appid = appid, error = %e, "Score row save failed");
        }

        tracing::info!(
            appid = appid,
            slug = %game.slug,
            min_cpu_entries = scores.min_cpu_score.len(),
            min_gpu_entries = scores.min_gpu_score.len(),
            "Registration completed"
        );

        Ok(RegistrationOutcome { saved: game, scores })
    }
}

/// Requirement field texts (cpu, gpu) for one tier.
fn tier_fields(detail: &AppDetail, tier: RequirementTier) -> (Option<&str>, Option<&str>) {
    let specs = match tier {
        RequirementTier::Minimum => detail.specs_min.as_ref(),
        RequirementTier::Recommended => detail.specs_rec.as_ref(),
    };
    (
        specs.and_then(|s| s.select(CPU_FIELD_KEYWORDS)),
        specs.and_then(|s| s.select(GPU_FIELD_KEYWORDS)),
    )
}

/// Find a slug no other app owns: the base, then `base-appid`, then
/// numbered suffixes. A slug already owned by this app id is kept, so
/// re-registration is stable.
pub async fn ensure_unique_slug(pool: &SqlitePool, base: &str, appid: i64) -> Result<String> {
    let base = if base.is_empty() {
        format!("app-{}", appid)
    } else {
        base.to_string()
    };

    let candidate = base.clone();
    if !db::games::slug_taken_by_other(pool, &candidate, appid).await? {
        return Ok(candidate);
    }

    let candidate = format!("{}-{}", base, appid);
    if !db::games::slug_taken_by_other(pool, &candidate, appid).await? {
        return Ok(candidate);
    }

    let mut suffix = 2;
    loop {
        let candidate = format!("{}-{}-{}", base, appid, suffix);
        if !db::games::slug_taken_by_other(pool, &candidate, appid).await? {
            return Ok(candidate);
        }
        suffix += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Platforms, ReleaseDate};
    use crate::services::score_resolver::ScoreMap;
    use crate::services::spec_parser::parse_requirement_block;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct StubLookup {
        scores: HashMap<&'static str, f64>,
    }

    #[async_trait]
    impl ScoreLookup for StubLookup {
        async fn match_score(
            &self,
            _table: HardwareTable,
            input_text: &str,
        ) -> Result<Option<f64>> {
            Ok(self.scores.get(input_text).copied())
        }
    }

    struct TestContext {
        _root: tempfile::TempDir,
        registrar: GameRegistrar<StubLookup>,
        db: SqlitePool,
    }

    /// Registrar over a file-backed database so concurrent resolutions see
    /// the same tables.
    async fn test_context(scores: &[(&'static str, f64)]) -> TestContext {
        let root = tempfile::tempdir().unwrap();
        let db = crate::db::init_database_pool(&root.path().join("ludex.db"))
            .await
            .unwrap();

        let registrar = GameRegistrar::new(
            db.clone(),
            Arc::new(SteamClient::new("kr", "koreana").unwrap()),
            StubLookup {
                scores: scores.iter().copied().collect(),
            },
            MediaStore::new(root.path().join("media")),
        );

        TestContext {
            _root: root,
            registrar,
            db,
        }
    }

    fn sample_detail(appid: i64, name: &str) -> AppDetail {
        AppDetail {
            appid,
            name: name.to_string(),
            app_type: Some("game".to_string()),
            is_free: false,
            header_image: None,
            platforms: Platforms {
                windows: true,
                mac: false,
                linux: true,
            },
            release_date: ReleaseDate {
                date_raw: Some("2015년 5월 19일".to_string()),
                date_iso: Some("2015-05-19".to_string()),
            },
            genres: vec!["Action".to_string(), "RPG".to_string()],
            developers: "CD Projekt Red".to_string(),
            publishers: "CD Projekt".to_string(),
            price_cents: Some(29900),
            description: "Open-world adventure".to_string(),
            screenshots: Vec::new(),
            specs_min: parse_requirement_block(
                "<li>Processor: Intel Core i3-4160 or AMD FX-6300</li>\
                 <li>Graphics: NVIDIA GeForce GTX 660 2GB</li>",
            ),
            specs_rec: parse_requirement_block(
                "<li>Processor: Intel Core i7-3770</li>\
                 <li>Graphics: GTX 770</li>",
            ),
        }
    }

    #[tokio::test]
    async fn registration_persists_game_and_score_rows() {
        let ctx = test_context(&[
            ("Intel Core i3-4160", 500.0),
            ("AMD FX-6300", 420.0),
            ("NVIDIA GeForce GTX 660 2GB", 380.0),
            ("Intel Core i7-3770", 710.0),
            ("NVIDIA GeForce GTX 770", 560.0),
        ])
        .await;

        let outcome = ctx
            .registrar
            .register_detail(sample_detail(292030, "The Witcher 3: Wild Hunt"))
            .await
            .unwrap();

        assert_eq!(outcome.saved.slug, "the-witcher-3-wild-hunt");
        assert_eq!(outcome.saved.platform, "windows,linux");
        assert_eq!(outcome.saved.price, Some(299));
        assert_eq!(outcome.saved.genre, "Action,RPG");

        // Compound minimum CPU requirement resolved per alternative, keyed
        // by the original substrings.
        let min_cpu: &ScoreMap = &outcome.scores.min_cpu_score;
        assert_eq!(min_cpu.len(), 2);
        assert_eq!(min_cpu.get("Intel Core i3-4160"), Some(&500.0));
        assert_eq!(min_cpu.get("AMD FX-6300"), Some(&420.0));

        assert_eq!(
            outcome.scores.min_gpu_score.get("NVIDIA GeForce GTX 660 2GB"),
            Some(&380.0)
        );
        assert_eq!(
            outcome.scores.rec_gpu_score.get("GTX 770"),
            Some(&560.0)
        );

        // Rows landed in the database
        let stored = db::games::get_game(&ctx.db, 292030).await.unwrap().unwrap();
        assert_eq!(stored.title, "The Witcher 3: Wild Hunt");
        assert_eq!(stored.release_date.as_deref(), Some("2015-05-19"));
        assert_eq!(
            stored.specs_min.unwrap().get("processor"),
            Some("Intel Core i3-4160 or AMD FX-6300")
        );

        let stored_scores = db::scores::get_scores(&ctx.db, 292030)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored_scores.min_cpu_score.len(), 2);
    }

    #[tokio::test]
    async fn unresolved_candidates_are_missing_from_score_rows() {
        // Only one of the two minimum CPU alternatives is in the catalog.
        let ctx = test_context(&[("Intel Core i3-4160", 500.0)]).await;

        let outcome = ctx
            .registrar
            .register_detail(sample_detail(1, "Partial"))
            .await
            .unwrap();

        assert_eq!(outcome.scores.min_cpu_score.len(), 1);
        assert!(outcome.scores.min_cpu_score.contains_key("Intel Core i3-4160"));
        assert!(outcome.scores.min_gpu_score.is_empty());
    }

    #[tokio::test]
    async fn slug_conflicts_fall_back_to_appid_suffix() {
        let ctx = test_context(&[]).await;

        ctx.registrar
            .register_detail(sample_detail(100, "Portal"))
            .await
            .unwrap();
        let second = ctx
            .registrar
            .register_detail(sample_detail(200, "Portal"))
            .await
            .unwrap();

        assert_eq!(second.saved.slug, "portal-200");
    }

    #[tokio::test]
    async fn reregistration_keeps_the_slug_stable() {
        let ctx = test_context(&[]).await;

        let first = ctx
            .registrar
            .register_detail(sample_detail(100, "Portal"))
            .await
            .unwrap();
        let again = ctx
            .registrar
            .register_detail(sample_detail(100, "Portal"))
            .await
            .unwrap();

        assert_eq!(first.saved.slug, "portal");
        assert_eq!(again.saved.slug, "portal");
    }

    #[tokio::test]
    async fn untitled_apps_slug_from_the_app_id() {
        let ctx = test_context(&[]).await;

        let outcome = ctx
            .registrar
            .register_detail(sample_detail(777, "한국어게임"))
            .await
            .unwrap();

        assert_eq!(outcome.saved.slug, "app-777");
        assert_eq!(outcome.saved.media_folder, "app-777");
    }
}
