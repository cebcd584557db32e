//! Fuzzy benchmark catalog lookup
//!
//! Production [`ScoreLookup`] implementation backed by the cpu_tb/gpu_tb
//! tables. Matching is approximate: both sides are normalized and compared
//! with Jaro-Winkler similarity, and the best row wins if it clears the
//! similarity floor. Tolerates the spelling and formatting drift left over
//! after brand qualification.

use async_trait::async_trait;
use ludex_common::Result;
use sqlx::SqlitePool;
use strsim::jaro_winkler;

use crate::db;
use crate::services::hardware::HardwareTable;
use crate::services::score_resolver::ScoreLookup;

/// Minimum Jaro-Winkler similarity for a catalog row to count as a match.
pub const MIN_MODEL_SIMILARITY: f64 = 0.85;

/// Benchmark catalog over the shared database pool.
#[derive(Clone)]
pub struct BenchmarkCatalog {
    db: SqlitePool,
}

impl BenchmarkCatalog {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Best-matching row for `input` in the selected table, if any clears
    /// the similarity floor.
    async fn best_match(
        &self,
        table: HardwareTable,
        input: &str,
    ) -> Result<Option<(String, f64)>> {
        let needle = normalize_model(input);
        if needle.is_empty() {
            return Ok(None);
        }

        let rows = db::benchmarks::all_models(&self.db, table).await?;

        let mut best: Option<(f64, String, f64)> = None;
        for (model, score) in rows {
            let similarity = jaro_winkler(&needle, &normalize_model(&model));
            if best.as_ref().map_or(true, |(s, _, _)| similarity > *s) {
                best = Some((similarity, model, score));
            }
        }

        match best {
            Some((similarity, model, score)) if similarity >= MIN_MODEL_SIMILARITY => {
                tracing::debug!(
                    table = %table,
                    input = %input,
                    matched = %model,
                    similarity = similarity,
                    "Benchmark catalog match"
                );
                Ok(Some((model, score)))
            }
            _ => Ok(None),
        }
    }
}

#[async_trait]
impl ScoreLookup for BenchmarkCatalog {
    async fn match_score(&self, table: HardwareTable, input_text: &str) -> Result<Option<f64>> {
        Ok(self
            .best_match(table, input_text)
            .await?
            .map(|(_, score)| score))
    }
}

/// Lowercase and collapse whitespace for comparison.
fn normalize_model(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
