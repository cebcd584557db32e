//! Hardware score resolution
//!
//! Turns one raw requirement field value into a mapping of candidate
//! hardware name → benchmark score, using an injected fuzzy lookup
//! collaborator. Resolution is best-effort by design: candidates the
//! lookup cannot match confidently are dropped silently, and a lookup
//! failure for one candidate never affects its siblings.

use async_trait::async_trait;
use ludex_common::Result;
use std::collections::HashMap;

use super::hardware::{qualify_brand, split_candidates, HardwareTable};

/// Mapping from original candidate text to resolved benchmark score.
pub type ScoreMap = HashMap<String, f64>;

/// Fuzzy hardware score lookup collaborator.
///
/// The lookup performs its own approximate matching against a benchmark
/// catalog; callers only provide a clean, brand-qualified name. A score of
/// zero or less means "no confident match" — a genuine zero score is
/// indistinguishable from an absent row and is treated as absent.
#[async_trait]
pub trait ScoreLookup: Send + Sync {
    async fn match_score(&self, table: HardwareTable, input_text: &str) -> Result<Option<f64>>;
}

/// Resolve benchmark scores for every candidate in a raw requirement value.
///
/// Splits the value into candidates, brand-qualifies each for the search,
/// and keeps only strictly positive scores. Result entries are keyed by the
/// ORIGINAL candidate substring (before brand qualification) so the map
/// stays traceable to the source text. Empty input yields an empty map.
pub async fn resolve_scores<L: ScoreLookup>(
    lookup: &L,
    table: HardwareTable,
    raw_text: Option<&str>,
) -> ScoreMap {
    let mut scores = ScoreMap::new();

    let raw = match raw_text {
        Some(text) if !text.trim().is_empty() => text,
        _ => return scores,
    };

    for candidate in split_candidates(raw) {
        let search_text = qualify_brand(&candidate, table);
        tracing::debug!(
            table = %table,
            original = %candidate,
            search = %search_text,
            "Resolving hardware score"
        );

        match lookup.match_score(table, &search_text).await {
            Ok(Some(score)) if score > 0.0 => {
                scores.insert(candidate, score);
            }
            Ok(_) => {
                tracing::debug!(table = %table, candidate = %candidate, "No confident match");
            }
            Err(e) => {
                // Scraped text is noisy and enrichment is best-effort, so a
                // failed lookup degrades to "unresolved" for this candidate.
                tracing::debug!(
                    table = %table,
                    candidate = %candidate,
                    error = %e,
                    "Score lookup failed, dropping candidate"
                );
            }
        }
    }

    scores
}
