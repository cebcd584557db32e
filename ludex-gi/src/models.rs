//! Data models for ludex-gi

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::score_resolver::ScoreMap;
use crate::services::spec_parser::SpecMap;

/// Requirement tier of a spec block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequirementTier {
    Minimum,
    Recommended,
}

impl fmt::Display for RequirementTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequirementTier::Minimum => f.write_str("minimum"),
            RequirementTier::Recommended => f.write_str("recommended"),
        }
    }
}

/// Platform availability flags from the storefront
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Platforms {
    #[serde(default)]
    pub windows: bool,
    #[serde(default)]
    pub mac: bool,
    #[serde(default)]
    pub linux: bool,
}

impl Platforms {
    /// Comma-joined list of the enabled platforms, e.g. "windows,mac"
    pub fn to_list(&self) -> String {
        let mut names = Vec::new();
        if self.windows {
            names.push("windows");
        }
        if self.mac {
            names.push("mac");
        }
        if self.linux {
            names.push("linux");
        }
        names.join(",")
    }
}

/// Release date, both as published and normalized to ISO
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReleaseDate {
    pub date_raw: Option<String>,
    pub date_iso: Option<String>,
}

/// One storefront screenshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screenshot {
    pub id: i64,
    pub full: String,
    pub thumb: String,
}

/// One storefront search hit
#[derive(Debug, Clone, Serialize)]
pub struct SearchItem {
    pub appid: String,
    pub name: String,
    pub tiny_image: String,
}

/// Assembled application detail from the storefront
#[derive(Debug, Clone, Serialize)]
pub struct AppDetail {
    pub appid: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub app_type: Option<String>,
    pub is_free: bool,
    pub header_image: Option<String>,
    pub platforms: Platforms,
    pub release_date: ReleaseDate,
    pub genres: Vec<String>,
    pub developers: String,
    pub publishers: String,
    pub price_cents: Option<i64>,
    pub description: String,
    pub screenshots: Vec<Screenshot>,
    pub specs_min: Option<SpecMap>,
    pub specs_rec: Option<SpecMap>,
}

/// One row of the games catalog
#[derive(Debug, Clone, Serialize)]
pub struct GameRecord {
    pub steam_app_id: i64,
    pub title: String,
    pub slug: String,
    pub genre: String,
    pub developer: String,
    pub publisher: String,
    pub description: String,
    pub cover_image_url: String,
    pub media_folder: String,
    pub release_date: Option<String>,
    pub platform: String,
    pub price: Option<i64>,
    pub specs_min: Option<SpecMap>,
    pub specs_rec: Option<SpecMap>,
}

/// Resolved benchmark score maps for one game, all four tier/table slots
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoreRecord {
    pub steam_app_id: i64,
    pub min_cpu_score: ScoreMap,
    pub min_gpu_score: ScoreMap,
    pub rec_cpu_score: ScoreMap,
    pub rec_gpu_score: ScoreMap,
}

/// Result of a completed registration
#[derive(Debug, Clone, Serialize)]
pub struct RegistrationOutcome {
    pub saved: GameRecord,
    pub scores: ScoreRecord,
}
