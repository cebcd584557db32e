//! Steam storefront API client
//!
//! Thin client over the public storefront endpoints (app details and store
//! search) with rate limiting. Payload decoding is split out into pure
//! functions so response handling is testable without network access.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::{AppDetail, Platforms, ReleaseDate, Screenshot, SearchItem};
use crate::services::spec_parser::parse_requirement_block;
use crate::utils::dates::normalize_release_date;

const STEAM_STORE_BASE_URL: &str = "https://store.steampowered.com";
// The storefront rejects clients without a browser user agent
const USER_AGENT: &str = "Mozilla/5.0";
const RATE_LIMIT_MS: u64 = 1000; // 1 request per second

/// Steam client errors
#[derive(Debug, Error)]
pub enum SteamError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Upstream non-JSON response ({status}): {snippet}")]
    NonJson { status: u16, snippet: String },

    #[error("App not found: {0}")]
    AppNotFound(i64),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Rate limiter enforcing a minimum interval between requests
struct RateLimiter {
    last_request: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    fn new(min_interval_ms: u64) -> Self {
        Self {
            last_request: Mutex::new(None),
            min_interval: Duration::from_millis(min_interval_ms),
        }
    }

    /// Wait if necessary to comply with rate limit
    async fn wait(&self) {
        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!("Rate limiting: waiting {:?}", wait_time);
                tokio::time::sleep(wait_time).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// Raw minimum/recommended requirement HTML blocks
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct RequirementsHtml {
    pub minimum_html: Option<String>,
    pub recommended_html: Option<String>,
}

/// Steam storefront API client
pub struct SteamClient {
    http_client: reqwest::Client,
    country: String,
    language: String,
    rate_limiter: Arc<RateLimiter>,
}

impl SteamClient {
    pub fn new(country: &str, language: &str) -> Result<Self, SteamError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SteamError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            country: country.to_string(),
            language: language.to_string(),
            rate_limiter: Arc::new(RateLimiter::new(RATE_LIMIT_MS)),
        })
    }

    /// Search the storefront by free-text term
    pub async fn search_store(&self, term: &str) -> Result<Vec<SearchItem>, SteamError> {
        let url = self.build_url(
            "/api/storesearch/",
            &[
                ("term", term),
                ("l", &self.language),
                ("cc", &self.country),
            ],
        )?;

        let body = self.fetch_json(url).await?;
        Ok(parse_search_items(&body))
    }

    /// Fetch and assemble the full detail record for one app
    pub async fn app_details(&self, appid: i64) -> Result<AppDetail, SteamError> {
        let body = self.fetch_app_details_payload(appid).await?;
        parse_app_details(appid, body)
    }

    /// Fetch only the raw requirement HTML blocks for one app
    pub async fn requirements_html(&self, appid: i64) -> Result<RequirementsHtml, SteamError> {
        let body = self.fetch_app_details_payload(appid).await?;
        Ok(parse_requirements_html(appid, body))
    }

    async fn fetch_app_details_payload(&self, appid: i64) -> Result<serde_json::Value, SteamError> {
        let url = self.build_url(
            "/api/appdetails",
            &[
                ("appids", appid.to_string().as_str()),
                ("cc", &self.country),
                ("l", &self.language),
            ],
        )?;

        tracing::debug!(appid = appid, "Querying storefront app details");

        self.fetch_json(url).await
    }

    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> Result<reqwest::Url, SteamError> {
        let mut url = reqwest::Url::parse(&format!("{}{}", STEAM_STORE_BASE_URL, path))
            .map_err(|e| SteamError::Parse(e.to_string()))?;
        url.query_pairs_mut().extend_pairs(params);
        Ok(url)
    }

    /// GET a URL and decode the body as JSON, rejecting non-JSON upstream
    /// responses (the storefront serves HTML error pages on throttling).
    async fn fetch_json(&self, url: reqwest::Url) -> Result<serde_json::Value, SteamError> {
        self.rate_limiter.wait().await;

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| SteamError::Network(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let body = response
            .text()
            .await
            .map_err(|e| SteamError::Network(e.to_string()))?;

        if !content_type.contains("application/json") {
            return Err(SteamError::NonJson {
                status: status.as_u16(),
                snippet: body.chars().take(200).collect(),
            });
        }

        serde_json::from_str(&body).map_err(|e| SteamError::Parse(e.to_string()))
    }
}

// ============================================================================
// Payload decoding
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    items: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    id: i64,
    name: String,
    #[serde(default)]
    tiny_image: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppEnvelope {
    success: bool,
    data: Option<AppPayload>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AppPayload {
    name: Option<String>,
    #[serde(rename = "type")]
    app_type: Option<String>,
    is_free: bool,
    header_image: Option<String>,
    platforms: Option<Platforms>,
    release_date: Option<RawReleaseDate>,
    genres: Vec<RawGenre>,
    developers: Vec<String>,
    publishers: Vec<String>,
    price_overview: Option<RawPrice>,
    short_description: Option<String>,
    screenshots: Vec<RawScreenshot>,
    pc_requirements: RawRequirements,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawReleaseDate {
    date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawGenre {
    description: String,
}

#[derive(Debug, Deserialize)]
struct RawPrice {
    #[serde(rename = "final")]
    final_amount: i64,
}

#[derive(Debug, Deserialize)]
struct RawScreenshot {
    #[serde(default)]
    id: i64,
    path_full: Option<String>,
    path_thumbnail: Option<String>,
}

/// `pc_requirements` is an object with HTML blocks when present, but the
/// storefront serves an empty array (or null) when a title has none.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRequirements {
    Block {
        minimum: Option<String>,
        recommended: Option<String>,
    },
    Empty(Vec<serde_json::Value>),
    Missing,
}

impl Default for RawRequirements {
    fn default() -> Self {
        RawRequirements::Missing
    }
}

impl RawRequirements {
    fn minimum(&self) -> Option<&str> {
        match self {
            RawRequirements::Block { minimum, .. } => minimum.as_deref(),
            _ => None,
        }
    }

    fn recommended(&self) -> Option<&str> {
        match self {
            RawRequirements::Block { recommended, .. } => recommended.as_deref(),
            _ => None,
        }
    }
}

fn parse_search_items(body: &serde_json::Value) -> Vec<SearchItem> {
    let response: SearchResponse = match serde_json::from_value(body.clone()) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "Unexpected storefront search payload");
            return Vec::new();
        }
    };

    response
        .items
        .into_iter()
        .map(|hit| SearchItem {
            appid: hit.id.to_string(),
            name: hit.name,
            tiny_image: hit.tiny_image,
        })
        .collect()
}

/// Decode one appdetails response body into an [`AppDetail`].
fn parse_app_details(appid: i64, body: serde_json::Value) -> Result<AppDetail, SteamError> {
    let mut envelope: HashMap<String, AppEnvelope> =
        serde_json::from_value(body).map_err(|e| SteamError::Parse(e.to_string()))?;

    let payload = envelope
        .remove(&appid.to_string())
        .filter(|e| e.success)
        .and_then(|e| e.data)
        .ok_or(SteamError::AppNotFound(appid))?;

    let specs_min = payload
        .pc_requirements
        .minimum()
        .and_then(parse_requirement_block);
    let specs_rec = payload
        .pc_requirements
        .recommended()
        .and_then(parse_requirement_block);

    let date_raw = payload.release_date.and_then(|r| r.date);
    let date_iso = date_raw.as_deref().and_then(normalize_release_date);

    let price_cents = match payload.price_overview {
        Some(price) => Some(price.final_amount),
        None if payload.is_free => Some(0),
        None => None,
    };

    Ok(AppDetail {
        appid,
        name: payload
            .name
            .unwrap_or_else(|| format!("app-{}", appid)),
        app_type: payload.app_type,
        is_free: payload.is_free,
        header_image: payload.header_image,
        platforms: payload.platforms.unwrap_or_default(),
        release_date: ReleaseDate { date_raw, date_iso },
        genres: payload.genres.into_iter().map(|g| g.description).collect(),
        developers: payload.developers.join(", "),
        publishers: payload.publishers.join(", "),
        price_cents,
        description: payload.short_description.unwrap_or_default(),
        screenshots: payload
            .screenshots
            .into_iter()
            .map(|s| Screenshot {
                id: s.id,
                full: s.path_full.unwrap_or_default(),
                thumb: s.path_thumbnail.unwrap_or_default(),
            })
            .collect(),
        specs_min,
        specs_rec,
    })
}

/// Extract raw requirement HTML blocks; an unknown app yields empty blocks
/// rather than an error.
fn parse_requirements_html(appid: i64, body: serde_json::Value) -> RequirementsHtml {
    let mut envelope: HashMap<String, AppEnvelope> = match serde_json::from_value(body) {
        Ok(e) => e,
        Err(_) => return RequirementsHtml::default(),
    };

    let Some(payload) = envelope.remove(&appid.to_string()).and_then(|e| e.data) else {
        return RequirementsHtml::default();
    };

    RequirementsHtml {
        minimum_html: payload.pc_requirements.minimum().map(str::to_string),
        recommended_html: payload.pc_requirements.recommended().map(str::to_string),
    }
}
