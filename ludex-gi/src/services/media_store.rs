//! Media cache for storefront artwork
//!
//! Downloads cover art and screenshots into the media directory under the
//! service root folder, where they are served statically. Every download is
//! best-effort: a failed fetch logs a warning and registration continues
//! with the upstream URL.

use ludex_common::{Error, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::Screenshot;

/// At most this many screenshots are cached per game.
pub const SCREENSHOT_LIMIT: usize = 8;

/// Media cache rooted at `<root_folder>/media`.
#[derive(Clone)]
pub struct MediaStore {
    root: PathBuf,
    http_client: reqwest::Client,
}

impl MediaStore {
    pub fn new(root: PathBuf) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self { root, http_client }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Download the cover image into `<folder>/cover.<ext>`.
    ///
    /// Returns the public path under `/media` on success.
    pub async fn cache_cover(&self, folder: &str, url: &str) -> Result<String> {
        let ext = cover_extension(url);
        let relative = format!("{}/cover{}", folder, ext);
        self.download_to(url, &relative).await?;
        Ok(format!("/media/{}", relative))
    }

    /// Download up to [`SCREENSHOT_LIMIT`] screenshots into
    /// `<folder>/screenshots/ss_N.jpg`. Returns how many were stored.
    pub async fn cache_screenshots(&self, folder: &str, screenshots: &[Screenshot]) -> usize {
        let mut stored = 0;
        for (index, shot) in screenshots.iter().take(SCREENSHOT_LIMIT).enumerate() {
            let url = if shot.full.is_empty() { &shot.thumb } else { &shot.full };
            if url.is_empty() {
                continue;
            }
            let relative = format!("{}/screenshots/ss_{}.jpg", folder, index + 1);
            match self.download_to(url, &relative).await {
                Ok(()) => stored += 1,
                Err(e) => {
                    tracing::warn!(folder = %folder, url = %url, error = %e, "Screenshot cache failed");
                }
            }
        }
        stored
    }

    async fn download_to(&self, url: &str, relative: &str) -> Result<()> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Upstream(format!(
                "Media fetch returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Upstream(e.to_string()))?;

        let target = self.root.join(relative);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &bytes).await?;

        tracing::debug!(target = %target.display(), bytes = bytes.len(), "Cached media file");

        Ok(())
    }
}

/// Cover files keep their upstream extension when it is PNG, else JPG.
fn cover_extension(url: &str) -> &'static str {
    let path = url.split('?').next().unwrap_or(url);
    if path.to_lowercase().ends_with(".png") {
        ".png"
    } else {
        ".jpg"
    }
}
