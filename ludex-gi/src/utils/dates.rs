//! Storefront release-date normalization

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Matches dates written year-first with arbitrary separators, which covers
/// the localized storefront strings ("2011년 4월 19일", "2011. 4. 19.").
static YEAR_FIRST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})\D+(\d{1,2})\D+(\d{1,2})").expect("static regex"));

/// English storefront formats tried when the year-first pattern misses.
const FALLBACK_FORMATS: &[&str] = &["%d %b, %Y", "%b %d, %Y", "%Y-%m-%d"];

/// Normalize a storefront release-date string to `YYYY-MM-DD`.
///
/// Returns `None` for unparseable strings ("Coming soon", "TBA", ...).
pub fn normalize_release_date(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Some(caps) = YEAR_FIRST.captures(raw) {
        return Some(format!(
            "{}-{:0>2}-{:0>2}",
            &caps[1], &caps[2], &caps[3]
        ));
    }

    for format in FALLBACK_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date.format("%Y-%m-%d").to_string());
        }
    }

    None
}
