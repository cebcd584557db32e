//! HTTP API handlers for ludex-gi

pub mod apps;
pub mod benchmarks;
pub mod health;
pub mod register;
pub mod search;

pub use apps::app_routes;
pub use benchmarks::benchmark_routes;
pub use health::health_routes;
pub use register::register_routes;
pub use search::search_routes;

use crate::error::ApiError;

/// Parse a path/body app id, which must be a string of decimal digits.
pub(crate) fn parse_appid(raw: &str) -> Result<i64, ApiError> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(ApiError::BadRequest("valid appid required".to_string()));
    }
    raw.parse::<i64>()
        .map_err(|_| ApiError::BadRequest("valid appid required".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_strings_parse() {
        assert_eq!(parse_appid("620").unwrap(), 620);
    }

    #[test]
    fn non_numeric_strings_are_rejected() {
        assert!(parse_appid("").is_err());
        assert!(parse_appid("abc").is_err());
        assert!(parse_appid("-1").is_err());
        assert!(parse_appid("12a").is_err());
        // Longer than any storefront app id can be
        assert!(parse_appid("99999999999999999999").is_err());
    }
}
