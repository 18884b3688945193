//! Runtime configuration
//!
//! Values are loaded from:
//! 1. `.env` file in the current directory or parent directories (if present)
//! 2. System environment variables
//!
//! Environment variables take precedence over .env file values. Every setting
//! has a default; a present but malformed value is a configuration error.
//!
//! ## Variables
//! - `INSIGHTS_RETRY_MAX_ATTEMPTS`, `INSIGHTS_RETRY_BASE_DELAY_MS`, `INSIGHTS_RETRY_MAX_DELAY_MS`
//! - `INSIGHTS_HISTORY_LIMIT` (1..=50), `INSIGHTS_REVIEW_LIMIT`
//! - `INSIGHTS_SCORE_MIN`, `INSIGHTS_SCORE_MAX`
//! - `INSIGHTS_STORE_URL`, `INSIGHTS_STORE_KEY` (REST record store)

use std::str::FromStr;

use crate::components::MAX_HISTORY_LIMIT;
use crate::core::{RetryPolicy, ScoreBounds};
use crate::error::{InsightsError, InsightsResult};

pub const DEFAULT_REVIEW_LIMIT: usize = 10;

/// REST record store location and credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEndpoint {
    pub url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsightsConfig {
    pub retry: RetryPolicy,
    pub score_bounds: ScoreBounds,
    pub history_limit: usize,
    pub review_limit: usize,
    pub store: Option<StoreEndpoint>,
}

impl Default for InsightsConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            score_bounds: ScoreBounds::default(),
            history_limit: MAX_HISTORY_LIMIT,
            review_limit: DEFAULT_REVIEW_LIMIT,
            store: None,
        }
    }
}

impl InsightsConfig {
    /// Load from the process environment after reading `.env` if present
    pub fn from_env() -> InsightsResult<Self> {
        // Silently ignored when there is no .env file
        let _ = dotenv::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> InsightsResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let retry = RetryPolicy::from_millis(
            parse_var(&lookup, "INSIGHTS_RETRY_MAX_ATTEMPTS")?.unwrap_or(defaults.retry.max_attempts),
            parse_var(&lookup, "INSIGHTS_RETRY_BASE_DELAY_MS")?.unwrap_or(RetryPolicy::DEFAULT_BASE_DELAY_MS),
            parse_var(&lookup, "INSIGHTS_RETRY_MAX_DELAY_MS")?.unwrap_or(RetryPolicy::DEFAULT_MAX_DELAY_MS),
        )?;

        let score_bounds = ScoreBounds::new(
            parse_var(&lookup, "INSIGHTS_SCORE_MIN")?.unwrap_or(defaults.score_bounds.min),
            parse_var(&lookup, "INSIGHTS_SCORE_MAX")?.unwrap_or(defaults.score_bounds.max),
        )?;

        let store = match (lookup("INSIGHTS_STORE_URL"), lookup("INSIGHTS_STORE_KEY")) {
            (Some(url), Some(api_key)) => Some(StoreEndpoint { url, api_key }),
            (Some(_), None) => return Err(InsightsError::config("INSIGHTS_STORE_KEY", "<missing>")),
            _ => None,
        };

        let config = Self {
            retry,
            score_bounds,
            history_limit: parse_var(&lookup, "INSIGHTS_HISTORY_LIMIT")?.unwrap_or(defaults.history_limit),
            review_limit: parse_var(&lookup, "INSIGHTS_REVIEW_LIMIT")?.unwrap_or(defaults.review_limit),
            store,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> InsightsResult<()> {
        if self.history_limit == 0 || self.history_limit > MAX_HISTORY_LIMIT {
            return Err(InsightsError::config("history_limit", self.history_limit.to_string()));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> InsightsResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| InsightsError::config(name, raw)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::time::Duration;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_variables() {
        let config = InsightsConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, InsightsConfig::default());
        assert_eq!(config.history_limit, 50);
        assert_eq!(config.score_bounds, ScoreBounds { min: 1, max: 5 });
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = InsightsConfig::from_lookup(lookup_from(&[
            ("INSIGHTS_RETRY_MAX_ATTEMPTS", "5"),
            ("INSIGHTS_RETRY_BASE_DELAY_MS", "200"),
            ("INSIGHTS_RETRY_MAX_DELAY_MS", "800"),
            ("INSIGHTS_HISTORY_LIMIT", "20"),
            ("INSIGHTS_STORE_URL", "https://records.example.org"),
            ("INSIGHTS_STORE_KEY", "anon-key"),
        ]))
        .unwrap();

        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.base_delay, Duration::from_millis(200));
        assert_eq!(config.retry.max_delay, Duration::from_millis(800));
        assert_eq!(config.history_limit, 20);
        assert_eq!(config.store.unwrap().api_key, "anon-key");
    }

    #[test]
    fn test_base_delay_above_cap_is_accepted() {
        let config = InsightsConfig::from_lookup(lookup_from(&[
            ("INSIGHTS_RETRY_BASE_DELAY_MS", "1000"),
            ("INSIGHTS_RETRY_MAX_DELAY_MS", "500"),
        ]))
        .unwrap();

        assert_eq!(config.retry.schedule(), vec![Duration::from_millis(500), Duration::from_millis(500)]);
    }

    #[test]
    fn test_malformed_values_are_errors() {
        let result = InsightsConfig::from_lookup(lookup_from(&[("INSIGHTS_RETRY_MAX_ATTEMPTS", "many")]));
        assert!(matches!(result, Err(InsightsError::Config { .. })));

        let result = InsightsConfig::from_lookup(lookup_from(&[("INSIGHTS_HISTORY_LIMIT", "51")]));
        assert!(matches!(result, Err(InsightsError::Config { .. })));

        let result = InsightsConfig::from_lookup(lookup_from(&[("INSIGHTS_STORE_URL", "https://x")]));
        assert!(matches!(result, Err(InsightsError::Config { .. })));
    }
}
