//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MEAL_CATALOG_URL` - Base URL of the meal catalog (default: TheMealDB v1 test key)
//! - `MEAL_CATALOG_TIMEOUT_SECS` - Per-request timeout (default: 10)
//! - `MEAL_BROWSE_RANDOM_COUNT` - Random meals shown on an unfiltered browse page (default: 12)
//! - `MEAL_FEATURED_COUNT` - Random meals featured on the home page (default: 6)
//! - `MEAL_CHANNEL_CAPACITY` - Request buffer of each actor (default: 32)

use thiserror::Error;

pub const DEFAULT_CATALOG_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    pub catalog_base_url: String,
    pub catalog_timeout_secs: u64,
    pub browse_random_count: usize,
    pub featured_count: usize,
    /// Bounded `mpsc` capacity for every actor.
    pub channel_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_URL.to_string(),
            catalog_timeout_secs: 10,
            browse_random_count: 12,
            featured_count: 6,
            channel_capacity: 32,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let channel_capacity = parse_or(&lookup, "MEAL_CHANNEL_CAPACITY", defaults.channel_capacity)?;
        if channel_capacity == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "MEAL_CHANNEL_CAPACITY".to_string(),
                "must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            catalog_base_url: lookup("MEAL_CATALOG_URL")
                .filter(|url| !url.trim().is_empty())
                .unwrap_or(defaults.catalog_base_url),
            catalog_timeout_secs: parse_or(&lookup, "MEAL_CATALOG_TIMEOUT_SECS", defaults.catalog_timeout_secs)?,
            browse_random_count: parse_or(&lookup, "MEAL_BROWSE_RANDOM_COUNT", defaults.browse_random_count)?,
            featured_count: parse_or(&lookup, "MEAL_FEATURED_COUNT", defaults.featured_count)?,
            channel_capacity,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a variable, falling back to `default` when it is unset.
fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
        assert_eq!(config.catalog_base_url, "https://www.themealdb.com/api/json/v1/1");
    }

    #[test]
    fn test_overrides() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("MEAL_CATALOG_URL", "http://localhost:9000"),
            ("MEAL_BROWSE_RANDOM_COUNT", "3"),
            ("MEAL_FEATURED_COUNT", " 2 "),
        ]))
        .unwrap();

        assert_eq!(config.catalog_base_url, "http://localhost:9000");
        assert_eq!(config.browse_random_count, 3);
        assert_eq!(config.featured_count, 2);
        assert_eq!(config.catalog_timeout_secs, 10);
    }

    #[test]
    fn test_invalid_number() {
        let err = StoreConfig::from_lookup(lookup(&[("MEAL_CATALOG_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "MEAL_CATALOG_TIMEOUT_SECS"));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(StoreConfig::from_lookup(lookup(&[("MEAL_CHANNEL_CAPACITY", "0")])).is_err());
    }
}
