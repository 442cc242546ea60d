//! Catalog session configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `CATALOG_BASE_URL` - Origin of the catalog service (e.g., `https://shop.example`)
//!
//! ## Optional
//! - `CATALOG_START_URL` - Address the session starts on (default: `{base}/catalog`)
//! - `CATALOG_DEBOUNCE_MS` - Quiet period for search/author input (default: 500)
//! - `CATALOG_CART_FEEDBACK_MS` - How long "Added!" stays visible (default: 2000)
//! - `CATALOG_FEATURED_CACHE_SECS` - Featured panel cache TTL (default: 60)
//! - `CATALOG_VIEW_STORE_PATH` - JSON file for the grid/list preference (default: in-memory)
//! - `CATALOG_CATEGORIES` - Comma-separated category list (default: built-in list)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_DEBOUNCE_MS: &str = "500";
const DEFAULT_CART_FEEDBACK_MS: &str = "2000";
const DEFAULT_FEATURED_CACHE_SECS: &str = "60";
const DEFAULT_START_PATH: &str = "/catalog";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog session configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Catalog service origin
    pub base_url: Url,
    /// Address used to seed the session
    pub start_url: Url,
    /// Debounce quiet period for text inputs
    pub debounce: Duration,
    /// Success feedback period of add-to-cart controls
    pub cart_feedback: Duration,
    /// Featured panel cache TTL
    pub featured_cache_ttl: Duration,
    /// Location of the persisted view mode, in-memory when unset
    pub view_store_path: Option<PathBuf>,
    /// Server-supplied categories; empty selects the built-in list
    pub categories: Vec<String>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Timing knobs handed to the controller.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    pub debounce: Duration,
    pub cart_feedback: Duration,
    pub categories: Vec<String>,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            debounce: crate::debounce::DEFAULT_DEBOUNCE,
            cart_feedback: crate::cart::DEFAULT_CART_FEEDBACK,
            categories: Vec::new(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let base_url: Url = env.parsed_required("CATALOG_BASE_URL")?;
        let start_url = match env.optional("CATALOG_START_URL") {
            Some(value) => parse_var("CATALOG_START_URL", &value)?,
            None => base_url
                .join(DEFAULT_START_PATH)
                .map_err(|e| invalid("CATALOG_BASE_URL", &e))?,
        };

        let debounce_ms: u64 = env.parsed_or_default("CATALOG_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS)?;
        let feedback_ms: u64 =
            env.parsed_or_default("CATALOG_CART_FEEDBACK_MS", DEFAULT_CART_FEEDBACK_MS)?;
        let cache_secs: u64 =
            env.parsed_or_default("CATALOG_FEATURED_CACHE_SECS", DEFAULT_FEATURED_CACHE_SECS)?;

        let categories = env
            .optional("CATALOG_CATEGORIES")
            .map(|value| split_list(&value))
            .unwrap_or_default();

        Ok(Self {
            base_url,
            start_url,
            debounce: Duration::from_millis(debounce_ms),
            cart_feedback: Duration::from_millis(feedback_ms),
            featured_cache_ttl: Duration::from_secs(cache_secs),
            view_store_path: env.optional("CATALOG_VIEW_STORE_PATH").map(PathBuf::from),
            categories,
            sentry_dsn: env.optional("SENTRY_DSN"),
        })
    }

    /// Controller timing and category settings.
    #[must_use]
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            debounce: self.debounce,
            cart_feedback: self.cart_feedback,
            categories: self.categories.clone(),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable; blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    fn parsed_required<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        parse_var(key, &self.required(key)?)
    }

    /// Get a variable with a default value, then parse it.
    fn parsed_or_default<T>(&self, key: &str, default: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let value = self.optional(key).unwrap_or_else(|| default.to_string());
        parse_var(key, &value)
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| invalid(key, &e))
}

fn invalid(key: &str, error: &dyn std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), error.to_string())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<CatalogConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        CatalogConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("CATALOG_BASE_URL", "https://shop.test")]).unwrap();
        assert_eq!(config.start_url.as_str(), "https://shop.test/catalog");
        assert_eq!(config.debounce, Duration::from_millis(500));
        assert_eq!(config.cart_feedback, Duration::from_secs(2));
        assert_eq!(config.featured_cache_ttl, Duration::from_secs(60));
        assert!(config.view_store_path.is_none());
        assert!(config.categories.is_empty());
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_missing_base_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "CATALOG_BASE_URL"));
    }

    #[test]
    fn test_invalid_number() {
        let err = load(&[
            ("CATALOG_BASE_URL", "https://shop.test"),
            ("CATALOG_DEBOUNCE_MS", "soon"),
        ])
        .unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CATALOG_DEBOUNCE_MS")
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = load(&[("CATALOG_BASE_URL", "not a url")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("CATALOG_BASE_URL", "https://shop.test"),
            ("CATALOG_START_URL", "https://shop.test/catalog?q=dune&page=2"),
            ("CATALOG_DEBOUNCE_MS", "250"),
            ("CATALOG_VIEW_STORE_PATH", "/tmp/prefs.json"),
            ("CATALOG_CATEGORIES", "Poetry, Drama,,"),
            ("SENTRY_DSN", "  "),
        ])
        .unwrap();
        assert_eq!(config.start_url.query(), Some("q=dune&page=2"));
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert_eq!(config.view_store_path, Some(PathBuf::from("/tmp/prefs.json")));
        assert_eq!(config.categories, ["Poetry", "Drama"]);
        assert!(config.sentry_dsn.is_none());

        let settings = config.controller_settings();
        assert_eq!(settings.debounce, Duration::from_millis(250));
        assert_eq!(settings.categories.len(), 2);
    }
}
