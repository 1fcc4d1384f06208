//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `STOREFRONT_API_BASE` - Base URL of the backend API (e.g., <https://api.example.com/>)
//!
//! ## Optional
//! - `STOREFRONT_ACCESS_TOKEN` - Bearer token for the current customer session
//! - `STOREFRONT_REVIEW_PAGE_SIZE` - Reviews per page (default: 10)

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default number of reviews shown per page.
pub const DEFAULT_REVIEW_PAGE_SIZE: u32 = 10;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Base URL of the backend API. Always ends with a trailing slash.
    pub api_base: Url,
    /// Bearer token for the current customer session, if any.
    pub access_token: Option<SecretString>,
    /// Reviews per page.
    pub review_page_size: u32,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("api_base", &self.api_base.as_str())
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("review_page_size", &self.review_page_size)
            .finish()
    }
}

impl StorefrontConfig {
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

        let api_base = parse_api_base("STOREFRONT_API_BASE", &get_required_env("STOREFRONT_API_BASE")?)?;
        let access_token = get_optional_env("STOREFRONT_ACCESS_TOKEN").map(SecretString::from);
        let review_page_size = get_env_or_default(
            "STOREFRONT_REVIEW_PAGE_SIZE",
            &DEFAULT_REVIEW_PAGE_SIZE.to_string(),
        )
        .parse::<u32>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("STOREFRONT_REVIEW_PAGE_SIZE".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_base,
            access_token,
            review_page_size,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse and normalize the API base URL.
///
/// The URL must be a valid HTTP(S) base; a missing trailing slash is added so
/// endpoint paths can be appended directly.
fn parse_api_base(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "URL cannot be used as a base".to_string(),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
