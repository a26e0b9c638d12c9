//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ARENDA_API_BASE_URL` - Base URL of the Arenda REST API
//!
//! ## Optional
//! - `ARENDA_PUBLIC_TOKEN` - Bearer token for customer-authenticated
//!   endpoints (order history). Without it only public reads work.

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Base URL of the Arenda REST API.
    pub api_base_url: Url,
    /// Customer bearer token, when present.
    pub public_token: Option<SecretString>,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("public_token", &self.public_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(
            "ARENDA_API_BASE_URL",
            &std::env::var("ARENDA_API_BASE_URL")
                .map_err(|_| ConfigError::MissingEnvVar("ARENDA_API_BASE_URL".to_string()))?,
        )?;
        let public_token = std::env::var("ARENDA_PUBLIC_TOKEN")
            .ok()
            .map(SecretString::from);

        Ok(Self {
            api_base_url,
            public_token,
        })
    }
}

/// Parse a base URL, requiring a trailing slash so path joins keep the full
/// base path.
pub(crate) fn parse_base_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let normalized = if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{value}/")
    };
    normalized
        .parse::<Url>()
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))
}
