//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ARENDA_API_BASE_URL` - Base URL of the Arenda REST API
//! - `ARENDA_ADMIN_TOKEN` - Admin bearer token

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

/// Admin client configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct AdminConfig {
    /// Base URL of the Arenda REST API.
    pub api_base_url: Url,
    /// Admin bearer token.
    pub admin_token: SecretString,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("admin_token", &"[REDACTED]")
            .finish()
    }
}

impl AdminConfig {
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

        let raw_url = std::env::var("ARENDA_API_BASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("ARENDA_API_BASE_URL".to_string()))?;
        let api_base_url = parse_base_url("ARENDA_API_BASE_URL", &raw_url)?;
        let admin_token = std::env::var("ARENDA_ADMIN_TOKEN")
            .map(SecretString::from)
            .map_err(|_| ConfigError::MissingEnvVar("ARENDA_ADMIN_TOKEN".to_string()))?;

        Ok(Self {
            api_base_url,
            admin_token,
        })
    }
}

/// Parse a base URL, requiring a trailing slash so path joins keep the full
/// base path.
fn parse_base_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let normalized = if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{value}/")
    };
    normalized
        .parse::<Url>()
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))
}
