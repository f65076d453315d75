//! Application configuration loaded from environment variables.
//!
//! Everything here is public client configuration (service URLs and the
//! identity provider's web API key); there are no secrets in a browser-class
//! client, so nothing needs a secret store.

use std::env;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Marketplace REST API base URL (e.g. `https://api.nestfind.example/api`)
    pub api_url: String,
    /// Identity provider base URL
    pub identity_url: String,
    /// Identity provider public web API key
    pub identity_api_key: String,
    /// Asset upload service endpoint
    pub upload_url: String,
    /// Unsigned upload preset name
    pub upload_preset: String,
    /// HTTP timeout for all outgoing requests, in seconds
    pub http_timeout_secs: u64,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000/api".to_string(),
            identity_url: "http://localhost:9099".to_string(),
            identity_api_key: "test_api_key".to_string(),
            upload_url: "http://localhost:9199/upload".to_string(),
            upload_preset: "real_estate".to_string(),
            http_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Loads a `.env` file first if one is present, so local development
    /// doesn't need exported variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            api_url: env::var("NESTFIND_API_URL")
                .map_err(|_| ConfigError::Missing("NESTFIND_API_URL"))?,
            identity_url: env::var("NESTFIND_IDENTITY_URL")
                .map_err(|_| ConfigError::Missing("NESTFIND_IDENTITY_URL"))?,
            identity_api_key: env::var("NESTFIND_IDENTITY_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("NESTFIND_IDENTITY_API_KEY"))?,
            upload_url: env::var("NESTFIND_UPLOAD_URL")
                .map_err(|_| ConfigError::Missing("NESTFIND_UPLOAD_URL"))?,
            upload_preset: env::var("NESTFIND_UPLOAD_PRESET")
                .unwrap_or_else(|_| "real_estate".to_string()),
            http_timeout_secs: env::var("NESTFIND_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .unwrap_or(10),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("NESTFIND_API_URL", "http://localhost:5000/api");
        env::set_var("NESTFIND_IDENTITY_URL", "http://localhost:9099");
        env::set_var("NESTFIND_IDENTITY_API_KEY", "test_key");
        env::set_var("NESTFIND_UPLOAD_URL", "http://localhost:9199/upload");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.identity_api_key, "test_key");
        assert_eq!(config.upload_preset, "real_estate");
        assert_eq!(config.http_timeout_secs, 10);
    }
}
