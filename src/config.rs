//! Application configuration
//!
//! Static client credentials, JWT settings, and the dataset path. Values come
//! from defaults, optionally overridden by `STOREPULSE_*` environment
//! variables.

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Registered OAuth2 client id
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Registered OAuth2 client secret
    #[serde(default = "default_client_secret")]
    pub client_secret: String,

    /// Secret key for signing access tokens (HS256)
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    /// Access token lifetime in minutes (default: 30)
    #[serde(default = "default_access_token_minutes")]
    pub access_token_minutes: i64,

    /// Advertised refresh token lifetime in days (default: 7)
    #[serde(default = "default_refresh_token_days")]
    pub refresh_token_days: i64,

    /// Path to the backing CSV dataset
    #[serde(default = "default_csv_path")]
    pub csv_path: String,

    /// HTTP server settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_client_id() -> String {
    "analytics_client".to_string()
}

fn default_client_secret() -> String {
    "analytics_secret".to_string()
}

fn default_jwt_secret() -> String {
    "CHANGE_THIS_SECRET_IN_PRODUCTION".to_string()
}

fn default_access_token_minutes() -> i64 {
    30
}

fn default_refresh_token_days() -> i64 {
    7
}

fn default_csv_path() -> String {
    "data.csv".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client_id: default_client_id(),
            client_secret: default_client_secret(),
            jwt_secret: default_jwt_secret(),
            access_token_minutes: default_access_token_minutes(),
            refresh_token_days: default_refresh_token_days(),
            csv_path: default_csv_path(),
            http: HttpServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Build a config from defaults overridden by `STOREPULSE_*` environment
    /// variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("STOREPULSE_CLIENT_ID") {
            config.client_id = v;
        }
        if let Ok(v) = std::env::var("STOREPULSE_CLIENT_SECRET") {
            config.client_secret = v;
        }
        if let Ok(v) = std::env::var("STOREPULSE_JWT_SECRET") {
            config.jwt_secret = v;
        }
        if let Ok(v) = std::env::var("STOREPULSE_ACCESS_TOKEN_MINUTES") {
            if let Ok(minutes) = v.parse() {
                config.access_token_minutes = minutes;
            }
        }
        if let Ok(v) = std::env::var("STOREPULSE_REFRESH_TOKEN_DAYS") {
            if let Ok(days) = v.parse() {
                config.refresh_token_days = days;
            }
        }
        if let Ok(v) = std::env::var("STOREPULSE_CSV_PATH") {
            config.csv_path = v;
        }
        if let Ok(v) = std::env::var("STOREPULSE_HOST") {
            config.http.host = v;
        }
        if let Ok(v) = std::env::var("STOREPULSE_PORT") {
            if let Ok(port) = v.parse() {
                config.http.port = port;
            }
        }

        config
    }
}
