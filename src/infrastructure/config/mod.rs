// ============================================================
// SERVER CONFIGURATION
// ============================================================
// Defaults, optional TOML file, DUPECHECK_* environment overrides

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::AppError;

/// Runtime configuration for the HTTP server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (default: 127.0.0.1)
    pub host: String,

    /// Port to listen on (default: 8080)
    pub port: u16,

    /// Maximum accepted upload size in bytes (default: 16 MiB)
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

impl ServerConfig {
    /// Load configuration: defaults, then `dupecheck.toml` if present,
    /// then `DUPECHECK_*` environment variables.
    pub fn load() -> Result<Self, AppError> {
        Figment::from(Serialized::defaults(ServerConfig::default()))
            .merge(Toml::file("dupecheck.toml"))
            .merge(Env::prefixed("DUPECHECK_"))
            .extract()
            .map_err(|e| AppError::Internal(format!("Failed to load configuration: {}", e)))
    }
}
