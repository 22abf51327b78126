use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub const CURRENT_CONFIG_VERSION: &str = "v1";

fn default_backend_url() -> String {
    "http://127.0.0.1:54321".to_string()
}

/// Connection details for the hosted backend.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(default)]
pub struct BackendConfig {
    pub url: String,
    /// Publishable API key. Row-level security does the real gating; this
    /// key only identifies the project.
    #[serde(alias = "publishKey")]
    pub publish_key: String,
    /// Refresh token from the last session, presented on startup.
    #[serde(alias = "refreshToken")]
    pub refresh_token: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            publish_key: String::new(),
            refresh_token: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(default)]
pub struct Config {
    pub config_version: String,
    pub backend: BackendConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_version: CURRENT_CONFIG_VERSION.to_string(),
            backend: BackendConfig::default(),
        }
    }
}

impl Config {
    /// Parse raw JSON, falling back to defaults when the file is from an
    /// unknown version or hand-edited into invalidity.
    pub fn from_raw(raw: &str) -> Self {
        match serde_json::from_str::<Self>(raw) {
            Ok(config) if config.config_version == CURRENT_CONFIG_VERSION => config,
            Ok(config) => {
                tracing::warn!(
                    version = %config.config_version,
                    "Unknown config version, using defaults"
                );
                Self::default()
            }
            Err(err) => {
                tracing::warn!("Failed to parse config file: {}", err);
                Self::default()
            }
        }
    }
}
