use std::path::Path;

use thiserror::Error;

mod schema;

pub use schema::{BackendConfig, CURRENT_CONFIG_VERSION, Config};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Will always return a config, falling back to defaults on missing or
/// invalid files.
pub fn load_config_from_file(config_path: &Path) -> Config {
    match std::fs::read_to_string(config_path) {
        Ok(raw_config) => Config::from_raw(&raw_config),
        Err(err) => {
            if err.kind() == std::io::ErrorKind::NotFound {
                tracing::info!("No config file found, starting from defaults");
            } else {
                tracing::warn!("Failed to read config file: {}", err);
            }
            Config::default()
        }
    }
}

pub fn save_config_to_file(config: &Config, config_path: &Path) -> Result<(), ConfigError> {
    let raw_config = serde_json::to_string_pretty(config)?;
    std::fs::write(config_path, raw_config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Config, load_config_from_file, save_config_to_file};

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from_file(&dir.path().join("nope.json"));
        assert!(config.backend.refresh_token.is_none());
    }

    #[test]
    fn saved_config_loads_back_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.backend.url = "https://example.supabase.co".to_string();
        config.backend.refresh_token = Some("rt-abc".to_string());
        save_config_to_file(&config, &path).unwrap();

        let loaded = load_config_from_file(&path);
        assert_eq!(loaded.backend.url, config.backend.url);
        assert_eq!(loaded.backend.refresh_token, config.backend.refresh_token);
    }
}
