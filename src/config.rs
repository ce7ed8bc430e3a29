//! Configuration handling for the field builder

use crate::transport::DEFAULT_BASE_URL;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Pause before each submit when the config leaves it unset
const DEFAULT_SUBMIT_DELAY_MS: u64 = 2000;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BuilderConfig {
    /// Field service base URL
    pub server_url: Option<String>,
    /// Pause before each submit, in milliseconds
    pub submit_delay_ms: Option<u64>,
}

impl BuilderConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "fieldbuilder", "field-builder")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Log file location
    pub fn log_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.data_local_dir().join("field-builder.log"))
    }

    pub fn server_url(&self) -> &str {
        self.server_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms.unwrap_or(DEFAULT_SUBMIT_DELAY_MS))
    }

    /// Load configuration from file, writing a template on first run
    pub fn load() -> Result<Self> {
        let Some(path) = Self::config_path() else {
            return Ok(Self::default());
        };

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: BuilderConfig = serde_json::from_str(&content)?;
            return Ok(config);
        }

        let config = Self {
            server_url: Some(DEFAULT_BASE_URL.to_string()),
            submit_delay_ms: Some(DEFAULT_SUBMIT_DELAY_MS),
        };
        config.save()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BuilderConfig::default();
        assert!(config.server_url.is_none());
        assert!(config.submit_delay_ms.is_none());
    }

    #[test]
    fn test_defaults_resolve() {
        let config = BuilderConfig::default();
        assert_eq!(config.server_url(), "http://localhost:4000");
        assert_eq!(config.submit_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_configured_values_win() {
        let config = BuilderConfig {
            server_url: Some("http://fields.internal:8080".to_string()),
            submit_delay_ms: Some(2000),
        };
        assert_eq!(config.server_url(), "http://fields.internal:8080");
        assert_eq!(config.submit_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_zero_delay_disables_pause() {
        let config = BuilderConfig {
            server_url: None,
            submit_delay_ms: Some(0),
        };
        assert_eq!(config.submit_delay(), Duration::ZERO);
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: BuilderConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.server_url.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"submit_delay_ms": 250, "unknown_field": "value"}"#;
        let parsed: BuilderConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.submit_delay_ms, Some(250));
    }

    #[test]
    fn test_serialization() {
        let config = BuilderConfig {
            server_url: Some("http://localhost:4000".to_string()),
            submit_delay_ms: Some(10),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: BuilderConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.server_url, config.server_url);
        assert_eq!(parsed.submit_delay_ms, Some(10));
    }

    #[test]
    fn test_paths_share_project_dirs() {
        // Just test that the functions don't panic
        let _config = BuilderConfig::config_path();
        let _log = BuilderConfig::log_path();
    }
}
