use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;

use crate::shared::error::{AppError, AppResult};

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

const ENV_CONFIG_PATH: &str = "TRANSLATE_CONFIG";
const ENV_ENDPOINT: &str = "TRANSLATE_ENDPOINT";
const ENV_TIMEOUT_SECS: &str = "TRANSLATE_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Base URL of the translation endpoint.
    pub endpoint: String,
    pub user_agent: String,
    /// Per-request timeout enforced by the HTTP client.
    pub timeout_secs: u64,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: concat!("translate-cli/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 10,
        }
    }
}

impl AppSettings {
    pub fn get_settings_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        ProjectDirs::from("com", "antigravity", "translate-cli")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from the default location, then apply environment overrides.
    ///
    /// A missing settings file is not an error; nothing is ever written back.
    pub async fn load() -> AppResult<Self> {
        let mut settings = match Self::get_settings_path() {
            Some(path) => Self::load_from(&path).await?,
            None => Self::default(),
        };
        settings.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(settings)
    }

    pub async fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).await.map_err(|e| {
            AppError::Config(format!("Failed to read settings file {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            AppError::Config(format!("Failed to parse settings file {}: {}", path.display(), e))
        })
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.trim().is_empty()) {
            self.endpoint = endpoint;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw
                .trim()
                .parse()
                .map_err(|_| AppError::Config(format!("{} must be a whole number, got {:?}", ENV_TIMEOUT_SECS, raw)))?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings::load_from(&dir.path().join("settings.json")).await.unwrap();
        assert_eq!(settings, AppSettings::default());
        assert!(!dir.path().join("settings.json").exists());
    }

    #[tokio::test]
    async fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "timeout_secs": 3 }"#).unwrap();

        let settings = AppSettings::load_from(&path).await.unwrap();
        assert_eq!(settings.timeout_secs, 3);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
    }

    #[tokio::test]
    async fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AppSettings::load_from(&path).await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_ENDPOINT, "http://localhost:9000/single"),
            (ENV_TIMEOUT_SECS, " 30 "),
        ]
        .into_iter()
        .collect();

        let mut settings = AppSettings::default();
        settings
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(settings.endpoint, "http://localhost:9000/single");
        assert_eq!(settings.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_invalid_timeout_override() {
        let mut settings = AppSettings::default();
        let err = settings
            .apply_overrides(|key| (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
