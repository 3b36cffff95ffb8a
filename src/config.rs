// src/config.rs
//! Unified configuration loading - optional TOML file overlaid by environment

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

pub const CONFIG_FILE: &str = "hrpulse.toml";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub api: ApiConfig,
}

/// Connection settings for the Jobs API, injected into the client at
/// construction time rather than read from a process-wide global.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    api: Option<ApiFileSection>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiFileSection {
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
}

impl ConfigManager {
    /// Load configuration. Precedence for the base URL: CLI override, then
    /// the `JOBS_API_URL` environment variable, then `hrpulse.toml`.
    pub fn load(base_url_override: Option<String>) -> Result<Self> {
        let file = Self::load_file(Path::new(CONFIG_FILE))?;
        let env_url = std::env::var("JOBS_API_URL").ok();
        let env_timeout = std::env::var("JOBS_API_TIMEOUT_SECS").ok();
        let api = resolve_api_config(file, env_url, env_timeout, base_url_override)?;

        info!("Jobs API: {}", api.base_url);
        Ok(Self { api })
    }

    fn load_file(path: &Path) -> Result<ConfigFile> {
        if !path.exists() {
            return Ok(ConfigFile::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

fn resolve_api_config(
    file: ConfigFile,
    env_url: Option<String>,
    env_timeout: Option<String>,
    base_url_override: Option<String>,
) -> Result<ApiConfig> {
    let section = file.api.unwrap_or_default();

    let base_url = base_url_override
        .or(env_url)
        .or(section.base_url)
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Jobs API base URL not configured. Set JOBS_API_URL, pass --api-url, \
                 or add [api] base_url to {}",
                CONFIG_FILE
            )
        })?;

    let timeout_seconds = match env_timeout {
        Some(raw) => raw
            .parse::<u64>()
            .context("JOBS_API_TIMEOUT_SECS must be a number of seconds")?,
        None => section.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
    };

    Ok(ApiConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        timeout_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with(base_url: Option<&str>, timeout: Option<u64>) -> ConfigFile {
        ConfigFile {
            api: Some(ApiFileSection {
                base_url: base_url.map(str::to_string),
                timeout_seconds: timeout,
            }),
        }
    }

    #[test]
    fn test_override_beats_env_and_file() {
        let api = resolve_api_config(
            file_with(Some("http://file:1"), None),
            Some("http://env:2".to_string()),
            None,
            Some("http://cli:3".to_string()),
        )
        .expect("resolves");
        assert_eq!(api.base_url, "http://cli:3");
    }

    #[test]
    fn test_env_beats_file() {
        let api = resolve_api_config(
            file_with(Some("http://file:1"), None),
            Some("http://env:2".to_string()),
            None,
            None,
        )
        .expect("resolves");
        assert_eq!(api.base_url, "http://env:2");
    }

    #[test]
    fn test_missing_base_url_is_an_error() {
        assert!(resolve_api_config(ConfigFile::default(), None, None, None).is_err());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let api = resolve_api_config(
            ConfigFile::default(),
            Some("http://localhost:8000/".to_string()),
            None,
            None,
        )
        .expect("resolves");
        assert_eq!(api.base_url, "http://localhost:8000");
    }

    #[test]
    fn test_timeout_precedence_and_default() {
        let api = resolve_api_config(
            file_with(Some("http://x"), Some(120)),
            None,
            Some("5".to_string()),
            None,
        )
        .expect("resolves");
        assert_eq!(api.timeout_seconds, 5);

        let api = resolve_api_config(file_with(Some("http://x"), Some(120)), None, None, None)
            .expect("resolves");
        assert_eq!(api.timeout_seconds, 120);

        let api =
            resolve_api_config(file_with(Some("http://x"), None), None, None, None).expect("resolves");
        assert_eq!(api.timeout_seconds, DEFAULT_TIMEOUT_SECS);

        assert!(resolve_api_config(
            file_with(Some("http://x"), None),
            None,
            Some("not-a-number".to_string()),
            None
        )
        .is_err());
    }
}
