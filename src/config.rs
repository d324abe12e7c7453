use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;
use url::Url;

use crate::error::{Result, TaskboardError};

#[derive(Deserialize, Default)]
pub struct Config {
    pub api_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| TaskboardError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| TaskboardError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "taskboard")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(TaskboardError::NoConfigDir)
    }

    /// Get API base URL with env var taking precedence over config file
    pub fn api_url(&self) -> Result<Url> {
        let raw = match std::env::var("TASKBOARD_API_URL") {
            Ok(url) => url,
            Err(_) => self.api_url.clone().ok_or(TaskboardError::MissingApiUrl)?,
        };

        parse_base_url(&raw)
    }
}

/// Parse and normalize a base URL so `Url::join` keeps the full path.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    let mut url =
        Url::parse(trimmed).map_err(|_| TaskboardError::InvalidUrl(trimmed.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(TaskboardError::InvalidUrl(trimmed.to_string()));
    }
    // Without a trailing slash, join() would drop the last path segment.
    if !url.path().ends_with('/') {
        url.set_path(&format!("{}/", url.path()));
    }
    Ok(url)
}
