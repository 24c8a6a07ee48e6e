use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

pub const DEFAULT_HOST: &str = "https://innosistemas-back.onrender.com";
pub const DEFAULT_CAPACITY: usize = 2;
const DEFAULT_LOG: &str = "warn";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub host: String,
    /// Maximum number of classmates selectable besides yourself.
    pub capacity: usize,
    pub timeout_secs: Option<u64>,
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            capacity: DEFAULT_CAPACITY,
            timeout_secs: None,
            log: DEFAULT_LOG.to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        let mut config = if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|e| AppError::ConfigRead {
                    path: config_path.clone(),
                    source: e,
                })?;
            Self::parse(&contents).map_err(|e| AppError::ConfigParse {
                path: config_path,
                source: e,
            })?
        } else {
            Config::default()
        };

        if let Ok(host) = std::env::var("INNO_HOST") {
            config.host = host;
        }

        Ok(config)
    }

    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn config_dir() -> Result<PathBuf> {
        ProjectDirs::from("", "", "inno")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or(AppError::NoConfigDir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.capacity, 2);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_parse_partial_overrides() {
        let config = Config::parse("host = \"http://localhost:8080\"\ntimeout_secs = 5\n").unwrap();
        assert_eq!(config.host, "http://localhost:8080");
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_parse_rejects_bad_types() {
        assert!(Config::parse("capacity = \"two\"").is_err());
    }
}
