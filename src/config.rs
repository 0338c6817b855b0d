use std::fs;
use std::path::PathBuf;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::HarvardError;

pub const DEFAULT_BASE_URL: &str = "https://api.harvardartmuseums.org";
pub const DEFAULT_DB_PATH: &str = "harvard.db";
pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const DEFAULT_MAX_PAGES: u32 = 25;
pub const DEFAULT_CATALOG_SIZE: u32 = 100;
pub const DEFAULT_MIN_OBJECT_COUNT: i64 = 2500;
pub const DEFAULT_PAGE_PAUSE_MS: u64 = 500;

/// On-disk shape of `harvard-artifacts.json`. Every field is optional;
/// commands that talk to the upstream API additionally require a key from
/// the file or the `HARVARD_API_KEY` environment variable.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub db_path: Option<String>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub max_pages: Option<u32>,
    #[serde(default)]
    pub min_object_count: Option<i64>,
    #[serde(default)]
    pub page_pause_ms: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Absent until a command actually needs the upstream API; offline
    /// commands (query, queries) run without a key.
    pub api_key: Option<String>,
    pub base_url: String,
    pub db_path: Utf8PathBuf,
    pub page_size: u32,
    pub max_pages: u32,
    pub catalog_size: u32,
    pub min_object_count: i64,
    pub page_pause_ms: u64,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Resolve configuration from an optional explicit path. Without a path,
    /// `harvard-artifacts.json` in the working directory is used if present,
    /// otherwise defaults plus the `HARVARD_API_KEY` environment variable.
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, HarvardError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from("harvard-artifacts.json"),
        };

        let config = if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .map_err(|_| HarvardError::ConfigRead(config_path.clone()))?;
            serde_json::from_str(&content)
                .map_err(|err| HarvardError::ConfigParse(err.to_string()))?
        } else if path.is_some() {
            return Err(HarvardError::ConfigRead(config_path));
        } else {
            Config::default()
        };

        Self::resolve_config(config)
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, HarvardError> {
        let api_key = config
            .api_key
            .or_else(|| std::env::var("HARVARD_API_KEY").ok())
            .filter(|key| !key.trim().is_empty());

        Ok(ResolvedConfig {
            api_key,
            base_url: config
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            db_path: Utf8PathBuf::from(
                config.db_path.unwrap_or_else(|| DEFAULT_DB_PATH.to_string()),
            ),
            page_size: config.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            max_pages: config.max_pages.unwrap_or(DEFAULT_MAX_PAGES),
            catalog_size: DEFAULT_CATALOG_SIZE,
            min_object_count: config.min_object_count.unwrap_or(DEFAULT_MIN_OBJECT_COUNT),
            page_pause_ms: config.page_pause_ms.unwrap_or(DEFAULT_PAGE_PAUSE_MS),
        })
    }
}
