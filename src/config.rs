use std::path::PathBuf;
use std::time::Duration;

use eyre::{Result, bail};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogConfig;

pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub region_code: Option<String>,
    pub safe_search: Option<String>,
    pub search_max_results: Option<u32>,
    pub trending_max_results: Option<u32>,
    pub comments_max_results: Option<u32>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load config from ~/.config/weartube/config.toml if it exists
    pub fn load() -> Result<Self> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }

    /// Resolve the client configuration. `YOUTUBE_API_KEY` wins over the file.
    pub fn catalog_config(&self) -> Result<CatalogConfig> {
        self.catalog_config_with(std::env::var(API_KEY_ENV).ok())
    }

    fn catalog_config_with(&self, env_key: Option<String>) -> Result<CatalogConfig> {
        let api_key = env_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone().filter(|k| !k.trim().is_empty()));
        let Some(api_key) = api_key else {
            bail!(
                "no YouTube API key configured\n\nSet {API_KEY_ENV} or add `api_key = \"...\"` to {}",
                config_path().display()
            );
        };

        let mut config = CatalogConfig::new(api_key.trim());
        if let Some(ref base_url) = self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(ref region_code) = self.region_code {
            config.region_code = region_code.clone();
        }
        if let Some(ref safe_search) = self.safe_search {
            config.safe_search = safe_search.clone();
        }
        if let Some(n) = self.search_max_results {
            config.search_max_results = n;
        }
        if let Some(n) = self.trending_max_results {
            config.trending_max_results = n;
        }
        if let Some(n) = self.comments_max_results {
            config.comments_max_results = n;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("weartube")
        .join("config.toml")
}
