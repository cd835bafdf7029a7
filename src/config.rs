use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::domain::WatchScope;
use crate::error::WatchError;

pub const DEFAULT_CONFIG_FILE: &str = "hf-watch.json";
pub const DEFAULT_CATALOG_BASE_URL: &str = "https://huggingface.co/api";
pub const DEFAULT_SEARCH_TERM: &str = "test-dataset";
pub const DEFAULT_SEARCH_AUTHOR: &str = "ryua22222";
pub const DEFAULT_SEARCH_LIMIT: u32 = 5;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const TOKEN_ENV: &str = "HF_TOKEN";
pub const STORE_DIR_ENV: &str = "HF_WATCH_STORE_DIR";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog_base_url: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub search: Option<SearchEntry>,
    #[serde(default)]
    pub scope: Option<WatchScope>,
    #[serde(default)]
    pub store_dir: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SearchEntry {
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub author: String,
    pub limit: u32,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self {
            term: DEFAULT_SEARCH_TERM.to_string(),
            author: DEFAULT_SEARCH_AUTHOR.to_string(),
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub catalog_base_url: String,
    pub token: Option<String>,
    pub search: SearchQuery,
    pub scope: WatchScope,
    pub store_dir: Option<Utf8PathBuf>,
    pub timeout: Duration,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `path`, or `hf-watch.json` from the working directory when present,
    /// then applies environment overrides.
    pub fn resolve(path: Option<&str>) -> Result<ResolvedConfig, WatchError> {
        let config = Self::load(path)?;
        let config = Self::apply_env(config, |name| std::env::var(name).ok());
        Self::resolve_config(config)
    }

    pub fn load(path: Option<&str>) -> Result<Config, WatchError> {
        let config_path = match path {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        if path.is_none() && !config_path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&config_path)
            .map_err(|_| WatchError::ConfigRead(config_path.clone()))?;
        serde_json::from_str(&content).map_err(|err| WatchError::ConfigParse(err.to_string()))
    }

    pub fn apply_env<F>(mut config: Config, lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup(TOKEN_ENV).filter(|value| !value.trim().is_empty()) {
            config.token = Some(token);
        }
        if let Some(dir) = lookup(STORE_DIR_ENV).filter(|value| !value.trim().is_empty()) {
            config.store_dir = Some(dir);
        }
        config
    }

    pub fn resolve_config(config: Config) -> Result<ResolvedConfig, WatchError> {
        let catalog_base_url = config
            .catalog_base_url
            .unwrap_or_else(|| DEFAULT_CATALOG_BASE_URL.to_string())
            .trim()
            .trim_end_matches('/')
            .to_string();
        if catalog_base_url.is_empty() {
            return Err(WatchError::InvalidConfig(
                "catalog_base_url must not be empty".to_string(),
            ));
        }

        let search = match config.search {
            Some(entry) => SearchQuery {
                term: entry.term.unwrap_or_else(|| DEFAULT_SEARCH_TERM.to_string()),
                author: entry
                    .author
                    .unwrap_or_else(|| DEFAULT_SEARCH_AUTHOR.to_string()),
                limit: entry.limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
            },
            None => SearchQuery::default(),
        };
        if search.limit == 0 {
            return Err(WatchError::InvalidConfig(
                "search.limit must be greater than zero".to_string(),
            ));
        }

        let timeout_secs = config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(WatchError::InvalidConfig(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }

        let token = config
            .token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty());

        Ok(ResolvedConfig {
            catalog_base_url,
            token,
            search,
            scope: config.scope.unwrap_or_default(),
            store_dir: config.store_dir.map(Utf8PathBuf::from),
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_historical_search() {
        let resolved = ConfigLoader::resolve_config(Config::default()).unwrap();
        assert_eq!(resolved.catalog_base_url, DEFAULT_CATALOG_BASE_URL);
        assert_eq!(resolved.search, SearchQuery::default());
        assert_eq!(resolved.search.limit, 5);
        assert_eq!(resolved.scope, WatchScope::Global);
        assert!(resolved.token.is_none());
        assert_eq!(resolved.timeout, Duration::from_secs(30));
    }

    #[test]
    fn env_overrides_token_and_store_dir() {
        let config = Config {
            token: Some("from-file".to_string()),
            ..Config::default()
        };
        let config = ConfigLoader::apply_env(config, |name| match name {
            TOKEN_ENV => Some("from-env".to_string()),
            STORE_DIR_ENV => Some("/tmp/watch".to_string()),
            _ => None,
        });
        let resolved = ConfigLoader::resolve_config(config).unwrap();
        assert_eq!(resolved.token.as_deref(), Some("from-env"));
        assert_eq!(resolved.store_dir, Some(Utf8PathBuf::from("/tmp/watch")));
    }
}
