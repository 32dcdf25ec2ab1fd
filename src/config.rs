//! Layered configuration: built-in defaults, then an optional TOML file,
//! then `PROFILE_CARD_*` environment variables (`__` separates sections).

use anyhow::{Context, Result};
use chrono::TimeDelta;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const ENV_PREFIX: &str = "PROFILE_CARD_";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub github: GithubConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// REST API root, without a trailing slash
    pub api_base_url: String,
    pub user_agent: String,
    /// Repositories requested from the listing endpoint (single page)
    pub repo_limit: u32,
    /// How many of the most recently updated repositories are inspected for commits
    pub active_repo_limit: usize,
    /// Commits requested per active repository
    pub commit_limit: u32,
    /// Per-request HTTP timeout; 0 disables it
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub ttl_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8787,
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.github.com".to_string(),
            user_agent: "GitHub-Profile-Widget".to_string(),
            repo_limit: 100,
            active_repo_limit: 5,
            commit_limit: 50,
            timeout_secs: 10,
        }
    }
}

impl GithubConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 24 * 60 * 60,
        }
    }
}

impl CacheConfig {
    /// Fails when `ttl_secs` does not fit a `TimeDelta`.
    pub fn ttl(&self) -> Result<TimeDelta> {
        i64::try_from(self.ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .with_context(|| format!("cache.ttl_secs out of range: {}", self.ttl_secs))
    }
}

impl Config {
    /// The provider stack without extracting it. A missing file contributes nothing.
    pub fn figment(config_file: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_file.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn load(config_file: impl AsRef<Path>) -> Result<Self> {
        let path = config_file.as_ref();
        let config: Config = Self::figment(path)
            .extract()
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
        config
            .cache
            .ttl()
            .with_context(|| format!("Invalid configuration in {}", path.display()))?;
        Ok(config)
    }
}
