//! Picks the data path for a request: canned sample for local hosts, otherwise
//! the cache with aggregation on a miss.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use crate::aggregate::{self, DEFAULT_ACTIVE_REPOS};
use crate::cache::StatsCache;
use crate::errors::StatsResult;
use crate::github::ProfileSource;
use crate::stats::ProfileStats;

/// True for loopback host names. Any port suffix is ignored.
pub fn is_local_host(host: &str) -> bool {
    let name = strip_port(host.trim());
    name == "localhost" || name == "127.0.0.1" || name == "::1" || name.contains("localhost")
}

fn strip_port(host: &str) -> &str {
    if let Some(rest) = host.strip_prefix('[') {
        // [::1]:8080
        return rest.split(']').next().unwrap_or(rest);
    }
    match host.rsplit_once(':') {
        Some((name, port)) if !name.contains(':') && port.chars().all(|c| c.is_ascii_digit()) => {
            name
        }
        _ => host,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Local,
    Remote,
}

impl Origin {
    pub fn from_host(host: Option<&str>) -> Self {
        match host {
            Some(h) if is_local_host(h) => Origin::Local,
            _ => Origin::Remote,
        }
    }
}

pub struct ProfileStatsService {
    source: Arc<dyn ProfileSource>,
    cache: StatsCache,
    ttl: Duration,
    active_repos: usize,
}

impl ProfileStatsService {
    pub fn new(source: Arc<dyn ProfileSource>, ttl: Duration) -> Self {
        Self {
            source,
            cache: StatsCache::new(),
            ttl,
            active_repos: DEFAULT_ACTIVE_REPOS,
        }
    }

    pub fn with_active_repos(mut self, active_repos: usize) -> Self {
        self.active_repos = active_repos;
        self
    }

    pub fn cache(&self) -> &StatsCache {
        &self.cache
    }

    pub async fn stats_for(&self, username: &str, origin: Origin) -> StatsResult<ProfileStats> {
        self.stats_for_at(username, origin, Utc::now()).await
    }

    /// Same as `stats_for` with an explicit clock.
    pub async fn stats_for_at(
        &self,
        username: &str,
        origin: Origin,
        now: DateTime<Utc>,
    ) -> StatsResult<ProfileStats> {
        if origin == Origin::Local {
            info!(user = username, "Using sample data for local request");
            return Ok(ProfileStats::sample(now));
        }

        let key = StatsCache::key_for(username);
        if let Some(stats) = self.cache.get(&key, now) {
            debug!(user = username, "Stats cache hit");
            return Ok(stats);
        }

        debug!(user = username, "Stats cache miss, aggregating");
        let stats = aggregate::aggregate(self.source.as_ref(), username, self.active_repos, now).await?;
        let expires_at = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        self.cache.put(key, stats.clone(), expires_at);
        Ok(stats)
    }
}
