use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::stats::ProfileStats;

#[derive(Debug, Clone)]
struct CacheEntry {
    stats: ProfileStats,
    expires_at: DateTime<Utc>,
}

/// Process-lifetime stats table keyed by username.
///
/// Entries are overwritten on every successful aggregation and otherwise left
/// alone; an expired entry reads as absent until it is replaced. The lock is
/// never held across an await.
#[derive(Debug, Default)]
pub struct StatsCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl StatsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_for(username: &str) -> String {
        format!("github-stats-{username}")
    }

    /// The cached stats, if `now` is strictly before the entry's expiry.
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> Option<ProfileStats> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries
            .get(key)
            .filter(|entry| now < entry.expires_at)
            .map(|entry| entry.stats.clone())
    }

    pub fn put(&self, key: impl Into<String>, stats: ProfileStats, expires_at: DateTime<Utc>) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.into(), CacheEntry { stats, expires_at });
    }

    /// Stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn hit_before_expiry_miss_at_expiry() {
        let cache = StatsCache::new();
        let key = StatsCache::key_for("alice");
        let expires = t0() + Duration::hours(24);
        cache.put(key.clone(), ProfileStats::sample(t0()), expires);

        assert!(cache.get(&key, t0()).is_some());
        assert!(cache.get(&key, expires - Duration::seconds(1)).is_some());
        assert!(cache.get(&key, expires).is_none());
        assert!(cache.get(&key, expires + Duration::hours(1)).is_none());
        // expired entries stay until superseded
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn put_overwrites() {
        let cache = StatsCache::new();
        let key = StatsCache::key_for("alice");
        let mut stats = ProfileStats::sample(t0());
        cache.put(key.clone(), stats.clone(), t0());

        stats.total_stars = 7;
        cache.put(key.clone(), stats, t0() + Duration::hours(1));

        assert_eq!(cache.get(&key, t0()).unwrap().total_stars, 7);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn keys_are_per_user() {
        let cache = StatsCache::new();
        assert!(cache.is_empty());
        cache.put(
            StatsCache::key_for("alice"),
            ProfileStats::sample(t0()),
            t0() + Duration::hours(1),
        );
        assert!(cache.get(&StatsCache::key_for("bob"), t0()).is_none());
        assert_eq!(StatsCache::key_for("bob"), "github-stats-bob");
    }
}
