//! Expiring key/value cache for remote site settings.
//!
//! Entries are stored with their own TTL and dropped on the first read after
//! they expire. The cache is handed to services explicitly instead of living
//! in a global.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Key under which the site settings document is cached.
pub const SITE_SETTINGS_KEY: &str = "siteSettingsCache";

/// A cached value and when it stops being usable.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheEntry {
    pub value: Value,
    pub stored_at: DateTime<Utc>,
    pub ttl: Duration,
}

pub trait SettingsCache: Send + Sync {
    /// Returns the value for `key` if present and not expired.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores `value` under `key` for `ttl`.
    fn set(&self, key: &str, value: Value, ttl: Duration);

    /// An entry is expired once `ttl` has fully elapsed since it was stored.
    fn is_expired(&self, entry: &CacheEntry) -> bool;
}

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Process-local [`SettingsCache`].
#[derive(Clone)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
    clock: Clock,
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::with_clock(Arc::new(Utc::now))
    }
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cache reading the current time from `clock`.
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            clock,
        }
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SettingsCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Value> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let expired = self.is_expired(entries.get(key)?);
        if expired {
            entries.remove(key);
            return None;
        }
        entries.get(key).map(|entry| entry.value.clone())
    }

    fn set(&self, key: &str, value: Value, ttl: Duration) {
        let entry = CacheEntry {
            value,
            stored_at: (self.clock)(),
            ttl,
        };
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), entry);
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        // A clock that moved backwards counts as no time elapsed.
        let elapsed = ((self.clock)() - entry.stored_at)
            .to_std()
            .unwrap_or(Duration::ZERO);
        elapsed >= entry.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use serde_json::json;

    fn manual_clock() -> (Arc<Mutex<DateTime<Utc>>>, Clock) {
        let now = Arc::new(Mutex::new(Utc::now()));
        let handle = now.clone();
        let clock: Clock = Arc::new(move || *handle.lock().unwrap());
        (now, clock)
    }

    #[test]
    fn returns_value_until_ttl_elapses() {
        let (now, clock) = manual_clock();
        let cache = MemoryCache::with_clock(clock);
        cache.set(
            SITE_SETTINGS_KEY,
            json!({"button_color": "#111111"}),
            Duration::from_secs(60),
        );

        *now.lock().unwrap() += TimeDelta::seconds(59);
        assert_eq!(
            cache.get(SITE_SETTINGS_KEY),
            Some(json!({"button_color": "#111111"}))
        );

        *now.lock().unwrap() += TimeDelta::seconds(1);
        assert_eq!(cache.get(SITE_SETTINGS_KEY), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_ttl_is_immediately_expired() {
        let cache = MemoryCache::new();
        cache.set("k", json!(1), Duration::ZERO);
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn clock_going_backwards_keeps_entry() {
        let (now, clock) = manual_clock();
        let cache = MemoryCache::with_clock(clock);
        let entry = CacheEntry {
            value: json!(null),
            stored_at: *now.lock().unwrap() + TimeDelta::seconds(30),
            ttl: Duration::from_secs(1),
        };

        assert!(!cache.is_expired(&entry));
    }

    #[test]
    fn set_overwrites_previous_value() {
        let cache = MemoryCache::new();
        cache.set("k", json!("old"), Duration::from_secs(60));
        cache.set("k", json!("new"), Duration::from_secs(60));

        assert_eq!(cache.get("k"), Some(json!("new")));
        assert_eq!(cache.len(), 1);
    }
}
