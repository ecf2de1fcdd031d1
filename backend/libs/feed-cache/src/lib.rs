//! In-process TTL cache for DailyBase feed services
//!
//! Each entry holds `{ value, expires_at }`. The cache is constructed once
//! with a fixed TTL and handed to consumers by reference; there is no
//! ambient static accessor. Expired entries are dropped lazily on read and
//! eagerly via [`FeedCache::purge_expired`].

use std::hash::Hash;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use tracing::debug;

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// A keyed value cache with a fixed time-to-live per entry.
pub struct FeedCache<K, V> {
    entries: DashMap<K, Entry<V>>,
    ttl: Duration,
}

impl<K, V> FeedCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Returns the cached value for `key` if it has not expired.
    ///
    /// An expired entry is removed as a side effect of the lookup.
    pub fn get(&self, key: &K) -> Option<V> {
        let expired = match self.entries.get(key) {
            Some(entry) => {
                if entry.expires_at > Instant::now() {
                    return Some(entry.value.clone());
                }
                true
            }
            None => false,
        };

        if expired {
            self.entries.remove(key);
        }
        None
    }

    /// Stores `value` under `key`, resetting its TTL.
    pub fn insert(&self, key: K, value: V) {
        self.entries.insert(
            key,
            Entry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Removes `key` from the cache. Returns whether an entry was present.
    pub fn invalidate(&self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drops every expired entry. Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        let purged = before - self.entries.len();

        if purged > 0 {
            debug!(purged = purged, "Purged expired cache entries");
        }
        purged
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_insert_and_get() {
        let cache: FeedCache<String, i32> = FeedCache::new(Duration::from_secs(60));

        cache.insert("a".to_string(), 1);
        assert_eq!(cache.get(&"a".to_string()), Some(1));
        assert_eq!(cache.get(&"b".to_string()), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_expired_entry_is_dropped_on_read() {
        let cache: FeedCache<String, i32> = FeedCache::new(Duration::from_millis(10));

        cache.insert("a".to_string(), 1);
        sleep(Duration::from_millis(25));

        assert_eq!(cache.get(&"a".to_string()), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_insert_resets_ttl() {
        let cache: FeedCache<String, i32> = FeedCache::new(Duration::from_millis(100));

        cache.insert("a".to_string(), 1);
        sleep(Duration::from_millis(60));
        cache.insert("a".to_string(), 2);
        sleep(Duration::from_millis(60));

        // 120ms after the first insert, but only 60ms after the second
        assert_eq!(cache.get(&"a".to_string()), Some(2));
    }

    #[test]
    fn test_invalidate() {
        let cache: FeedCache<String, i32> = FeedCache::new(Duration::from_secs(60));

        cache.insert("a".to_string(), 1);
        assert!(cache.invalidate(&"a".to_string()));
        assert!(!cache.invalidate(&"a".to_string()));
        assert_eq!(cache.get(&"a".to_string()), None);
    }

    #[test]
    fn test_purge_expired() {
        let cache: FeedCache<String, i32> = FeedCache::new(Duration::from_millis(10));

        cache.insert("a".to_string(), 1);
        cache.insert("b".to_string(), 2);
        sleep(Duration::from_millis(25));
        cache.insert("c".to_string(), 3);

        assert_eq!(cache.purge_expired(), 2);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"c".to_string()), Some(3));
    }
}
