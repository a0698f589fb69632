//! Per-owner, per-day cache for dashboard widgets

use crate::model::UserId;
use chrono::{NaiveDate, Utc};
use moka::sync::Cache;
use std::hash::Hash;
use std::time::Duration;

/// Calendar day an entry belongs to
pub type DateBucket = NaiveDate;

/// Today's bucket (UTC)
pub fn today() -> DateBucket {
    Utc::now().date_naive()
}

/// TTL cache keyed by `(owner, day)`.
///
/// The owner defaults to the user id; hosts whose values also depend on
/// tenant or role key by a richer session key instead. Entries for a new day
/// never collide with yesterday's; the TTL bounds how long stale days linger
/// in memory.
#[derive(Clone)]
pub struct DailyCache<V, K = UserId>
where
    V: Clone + Send + Sync + 'static,
    K: Clone + Eq + Hash + Send + Sync + 'static,
{
    cache: Cache<(K, DateBucket), V>,
    ttl: Duration,
}

impl<V, K> DailyCache<V, K>
where
    V: Clone + Send + Sync + 'static,
    K: Clone + Eq + Hash + Send + Sync + 'static,
{
    /// Create cache with capacity and TTL
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();

        Self { cache, ttl }
    }

    pub fn get(&self, owner: K, day: DateBucket) -> Option<V> {
        self.cache.get(&(owner, day))
    }

    pub fn insert(&self, owner: K, day: DateBucket, value: V) {
        self.cache.insert((owner, day), value);
    }

    /// Return the cached value or compute and store it
    pub fn get_or_insert_with(&self, owner: K, day: DateBucket, init: impl FnOnce() -> V) -> V {
        self.cache.get_with((owner, day), init)
    }

    pub fn invalidate(&self, owner: K, day: DateBucket) {
        self.cache.invalidate(&(owner, day));
    }

    /// Drop every day cached for `owner`
    pub fn invalidate_user(&self, owner: K) {
        let keys: Vec<_> = self
            .cache
            .iter()
            .filter(|(key, _)| key.0 == owner)
            .map(|(key, _)| (*key).clone())
            .collect();
        for key in keys {
            self.cache.invalidate(&key);
        }
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl<V, K> Default for DailyCache<V, K>
where
    V: Clone + Send + Sync + 'static,
    K: Clone + Eq + Hash + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(10_000, Duration::from_secs(24 * 60 * 60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use uuid::Uuid;

    fn day(d: u32) -> DateBucket {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_keyed_by_user_and_day() {
        let cache = DailyCache::default();
        let asha = Uuid::new_v4();
        let ravi = Uuid::new_v4();

        cache.insert(asha, day(19), "briefing-19");

        assert_eq!(cache.get(asha, day(19)), Some("briefing-19"));
        assert_eq!(cache.get(asha, day(20)), None);
        assert_eq!(cache.get(ravi, day(19)), None);
    }

    #[test]
    fn test_get_or_insert_runs_once() {
        let cache = DailyCache::default();
        let user = Uuid::new_v4();
        let calls = Cell::new(0);

        let first = cache.get_or_insert_with(user, day(19), || {
            calls.set(calls.get() + 1);
            42u32
        });
        let second = cache.get_or_insert_with(user, day(19), || {
            calls.set(calls.get() + 1);
            7u32
        });

        assert_eq!((first, second), (42, 42));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_invalidate() {
        let cache = DailyCache::default();
        let user = Uuid::new_v4();
        cache.insert(user, day(18), 1u8);
        cache.insert(user, day(19), 2u8);

        cache.invalidate(user, day(19));
        assert_eq!(cache.get(user, day(19)), None);
        assert_eq!(cache.get(user, day(18)), Some(1));

        cache.invalidate_user(user);
        assert_eq!(cache.get(user, day(18)), None);
    }

    #[test]
    fn test_composite_owner_key() {
        let cache: DailyCache<&str, (Uuid, &str)> = DailyCache::default();
        let user = Uuid::new_v4();

        cache.insert((user, "springfield"), day(19), "Springfield High");
        cache.insert((user, "aiims"), day(19), "AIIMS Delhi");

        assert_eq!(cache.get((user, "springfield"), day(19)), Some("Springfield High"));
        assert_eq!(cache.get((user, "aiims"), day(19)), Some("AIIMS Delhi"));

        cache.invalidate_user((user, "aiims"));
        assert_eq!(cache.get((user, "aiims"), day(19)), None);
        assert_eq!(cache.get((user, "springfield"), day(19)), Some("Springfield High"));
    }

    #[test]
    fn test_ttl_expiry() {
        let cache = DailyCache::new(16, Duration::from_millis(50));
        let user = Uuid::new_v4();
        cache.insert(user, day(19), "x");

        std::thread::sleep(Duration::from_millis(120));
        assert_eq!(cache.get(user, day(19)), None);
    }
}
