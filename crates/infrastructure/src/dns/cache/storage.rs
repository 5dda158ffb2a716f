use super::{CacheKey, CacheMetrics, CacheMetricsSnapshot, CachedRecord};
use bytes::Bytes;
use dashmap::DashMap;
use dns_blocker_application::ports::{ResponseCache, UpstreamResponse};
use dns_blocker_domain::DnsQuery;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::time::Instant;
use tracing::{debug, info};

/// Upper bound on the capacity reserved up front.
const MAX_PREALLOCATED_ENTRIES: usize = 4096;

/// Shared response cache.
///
/// Backed by a sharded `DashMap`: lookups take a shard read lock, inserts and
/// removals lock a single shard. Entries are immutable once stored.
///
/// `max_entries` holds whenever no insert is in flight. Concurrent inserts
/// may overshoot it briefly; each one trims back down before returning.
pub struct DnsCache {
    pub(super) entries: DashMap<CacheKey, CachedRecord, FxBuildHasher>,
    max_entries: usize,
    pub(super) metrics: CacheMetrics,
}

impl DnsCache {
    pub fn new(max_entries: usize) -> Self {
        info!(max_entries, "Initializing DNS response cache");

        Self {
            entries: DashMap::with_capacity_and_hasher(
                max_entries.min(MAX_PREALLOCATED_ENTRIES),
                FxBuildHasher::default(),
            ),
            max_entries,
            metrics: CacheMetrics::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Stored response for `query`, if present and unexpired.
    pub fn get(&self, query: &DnsQuery) -> Option<Bytes> {
        let key = CacheKey::from(query);
        let now = Instant::now();

        let expired = match self.entries.get(&key) {
            Some(entry) if !entry.is_expired_at(now) => {
                self.metrics.hits.fetch_add(1, AtomicOrdering::Relaxed);
                return Some(entry.wire.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.lazy_remove(&key, now);
        }

        self.metrics.misses.fetch_add(1, AtomicOrdering::Relaxed);
        None
    }

    /// Store `wire` for `query` for `ttl` seconds. A zero TTL is never
    /// retrievable, so it is not stored.
    pub fn insert(&self, query: &DnsQuery, wire: Bytes, ttl: u32) {
        if ttl == 0 {
            debug!(domain = %query.domain, "Skipping cache insert for zero TTL");
            return;
        }

        let key = CacheKey::from(query);

        if self.entries.len() >= self.max_entries && !self.entries.contains_key(&key) {
            self.make_room(&key);
        }

        let is_new = self
            .entries
            .insert(key.clone(), CachedRecord::new(wire, ttl))
            .is_none();
        if is_new {
            // Another insert may have filled the slot freed above.
            while self.entries.len() > self.max_entries && self.evict_random_entry(&key) {}
        }

        self.metrics
            .insertions
            .fetch_add(1, AtomicOrdering::Relaxed);

        debug!(
            domain = %query.domain,
            record_type = %query.record_type,
            ttl,
            cache_size = self.entries.len(),
            "Inserted into cache"
        );
    }

    /// Remaining lifetime of the entry for `query`, in whole seconds.
    pub fn get_ttl(&self, query: &DnsQuery) -> Option<u32> {
        let now = Instant::now();
        self.entries
            .get(&CacheKey::from(query))
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.expires_at.duration_since(now).as_secs() as u32)
    }

    pub fn metrics(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn clear(&self) {
        self.entries.clear();
        self.metrics.reset();
        info!("Cache cleared");
    }

    /// Sweep expired entries first; evict one at random if still full.
    fn make_room(&self, keep: &CacheKey) {
        self.compact();

        if self.entries.len() >= self.max_entries {
            self.evict_random_entry(keep);
        }
    }

    /// Remove one random entry other than `keep`.
    ///
    /// Returns `false` only when there is nothing else to evict. Losing a race
    /// for the chosen victim still returns `true` so callers re-check the size.
    fn evict_random_entry(&self, keep: &CacheKey) -> bool {
        let candidates = self
            .entries
            .len()
            .saturating_sub(usize::from(self.entries.contains_key(keep)));
        if candidates == 0 {
            return false;
        }

        let random_idx = fastrand::usize(..candidates);
        let victim = self
            .entries
            .iter()
            .filter(|entry| entry.key() != keep)
            .nth(random_idx)
            .map(|entry| entry.key().clone());

        if let Some(key) = victim {
            if self.entries.remove(&key).is_some() {
                self.metrics.evictions.fetch_add(1, AtomicOrdering::Relaxed);
            }
        }

        true
    }

    fn lazy_remove(&self, key: &CacheKey, now: Instant) {
        if self
            .entries
            .remove_if(key, |_, record| record.is_expired_at(now))
            .is_some()
        {
            self.metrics
                .lazy_deletions
                .fetch_add(1, AtomicOrdering::Relaxed);
        }
    }
}

impl ResponseCache for DnsCache {
    fn get(&self, query: &DnsQuery) -> Option<Bytes> {
        DnsCache::get(self, query)
    }

    fn put(&self, query: &DnsQuery, response: &UpstreamResponse) {
        if !response.has_answers() {
            return;
        }

        if let Some(ttl) = response.min_ttl {
            self.insert(query, response.wire.clone(), ttl);
        }
    }
}
