use super::storage::DnsCache;
use std::sync::atomic::Ordering as AtomicOrdering;
use std::time::Instant;
use tracing::debug;

/// Extension methods for DnsCache compaction
impl DnsCache {
    /// Remove every expired entry. Returns the number removed.
    pub fn compact(&self) -> usize {
        let now = Instant::now();
        let mut removed = 0;

        self.entries.retain(|_key, record| {
            if record.is_expired_at(now) {
                removed += 1;
                false
            } else {
                true
            }
        });

        if removed > 0 {
            self.metrics
                .compactions
                .fetch_add(1, AtomicOrdering::Relaxed);

            debug!(
                removed,
                cache_size = self.entries.len(),
                "Cache compaction completed"
            );
        }

        removed
    }
}
