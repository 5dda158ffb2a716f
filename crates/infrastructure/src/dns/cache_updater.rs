use super::cache::DnsCache;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info};

/// Background task that periodically drops expired cache entries.
pub struct CacheCompactor {
    cache: Arc<DnsCache>,
    compaction_interval: Duration,
}

impl CacheCompactor {
    pub fn new(cache: Arc<DnsCache>, compaction_interval: Duration) -> Self {
        Self {
            cache,
            compaction_interval,
        }
    }

    /// Start background compaction task
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(
                interval_secs = self.compaction_interval.as_secs(),
                "Background compaction started"
            );

            loop {
                sleep(self.compaction_interval).await;
                Self::compaction_cycle(&self.cache);
            }
        })
    }

    /// Run one compaction cycle
    fn compaction_cycle(cache: &DnsCache) {
        debug!("Starting background compaction cycle");

        let removed = cache.compact();

        if removed > 0 {
            info!(
                removed,
                cache_size = cache.len(),
                "Background compaction completed"
            );
        } else {
            debug!("No entries to compact");
        }
    }
}
