//! Per-outcome query counters.

use dns_blocker_domain::DnsReply;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counters updated once per resolved query.
#[derive(Debug, Default)]
pub struct QueryStats {
    local: AtomicU64,
    blocked: AtomicU64,
    cached: AtomicU64,
    forwarded: AtomicU64,
    failed: AtomicU64,
}

impl QueryStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, reply: &DnsReply) {
        let counter = match reply {
            DnsReply::Local { .. } => &self.local,
            DnsReply::NameError => &self.blocked,
            DnsReply::Cached(_) => &self.cached,
            DnsReply::Forwarded(_) => &self.forwarded,
            DnsReply::ServerFailure => &self.failed,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Read and zero all counters.
    pub fn snapshot_and_reset(&self) -> QueryStatsSnapshot {
        QueryStatsSnapshot {
            local: self.local.swap(0, Ordering::Relaxed),
            blocked: self.blocked.swap(0, Ordering::Relaxed),
            cached: self.cached.swap(0, Ordering::Relaxed),
            forwarded: self.forwarded.swap(0, Ordering::Relaxed),
            failed: self.failed.swap(0, Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryStatsSnapshot {
    pub local: u64,
    pub blocked: u64,
    pub cached: u64,
    pub forwarded: u64,
    pub failed: u64,
}

impl QueryStatsSnapshot {
    pub fn total(&self) -> u64 {
        self.local + self.blocked + self.cached + self.forwarded + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn snapshot_counts_each_outcome_and_resets() {
        let stats = QueryStats::new();
        stats.record(&DnsReply::NameError);
        stats.record(&DnsReply::NameError);
        stats.record(&DnsReply::Cached(Bytes::new()));
        stats.record(&DnsReply::ServerFailure);

        let snapshot = stats.snapshot_and_reset();
        assert_eq!(snapshot.blocked, 2);
        assert_eq!(snapshot.cached, 1);
        assert_eq!(snapshot.failed, 1);
        assert_eq!(snapshot.total(), 4);

        assert_eq!(stats.snapshot_and_reset().total(), 0);
    }
}
