// Response cache: DashMap store keyed by (name, type) holding upstream wire bytes

pub mod compaction;
pub mod key;
pub mod metrics;
pub mod record;
pub mod storage;

pub use key::CacheKey;
pub use metrics::{CacheMetrics, CacheMetricsSnapshot};
pub use record::CachedRecord;
pub use storage::DnsCache;
