use dns_blocker_domain::{DnsQuery, RecordType};
use std::sync::Arc;

/// Cache key. The name keeps the exact form of the question, so lookups are
/// case-sensitive and dot-terminated.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl CacheKey {
    #[inline]
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            domain: domain.into(),
            record_type,
        }
    }
}

impl From<&DnsQuery> for CacheKey {
    #[inline]
    fn from(query: &DnsQuery) -> Self {
        Self {
            domain: Arc::clone(&query.domain),
            record_type: query.record_type,
        }
    }
}
