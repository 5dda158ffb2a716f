use super::UpstreamResponse;
use bytes::Bytes;
use dns_blocker_domain::DnsQuery;

/// Port for the shared response cache.
///
/// `get` is a shared read and never returns an expired entry. `put` derives
/// the lifetime from the minimum answer TTL and ignores responses without
/// answers.
pub trait ResponseCache: Send + Sync {
    fn get(&self, query: &DnsQuery) -> Option<Bytes>;

    fn put(&self, query: &DnsQuery, response: &UpstreamResponse);
}
