use async_trait::async_trait;
use bytes::Bytes;
use dns_blocker_domain::{DnsRequest, DomainError};

/// Decoded upstream answer.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Wire bytes exactly as received from the upstream.
    pub wire: Bytes,
    pub answer_count: usize,
    /// Minimum TTL across the answer section; `None` when it is empty.
    pub min_ttl: Option<u32>,
    pub rcode: &'static str,
}

impl UpstreamResponse {
    pub fn has_answers(&self) -> bool {
        self.answer_count > 0
    }
}

#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    /// Single best-effort exchange with the upstream; no retry.
    async fn forward(&self, request: &DnsRequest) -> Result<UpstreamResponse, DomainError>;
}
