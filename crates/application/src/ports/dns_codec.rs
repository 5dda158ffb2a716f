use dns_blocker_domain::{DnsReply, DnsRequest, DomainError};

/// Wire-format boundary. The pipeline only sees decoded requests and
/// `DnsReply` decisions; any DNS message library can sit behind this.
pub trait DnsCodec: Send + Sync {
    /// Decode a raw query. Only the first question is kept.
    fn decode_query(&self, wire: &[u8]) -> Result<DnsRequest, DomainError>;

    /// Encode the reply for `request`. The result is always marked as a
    /// response correlated to the request's transaction id.
    fn encode_reply(&self, request: &DnsRequest, reply: &DnsReply) -> Result<Vec<u8>, DomainError>;

    /// FORMERR for a message that could not be decoded, if its id is readable.
    fn format_error(&self, wire: &[u8]) -> Option<Vec<u8>>;
}
