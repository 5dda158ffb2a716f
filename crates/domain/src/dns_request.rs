use super::DnsQuery;
use bytes::Bytes;

/// The `IN` (Internet) question class.
pub const CLASS_IN: u16 = 1;

/// An incoming query after decoding.
///
/// Carries the first question only, the header bits a reply must echo, and
/// the received wire bytes so the query can be forwarded unchanged.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub id: u16,
    /// Question name exactly as received (dot-terminated, case preserved).
    pub query: DnsQuery,
    /// Question class as received, echoed back in every reply.
    pub query_class: u16,
    pub recursion_desired: bool,
    pub checking_disabled: bool,
    pub wire: Bytes,
}

impl DnsRequest {
    pub fn new(id: u16, query: DnsQuery, wire: Bytes) -> Self {
        Self {
            id,
            query,
            query_class: CLASS_IN,
            recursion_desired: true,
            checking_disabled: false,
            wire,
        }
    }
}
