use bytes::Bytes;
use std::net::Ipv4Addr;

/// Terminal decision of the resolution pipeline for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsReply {
    /// Name matched a custom record. `address` is set only for `A` queries
    /// bound to an IPv4 address; otherwise the reply has no answers.
    Local { address: Option<Ipv4Addr> },
    /// Blocklisted name (NXDOMAIN).
    NameError,
    /// Upstream could not be reached or returned garbage (SERVFAIL).
    ServerFailure,
    /// Stored upstream response; header must be rebound to the new query.
    Cached(Bytes),
    /// Fresh upstream response, sent verbatim.
    Forwarded(Bytes),
}

impl DnsReply {
    pub fn kind(&self) -> &'static str {
        match self {
            DnsReply::Local { .. } => "local",
            DnsReply::NameError => "blocked",
            DnsReply::ServerFailure => "servfail",
            DnsReply::Cached(_) => "cached",
            DnsReply::Forwarded(_) => "forwarded",
        }
    }
}
