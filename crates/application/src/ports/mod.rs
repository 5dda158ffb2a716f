pub mod dns_codec;
pub mod response_cache;
pub mod response_writer;
pub mod upstream_forwarder;

pub use dns_codec::DnsCodec;
pub use response_cache::ResponseCache;
pub use response_writer::ResponseWriter;
pub use upstream_forwarder::{UpstreamForwarder, UpstreamResponse};
