//! dns-blocker domain layer
pub mod blocklist;
pub mod config;
pub mod custom_records;
pub mod dns_query;
pub mod dns_record;
pub mod dns_reply;
pub mod dns_request;
pub mod domain_name;
pub mod errors;

pub use blocklist::Blocklist;
pub use config::{CliOverrides, Config, ConfigError};
pub use custom_records::CustomRecordTable;
pub use dns_query::DnsQuery;
pub use dns_record::RecordType;
pub use dns_reply::DnsReply;
pub use dns_request::DnsRequest;
pub use errors::DomainError;
