//! Locally defined name → address overrides.

use crate::config::ConfigError;
use crate::domain_name::to_fqdn;
use std::collections::HashMap;
use std::net::IpAddr;

/// Immutable table of custom records, keyed by fully qualified name.
#[derive(Debug, Clone, Default)]
pub struct CustomRecordTable {
    records: HashMap<String, IpAddr>,
}

impl CustomRecordTable {
    /// Build the table from configuration entries (`domain -> IP literal`).
    ///
    /// Names without a trailing dot are normalized so lookups with the
    /// query's own dot-terminated name succeed. The first malformed address
    /// aborts the build.
    pub fn build<I, K, V>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut records = HashMap::new();

        for (domain, value) in entries {
            let (domain, value) = (domain.as_ref(), value.as_ref());
            let ip: IpAddr =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidCustomRecord {
                        domain: domain.to_string(),
                        value: value.to_string(),
                    })?;

            records.insert(to_fqdn(domain), ip);
        }

        Ok(Self { records })
    }

    /// Exact lookup by dot-terminated name.
    pub fn lookup(&self, name: &str) -> Option<IpAddr> {
        self.records.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
