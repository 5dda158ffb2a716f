use dns_blocker_domain::{Blocklist, ConfigError};
use std::fs::File;
use std::io::BufReader;
use tracing::info;

/// Reads the blocklist file once at startup.
pub struct BlocklistLoader;

impl BlocklistLoader {
    /// Load a newline-delimited blocklist from `path`.
    ///
    /// Open and read failures (including one in the middle of the scan) are
    /// reported as [`ConfigError::Blocklist`] naming the path.
    pub fn load(path: &str) -> Result<Blocklist, ConfigError> {
        let file = File::open(path).map_err(|e| ConfigError::Blocklist {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        let blocklist =
            Blocklist::from_reader(BufReader::new(file)).map_err(|e| ConfigError::Blocklist {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        info!(path, domains = blocklist.len(), "Blocklist loaded");

        Ok(blocklist)
    }
}
