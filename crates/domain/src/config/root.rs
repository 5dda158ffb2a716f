use super::{CacheConfig, ConfigError, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::Path;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "dns-blocker.toml";

const ENV_LISTEN_ADDRESS: &str = "DNS_BLOCKER_LISTEN_ADDRESS";
const ENV_UPSTREAM_SERVER: &str = "DNS_BLOCKER_UPSTREAM_SERVER";
const ENV_BLOCKLIST_PATH: &str = "DNS_BLOCKER_BLOCKLIST_PATH";
const ENV_LOG_LEVEL: &str = "DNS_BLOCKER_LOG_LEVEL";

/// Main configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// UDP and TCP listen address (default: "127.0.0.1:5353")
    #[serde(default = "default_listen_address")]
    pub listen_address: String,

    /// DoH endpoint receiving forwarded queries
    #[serde(default = "default_upstream_server")]
    pub upstream_server: String,

    /// Newline-delimited list of blocked domains
    #[serde(default = "default_blocklist_path")]
    pub blocklist_path: String,

    /// Domain → IP literal overrides
    #[serde(default)]
    pub custom_records: BTreeMap<String, String>,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub listen_address: Option<String>,
    pub upstream_server: Option<String>,
    pub blocklist_path: Option<String>,
    pub log_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_address: default_listen_address(),
            upstream_server: default_upstream_server(),
            blocklist_path: default_blocklist_path(),
            custom_records: BTreeMap::new(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration: file, then environment, then CLI overrides.
    ///
    /// An explicit `config_path` must exist. Without one, `dns-blocker.toml`
    /// is read if present, otherwise defaults are used.
    pub fn load(
        config_path: Option<&str>,
        cli_overrides: CliOverrides,
    ) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.apply_cli_overrides(cli_overrides);

        Ok(config)
    }

    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_string(),
            message: e.to_string(),
        })?;

        Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_string(),
                message,
            },
            other => other,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "<inline>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `DNS_BLOCKER_*` variables looked up through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_LISTEN_ADDRESS) {
            self.listen_address = value;
        }
        if let Some(value) = lookup(ENV_UPSTREAM_SERVER) {
            self.upstream_server = value;
        }
        if let Some(value) = lookup(ENV_BLOCKLIST_PATH) {
            self.blocklist_path = value;
        }
        if let Some(value) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = value;
        }
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(value) = overrides.listen_address {
            self.listen_address = value;
        }
        if let Some(value) = overrides.upstream_server {
            self.upstream_server = value;
        }
        if let Some(value) = overrides.blocklist_path {
            self.blocklist_path = value;
        }
        if let Some(value) = overrides.log_level {
            self.logging.level = value;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.listen_socket_addr()?;

        if !self.upstream_server.starts_with("https://")
            && !self.upstream_server.starts_with("http://")
        {
            return Err(ConfigError::Validation(format!(
                "upstream_server must be an http(s) URL, got '{}'",
                self.upstream_server
            )));
        }

        if self.blocklist_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "blocklist_path cannot be empty".to_string(),
            ));
        }

        if self.cache.max_entries == 0 {
            return Err(ConfigError::Validation(
                "cache.max_entries must be greater than zero".to_string(),
            ));
        }

        if self.cache.compaction_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "cache.compaction_interval_secs must be greater than zero".to_string(),
            ));
        }

        if !self.logging.is_valid_level() {
            return Err(ConfigError::Validation(format!(
                "unknown log level '{}'",
                self.logging.level
            )));
        }

        Ok(())
    }

    pub fn listen_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen_address.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "listen_address '{}' is not a valid socket address",
                self.listen_address
            ))
        })
    }
}

fn default_listen_address() -> String {
    "127.0.0.1:5353".to_string()
}

fn default_upstream_server() -> String {
    "https://cloudflare-dns.com/dns-query".to_string()
}

fn default_blocklist_path() -> String {
    "blocklist.txt".to_string()
}
