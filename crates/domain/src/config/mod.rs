//! Configuration module for dns-blocker
//!
//! - `root`: Main configuration, loading and CLI overrides
//! - `cache`: Response cache sizing and compaction
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod cache;
pub mod errors;
pub mod logging;
pub mod root;

pub use cache::CacheConfig;
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config, DEFAULT_CONFIG_FILE};
