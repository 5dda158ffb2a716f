use thiserror::Error;

/// Startup configuration errors. All of them are fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {message}")]
    FileRead { path: String, message: String },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("Invalid IP address '{value}' for custom record '{domain}'")]
    InvalidCustomRecord { domain: String, value: String },

    #[error("Could not load blocklist file {path}: {message}")]
    Blocklist { path: String, message: String },
}
