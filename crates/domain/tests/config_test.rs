use dns_blocker_domain::{CliOverrides, Config, ConfigError};
use std::collections::HashMap;

const FULL_CONFIG: &str = r#"
listen_address = "0.0.0.0:53"
upstream_server = "https://dns.google/dns-query"
blocklist_path = "/etc/dns-blocker/blocklist.txt"

[custom_records]
"home.local" = "10.0.0.5"
"nas.lan." = "192.168.1.20"

[cache]
max_entries = 500
compaction_interval_secs = 30

[logging]
level = "debug"
"#;

#[test]
fn test_defaults_are_valid() {
    let config = Config::default();

    assert_eq!(config.listen_address, "127.0.0.1:5353");
    assert!(config.upstream_server.starts_with("https://"));
    assert_eq!(config.blocklist_path, "blocklist.txt");
    assert!(config.custom_records.is_empty());
    assert_eq!(config.cache.max_entries, 10_000);
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_parse_full_file() {
    let config = Config::from_toml(FULL_CONFIG).unwrap();

    assert_eq!(config.listen_address, "0.0.0.0:53");
    assert_eq!(config.upstream_server, "https://dns.google/dns-query");
    assert_eq!(config.blocklist_path, "/etc/dns-blocker/blocklist.txt");
    assert_eq!(config.custom_records.len(), 2);
    assert_eq!(config.custom_records["home.local"], "10.0.0.5");
    assert_eq!(config.cache.max_entries, 500);
    assert_eq!(config.cache.compaction_interval_secs, 30);
    assert_eq!(config.logging.level, "debug");
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_file_fills_defaults() {
    let config = Config::from_toml("upstream_server = \"https://example.net/dns-query\"").unwrap();

    assert_eq!(config.upstream_server, "https://example.net/dns-query");
    assert_eq!(config.listen_address, "127.0.0.1:5353");
    assert_eq!(config.cache.compaction_interval_secs, 60);
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let result = Config::from_toml("listen_address = ");
    assert!(matches!(result, Err(ConfigError::Parse { .. })));
}

#[test]
fn test_missing_explicit_file_is_read_error() {
    let result = Config::load(
        Some("/nonexistent/dns-blocker.toml"),
        CliOverrides::default(),
    );
    assert!(matches!(result, Err(ConfigError::FileRead { .. })));
}

#[test]
fn test_env_overrides_apply() {
    let env: HashMap<&str, &str> = [
        ("DNS_BLOCKER_UPSTREAM_SERVER", "https://env.example/dns-query"),
        ("DNS_BLOCKER_LOG_LEVEL", "warn"),
    ]
    .into_iter()
    .collect();

    let mut config = Config::default();
    config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

    assert_eq!(config.upstream_server, "https://env.example/dns-query");
    assert_eq!(config.logging.level, "warn");
    assert_eq!(config.listen_address, "127.0.0.1:5353");
}

#[test]
fn test_cli_overrides_win_over_env() {
    let mut config = Config::default();
    config.apply_env_overrides(|key| {
        (key == "DNS_BLOCKER_LISTEN_ADDRESS").then(|| "10.0.0.1:53".to_string())
    });
    config.apply_cli_overrides(CliOverrides {
        listen_address: Some("127.0.0.1:5300".to_string()),
        blocklist_path: Some("custom.txt".to_string()),
        ..Default::default()
    });

    assert_eq!(config.listen_address, "127.0.0.1:5300");
    assert_eq!(config.blocklist_path, "custom.txt");
}

#[test]
fn test_validate_rejects_bad_listen_address() {
    let config = Config {
        listen_address: "not-an-address".to_string(),
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validate_rejects_non_http_upstream() {
    let config = Config {
        upstream_server: "8.8.8.8:53".to_string(),
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validate_rejects_zero_cache_capacity() {
    let mut config = Config::default();
    config.cache.max_entries = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_unknown_log_level() {
    let mut config = Config::default();
    config.logging.level = "verbose".to_string();
    assert!(config.validate().is_err());

    config.logging.level = "DEBUG".to_string();
    assert!(config.validate().is_ok());
}
