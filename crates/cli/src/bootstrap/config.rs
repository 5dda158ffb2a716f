use dns_blocker_domain::{CliOverrides, Config};
use tracing::info;

/// Load and validate configuration. Nothing is logged here because the
/// subscriber is configured from the result.
pub fn load_config(
    config_path: Option<&str>,
    cli_overrides: CliOverrides,
) -> anyhow::Result<Config> {
    let config = Config::load(config_path, cli_overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn log_config(config_path: Option<&str>, config: &Config) {
    info!(
        config_file = config_path.unwrap_or("default"),
        listen = %config.listen_address,
        upstream = %config.upstream_server,
        blocklist = %config.blocklist_path,
        custom_records = config.custom_records.len(),
        cache_max_entries = config.cache.max_entries,
        "Configuration loaded"
    );
}
