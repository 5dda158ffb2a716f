//! # dns-blocker
//!
//! Local DNS resolver that blocks listed domains, answers custom records and
//! forwards everything else to a DNS-over-HTTPS upstream.

mod bootstrap;
mod di;
mod server;

use clap::Parser;
use dns_blocker_domain::{CliOverrides, Config};
use tracing::error;

#[derive(Parser)]
#[command(name = "dns-blocker")]
#[command(version)]
#[command(about = "Blocking DNS forwarder with a DNS-over-HTTPS upstream")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// UDP/TCP listen address (e.g. 127.0.0.1:5353)
    #[arg(short, long)]
    listen: Option<String>,

    /// DoH upstream URL
    #[arg(short, long)]
    upstream: Option<String>,

    /// Blocklist file path
    #[arg(short, long)]
    blocklist: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            listen_address: self.listen.clone(),
            upstream_server: self.upstream.clone(),
            blocklist_path: self.blocklist.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let config = match bootstrap::load_config(config_path, cli.overrides()) {
        Ok(config) => config,
        Err(e) => {
            bootstrap::init_logging("error");
            error!("Failed to load configuration: {e:#}");
            std::process::exit(1);
        }
    };

    bootstrap::init_logging(&config.logging.level);
    bootstrap::config::log_config(config_path, &config);

    if let Err(e) = run(config).await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    let services = di::DnsServices::build(&config)?;
    server::start_dns_server(&config, services).await
}
