use crate::di::DnsServices;
use anyhow::Context;
use dns_blocker_application::services::QueryStats;
use dns_blocker_domain::Config;
use dns_blocker_infrastructure::dns::{CacheCompactor, DnsCache, TcpServer, UdpServer};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::info;

const STATS_INTERVAL: Duration = Duration::from_secs(60);

/// Serve UDP and TCP on the configured address until Ctrl+C.
///
/// Only binding is fatal; the listeners recover from receive errors.
pub async fn start_dns_server(config: &Config, services: DnsServices) -> anyhow::Result<()> {
    let socket_addr = config.listen_socket_addr()?;

    info!(bind_address = %socket_addr, "Starting DNS server");

    let udp = UdpServer::bind(socket_addr, Arc::clone(&services.handler))
        .await
        .with_context(|| format!("failed to bind UDP {socket_addr}"))?;
    let tcp = TcpServer::bind(socket_addr, Arc::clone(&services.handler))
        .await
        .with_context(|| format!("failed to bind TCP {socket_addr}"))?;

    let compactor = CacheCompactor::new(
        Arc::clone(&services.cache),
        Duration::from_secs(config.cache.compaction_interval_secs),
    )
    .start();
    let reporter = spawn_stats_reporter(services.use_case.stats(), Arc::clone(&services.cache));

    info!("DNS server ready to accept queries");

    let result = tokio::select! {
        () = udp.run() => Ok(()),
        () = tcp.run() => Ok(()),
        result = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            result.context("failed to listen for Ctrl+C")
        }
    };

    compactor.abort();
    reporter.abort();

    result
}

/// Periodically log query outcomes and cache effectiveness.
fn spawn_stats_reporter(stats: Arc<QueryStats>, cache: Arc<DnsCache>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(STATS_INTERVAL).await;

            let queries = stats.snapshot_and_reset();
            if queries.total() == 0 {
                continue;
            }

            let cache_metrics = cache.metrics();
            info!(
                total = queries.total(),
                local = queries.local,
                blocked = queries.blocked,
                cached = queries.cached,
                forwarded = queries.forwarded,
                failed = queries.failed,
                cache_size = cache.len(),
                cache_capacity = cache.max_entries(),
                cache_hit_rate = cache_metrics.hit_rate(),
                "Query statistics"
            );
        }
    })
}
