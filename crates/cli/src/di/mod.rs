use dns_blocker_application::ports::DnsCodec;
use dns_blocker_application::use_cases::ResolveQueryUseCase;
use dns_blocker_domain::{Config, CustomRecordTable};
use dns_blocker_infrastructure::dns::{
    BlocklistLoader, DnsCache, DnsServerHandler, DohForwarder, HickoryCodec,
};
use std::sync::Arc;
use tracing::info;

/// Everything the servers need, wired once at startup.
pub struct DnsServices {
    pub cache: Arc<DnsCache>,
    pub use_case: Arc<ResolveQueryUseCase>,
    pub handler: Arc<DnsServerHandler>,
}

impl DnsServices {
    pub fn build(config: &Config) -> anyhow::Result<Self> {
        let blocklist = Arc::new(BlocklistLoader::load(&config.blocklist_path)?);

        let custom_records = Arc::new(CustomRecordTable::build(&config.custom_records)?);
        info!(records = custom_records.len(), "Custom records loaded");

        let cache = Arc::new(DnsCache::new(config.cache.max_entries));
        let forwarder = Arc::new(DohForwarder::new(&config.upstream_server)?);
        info!(upstream = forwarder.url(), "DoH upstream configured");
        let codec: Arc<dyn DnsCodec> = Arc::new(HickoryCodec::new());

        let use_case = Arc::new(ResolveQueryUseCase::new(
            custom_records,
            blocklist,
            cache.clone(),
            forwarder,
            Arc::clone(&codec),
        ));
        let handler = Arc::new(DnsServerHandler::new(Arc::clone(&use_case), codec));

        Ok(Self {
            cache,
            use_case,
            handler,
        })
    }
}
