//! Query resolution pipeline.
//!
//! Every query walks the same precedence chain and stops at the first match:
//! 1. Custom records (local overrides)
//! 2. Blocklist (NXDOMAIN)
//! 3. Response cache
//! 4. Upstream DoH forward (SERVFAIL on failure)

use crate::ports::{DnsCodec, ResponseCache, ResponseWriter, UpstreamForwarder};
use crate::services::QueryStats;
use dns_blocker_domain::domain_name::strip_root;
use dns_blocker_domain::{
    Blocklist, CustomRecordTable, DnsReply, DnsRequest, DomainError, RecordType,
};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, error, info};

pub struct ResolveQueryUseCase {
    custom_records: Arc<CustomRecordTable>,
    blocklist: Arc<Blocklist>,
    cache: Arc<dyn ResponseCache>,
    forwarder: Arc<dyn UpstreamForwarder>,
    codec: Arc<dyn DnsCodec>,
    stats: Arc<QueryStats>,
}

impl ResolveQueryUseCase {
    pub fn new(
        custom_records: Arc<CustomRecordTable>,
        blocklist: Arc<Blocklist>,
        cache: Arc<dyn ResponseCache>,
        forwarder: Arc<dyn UpstreamForwarder>,
        codec: Arc<dyn DnsCodec>,
    ) -> Self {
        Self {
            custom_records,
            blocklist,
            cache,
            forwarder,
            codec,
            stats: Arc::new(QueryStats::new()),
        }
    }

    pub fn stats(&self) -> Arc<QueryStats> {
        Arc::clone(&self.stats)
    }

    /// Resolve `request` and write exactly one response to `writer`.
    pub async fn handle(
        &self,
        request: &DnsRequest,
        writer: &mut dyn ResponseWriter,
    ) -> Result<(), DomainError> {
        let reply = self.resolve(request).await;

        let wire = match self.codec.encode_reply(request, &reply) {
            Ok(wire) => wire,
            Err(e) => {
                error!(
                    domain = %strip_root(&request.query.domain),
                    reply = reply.kind(),
                    error = %e,
                    "Failed to encode reply, answering SERVFAIL"
                );
                self.codec
                    .encode_reply(request, &DnsReply::ServerFailure)?
            }
        };

        writer.write(&wire).await
    }

    /// Decide the reply for `request` without encoding it.
    pub async fn resolve(&self, request: &DnsRequest) -> DnsReply {
        let reply = self.resolve_inner(request).await;
        self.stats.record(&reply);
        reply
    }

    async fn resolve_inner(&self, request: &DnsRequest) -> DnsReply {
        let query = &request.query;
        let domain = strip_root(&query.domain);

        if let Some(ip) = self.custom_records.lookup(&query.domain) {
            info!(domain, record_type = %query.record_type, "Domain matched a custom record");

            let address = match (query.record_type, ip) {
                (RecordType::A, IpAddr::V4(v4)) => Some(v4),
                _ => None,
            };
            return DnsReply::Local { address };
        }

        if self.blocklist.contains(domain) {
            info!(domain, record_type = %query.record_type, "Domain is on the blocklist");
            return DnsReply::NameError;
        }

        if let Some(cached) = self.cache.get(query) {
            info!(domain, record_type = %query.record_type, "Cache hit: serving response from cache");
            return DnsReply::Cached(cached);
        }

        debug!(domain, record_type = %query.record_type, "Forwarding query to upstream server");

        match self.forwarder.forward(request).await {
            Ok(response) => {
                debug!(
                    domain,
                    rcode = response.rcode,
                    answers = response.answer_count,
                    "Upstream answered"
                );

                if response.has_answers() {
                    self.cache.put(query, &response);
                    info!(
                        domain,
                        ttl = response.min_ttl.unwrap_or_default(),
                        "Response cached"
                    );
                }
                DnsReply::Forwarded(response.wire)
            }
            Err(e) => {
                error!(
                    domain,
                    record_type = %query.record_type,
                    error = %e,
                    "Failed to forward query to DoH upstream server"
                );
                DnsReply::ServerFailure
            }
        }
    }
}
