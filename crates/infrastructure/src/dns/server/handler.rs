use dns_blocker_application::ports::{DnsCodec, ResponseWriter};
use dns_blocker_application::use_cases::ResolveQueryUseCase;
use dns_blocker_domain::DomainError;
use std::sync::Arc;
use tracing::{debug, warn};

pub struct DnsServerHandler {
    use_case: Arc<ResolveQueryUseCase>,
    codec: Arc<dyn DnsCodec>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<ResolveQueryUseCase>, codec: Arc<dyn DnsCodec>) -> Self {
        Self { use_case, codec }
    }

    /// Decode `wire` and answer it through `writer`.
    ///
    /// Undecodable messages get FORMERR when their id can be read and are
    /// dropped otherwise.
    pub async fn handle_wire(
        &self,
        wire: &[u8],
        writer: &mut dyn ResponseWriter,
    ) -> Result<(), DomainError> {
        let request = match self.codec.decode_query(wire) {
            Ok(request) => request,
            Err(e) => {
                return match self.codec.format_error(wire) {
                    Some(reply) => {
                        debug!(error = %e, "Malformed query, answering FORMERR");
                        writer.write(&reply).await
                    }
                    None => {
                        warn!(error = %e, len = wire.len(), "Dropping unreadable message");
                        Ok(())
                    }
                };
            }
        };

        self.use_case.handle(&request, writer).await
    }
}
