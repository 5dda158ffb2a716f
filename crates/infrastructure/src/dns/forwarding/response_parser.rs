use bytes::Bytes;
use dns_blocker_application::ports::UpstreamResponse;
use dns_blocker_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use tracing::debug;

pub struct ResponseParser;

impl ResponseParser {
    /// Decode an upstream response, keeping the received bytes untouched.
    pub fn parse_bytes(response_bytes: Bytes) -> Result<UpstreamResponse, DomainError> {
        let message = Message::from_vec(&response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let min_ttl = message.answers().iter().map(|record| record.ttl()).min();

        debug!(
            rcode = ?rcode,
            answers = message.answers().len(),
            min_ttl = ?min_ttl,
            "DNS response parsed"
        );

        Ok(UpstreamResponse {
            answer_count: message.answers().len(),
            min_ttl,
            rcode: Self::rcode_to_status(rcode),
            wire: response_bytes,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
