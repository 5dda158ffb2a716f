//! `DnsCodec` backed by `hickory-proto`.

use super::forwarding::{MessageBuilder, RecordTypeMapper};
use bytes::Bytes;
use dns_blocker_application::ports::DnsCodec;
use dns_blocker_domain::domain_name::to_fqdn;
use dns_blocker_domain::{DnsQuery, DnsReply, DnsRequest, DomainError};
use hickory_proto::op::{Message, ResponseCode};

/// Fixed DNS header size; anything shorter has no recoverable id.
const HEADER_LEN: usize = 12;

#[derive(Debug, Default, Clone, Copy)]
pub struct HickoryCodec;

impl HickoryCodec {
    pub fn new() -> Self {
        Self
    }
}

impl DnsCodec for HickoryCodec {
    fn decode_query(&self, wire: &[u8]) -> Result<DnsRequest, DomainError> {
        let message = Message::from_vec(wire)
            .map_err(|e| DomainError::InvalidDnsMessage(format!("Failed to parse query: {e}")))?;

        let question = message
            .queries()
            .first()
            .ok_or_else(|| DomainError::InvalidDnsMessage("Query has no question".to_string()))?;

        let query = DnsQuery::new(
            to_fqdn(&question.name().to_ascii()),
            RecordTypeMapper::from_hickory(question.query_type()),
        );

        Ok(DnsRequest {
            id: message.id(),
            query,
            query_class: u16::from(question.query_class()),
            recursion_desired: message.recursion_desired(),
            checking_disabled: message.checking_disabled(),
            wire: Bytes::copy_from_slice(wire),
        })
    }

    fn encode_reply(&self, request: &DnsRequest, reply: &DnsReply) -> Result<Vec<u8>, DomainError> {
        match reply {
            DnsReply::Local { address } => MessageBuilder::local_answer(request, *address),
            DnsReply::NameError => {
                MessageBuilder::authoritative_error(request, ResponseCode::NXDomain)
            }
            DnsReply::ServerFailure => {
                MessageBuilder::authoritative_error(request, ResponseCode::ServFail)
            }
            DnsReply::Cached(wire) => MessageBuilder::rebind_cached(request, wire),
            DnsReply::Forwarded(wire) => Ok(wire.to_vec()),
        }
    }

    fn format_error(&self, wire: &[u8]) -> Option<Vec<u8>> {
        if wire.len() < HEADER_LEN {
            return None;
        }

        let id = u16::from_be_bytes([wire[0], wire[1]]);
        MessageBuilder::format_error(id).ok()
    }
}
