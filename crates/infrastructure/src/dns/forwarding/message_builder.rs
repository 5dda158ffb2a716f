//! DNS Message Builder
//!
//! Constructs wire-format messages with `hickory-proto`: replies synthesized
//! locally, cached responses rebound to a new query, and plain queries.

use super::record_type_map::RecordTypeMapper;
use dns_blocker_domain::{DnsRequest, DomainError, RecordType};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::rdata::A;
use hickory_proto::rr::{DNSClass, Name, RData, Record};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use std::net::Ipv4Addr;

/// TTL given to answers synthesized from custom records.
pub const LOCAL_RECORD_TTL: u32 = 3600;

/// Builds DNS messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Authoritative NOERROR reply to `request`, echoing its question.
    ///
    /// Carries a single `A` answer when `address` is set.
    pub fn local_answer(
        request: &DnsRequest,
        address: Option<Ipv4Addr>,
    ) -> Result<Vec<u8>, DomainError> {
        let mut message = Self::reply_to(request)?;

        if let Some(ip) = address {
            let name = Self::parse_name(&request.query.domain)?;
            message.add_answer(Record::from_rdata(name, LOCAL_RECORD_TTL, RData::A(A(ip))));
        }

        Self::serialize_message(&message)
    }

    /// Authoritative reply with no answers and the given result code.
    pub fn authoritative_error(
        request: &DnsRequest,
        rcode: ResponseCode,
    ) -> Result<Vec<u8>, DomainError> {
        let mut message = Self::reply_to(request)?;
        message.set_response_code(rcode);

        Self::serialize_message(&message)
    }

    /// Rewrite a stored upstream response so it answers `request`.
    ///
    /// Only the transaction fields change (id, opcode, RD/CD and the
    /// question); the result code and every record section are kept.
    pub fn rebind_cached(request: &DnsRequest, cached: &[u8]) -> Result<Vec<u8>, DomainError> {
        let mut message = Message::from_vec(cached)
            .map_err(|e| DomainError::Encode(format!("Cached response is not decodable: {e}")))?;

        message
            .set_id(request.id)
            .set_message_type(MessageType::Response)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(request.recursion_desired)
            .set_checking_disabled(request.checking_disabled);

        message.take_queries();
        message.add_query(Self::question(request)?);

        Self::serialize_message(&message)
    }

    /// FORMERR for a message whose id could be read but nothing else.
    pub fn format_error(id: u16) -> Result<Vec<u8>, DomainError> {
        let mut message = Message::new();
        message
            .set_id(id)
            .set_message_type(MessageType::Response)
            .set_op_code(OpCode::Query)
            .set_response_code(ResponseCode::FormErr);

        Self::serialize_message(&message)
    }

    /// Build a recursive query with a random id.
    pub fn build_query(domain: &str, record_type: &RecordType) -> Result<Vec<u8>, DomainError> {
        let query = Query::query(
            Self::parse_name(domain)?,
            RecordTypeMapper::to_hickory(record_type),
        );

        let mut message = Message::new();
        message
            .set_id(fastrand::u16(..))
            .set_message_type(MessageType::Query)
            .set_op_code(OpCode::Query)
            .set_recursion_desired(true);
        message.add_query(query);

        Self::serialize_message(&message)
    }

    /// Response header for `request`: same id, RD/CD copied, AA set,
    /// question echoed.
    fn reply_to(request: &DnsRequest) -> Result<Message, DomainError> {
        let mut message = Message::new();
        message
            .set_id(request.id)
            .set_message_type(MessageType::Response)
            .set_op_code(OpCode::Query)
            .set_authoritative(true)
            .set_recursion_desired(request.recursion_desired)
            .set_checking_disabled(request.checking_disabled)
            .set_response_code(ResponseCode::NoError);
        message.add_query(Self::question(request)?);

        Ok(message)
    }

    /// The question of `request` as it was received, class included.
    fn question(request: &DnsRequest) -> Result<Query, DomainError> {
        let mut query = Query::query(
            Self::parse_name(&request.query.domain)?,
            RecordTypeMapper::to_hickory(&request.query.record_type),
        );
        query.set_query_class(DNSClass::from(request.query_class));

        Ok(query)
    }

    fn parse_name(domain: &str) -> Result<Name, DomainError> {
        Name::from_ascii(domain).map_err(|e| {
            DomainError::InvalidDomainName(format!("Invalid domain '{}': {}", domain, e))
        })
    }

    /// Serialize a Message to wire format bytes
    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message
            .emit(&mut encoder)
            .map_err(|e| DomainError::Encode(format!("Failed to serialize DNS message: {}", e)))?;

        Ok(buf)
    }
}
