#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use dns_blocker_application::ports::{
    DnsCodec, ResponseCache, ResponseWriter, UpstreamForwarder, UpstreamResponse,
};
use dns_blocker_domain::{DnsQuery, DnsReply, DnsRequest, DomainError, RecordType};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};
use std::time::{Duration, Instant};

// ============================================================================
// Mock UpstreamForwarder
// ============================================================================

pub struct MockForwarder {
    response: Mutex<Option<UpstreamResponse>>,
    calls: AtomicUsize,
}

impl MockForwarder {
    /// Forwarder that answers every query with `answer_count` records.
    pub fn answering(answer_count: usize, min_ttl: Option<u32>) -> Self {
        Self {
            response: Mutex::new(Some(upstream_response(answer_count, min_ttl))),
            calls: AtomicUsize::new(0),
        }
    }

    /// Forwarder whose transport always fails.
    pub fn failing() -> Self {
        Self {
            response: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamForwarder for MockForwarder {
    async fn forward(&self, _request: &DnsRequest) -> Result<UpstreamResponse, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| DomainError::UpstreamTransport("connection refused".to_string()))
    }
}

pub fn upstream_response(answer_count: usize, min_ttl: Option<u32>) -> UpstreamResponse {
    UpstreamResponse {
        wire: Bytes::from(format!("upstream:{answer_count}")),
        answer_count,
        min_ttl,
        rcode: "NOERROR",
    }
}

// ============================================================================
// In-memory ResponseCache
// ============================================================================

#[derive(Default)]
pub struct InMemoryCache {
    entries: RwLock<HashMap<DnsQuery, (Bytes, Instant)>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}

impl ResponseCache for InMemoryCache {
    fn get(&self, query: &DnsQuery) -> Option<Bytes> {
        let entries = self.entries.read().unwrap();
        entries
            .get(query)
            .filter(|(_, expires_at)| Instant::now() < *expires_at)
            .map(|(wire, _)| wire.clone())
    }

    fn put(&self, query: &DnsQuery, response: &UpstreamResponse) {
        let Some(ttl) = response.min_ttl.filter(|_| response.has_answers()) else {
            return;
        };
        self.entries.write().unwrap().insert(
            query.clone(),
            (
                response.wire.clone(),
                Instant::now() + Duration::from_secs(u64::from(ttl)),
            ),
        );
    }
}

// ============================================================================
// Tagging DnsCodec
// ============================================================================

/// Encodes replies as `<kind>` so tests can read back what was written.
#[derive(Default)]
pub struct TagCodec {
    fail_non_servfail: AtomicBool,
}

impl TagCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every encode except SERVFAIL fail.
    pub fn failing_encoder() -> Self {
        Self {
            fail_non_servfail: AtomicBool::new(true),
        }
    }
}

impl DnsCodec for TagCodec {
    fn decode_query(&self, _wire: &[u8]) -> Result<DnsRequest, DomainError> {
        Err(DomainError::InvalidDnsMessage("not supported".to_string()))
    }

    fn encode_reply(&self, _request: &DnsRequest, reply: &DnsReply) -> Result<Vec<u8>, DomainError> {
        if self.fail_non_servfail.load(Ordering::SeqCst) && *reply != DnsReply::ServerFailure {
            return Err(DomainError::Encode("forced failure".to_string()));
        }
        Ok(reply.kind().as_bytes().to_vec())
    }

    fn format_error(&self, _wire: &[u8]) -> Option<Vec<u8>> {
        None
    }
}

// ============================================================================
// Recording ResponseWriter
// ============================================================================

#[derive(Default)]
pub struct RecordingWriter {
    pub writes: Vec<Vec<u8>>,
}

#[async_trait]
impl ResponseWriter for RecordingWriter {
    async fn write(&mut self, wire: &[u8]) -> Result<(), DomainError> {
        self.writes.push(wire.to_vec());
        Ok(())
    }
}

pub fn request(name: &str, record_type: RecordType) -> DnsRequest {
    DnsRequest::new(0x1234, DnsQuery::new(name, record_type), Bytes::new())
}
