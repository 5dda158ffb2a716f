use crate::dns::forwarding::ResponseParser;
use async_trait::async_trait;
use dns_blocker_application::ports::{UpstreamForwarder, UpstreamResponse};
use dns_blocker_domain::{DnsRequest, DomainError};
use tracing::debug;

/// Expected content type for DNS-over-HTTPS messages (RFC 8484 §4.2.1)
const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// DNS-over-HTTPS forwarder (RFC 8484)
///
/// Sends each query once, as received, in a POST body. Timeouts and
/// connection pooling are whatever the `reqwest` client provides.
pub struct DohForwarder {
    url: String,
    client: reqwest::Client,
}

impl DohForwarder {
    pub fn new(url: impl Into<String>) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|e| {
                DomainError::UpstreamTransport(format!("Failed to build HTTPS client: {}", e))
            })?;

        Ok(Self::with_client(url, client))
    }

    /// Use a preconfigured client (custom TLS roots, proxy settings).
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl UpstreamForwarder for DohForwarder {
    async fn forward(&self, request: &DnsRequest) -> Result<UpstreamResponse, DomainError> {
        debug!(
            url = %self.url,
            message_len = request.wire.len(),
            "Sending DoH query"
        );

        // POST with application/dns-message (RFC 8484 §4.1)
        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)
            .header(reqwest::header::ACCEPT, DNS_MESSAGE_CONTENT_TYPE)
            .body(request.wire.clone())
            .send()
            .await
            .map_err(|e| {
                DomainError::UpstreamTransport(format!("DoH request to {} failed: {}", self.url, e))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::UpstreamStatus {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let response_bytes = response.bytes().await.map_err(|e| {
            DomainError::UpstreamTransport(format!(
                "Failed to read DoH response from {}: {}",
                self.url, e
            ))
        })?;

        debug!(
            url = %self.url,
            response_len = response_bytes.len(),
            "DoH response received"
        );

        ResponseParser::parse_bytes(response_bytes)
    }
}
