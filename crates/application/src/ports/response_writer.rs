use async_trait::async_trait;
use dns_blocker_domain::DomainError;

/// Transport-side sink for the single response of a query.
#[async_trait]
pub trait ResponseWriter: Send {
    async fn write(&mut self, wire: &[u8]) -> Result<(), DomainError>;
}
