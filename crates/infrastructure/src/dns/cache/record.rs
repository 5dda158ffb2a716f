use bytes::Bytes;
use std::time::{Duration, Instant};

/// Stored upstream response with its absolute expiry.
#[derive(Debug, Clone)]
pub struct CachedRecord {
    pub wire: Bytes,
    pub expires_at: Instant,
    pub ttl: u32,
}

impl CachedRecord {
    pub fn new(wire: Bytes, ttl: u32) -> Self {
        Self {
            wire,
            expires_at: Instant::now() + Duration::from_secs(u64::from(ttl)),
            ttl,
        }
    }

    /// Valid strictly before `expires_at`.
    #[inline]
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
