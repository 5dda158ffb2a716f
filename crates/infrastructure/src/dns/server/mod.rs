//! UDP and TCP front ends for the resolution pipeline.
//!
//! Both transports hand raw messages to [`DnsServerHandler`], which decodes
//! them and writes exactly one response through a transport-specific
//! [`ResponseWriter`](dns_blocker_application::ports::ResponseWriter).

pub mod handler;
pub mod tcp;
pub mod udp;

pub use handler::DnsServerHandler;
pub use tcp::{TcpResponseWriter, TcpServer};
pub use udp::{UdpResponseWriter, UdpServer};

use std::io;
use std::time::Duration;
use tracing::warn;

/// Pause after a listener error that is not tied to a single peer.
pub const LISTENER_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// How long a listener waits before polling again after `error`.
///
/// Per-peer failures are retried at once. Anything else, such as running out
/// of file descriptors, gets [`LISTENER_ERROR_BACKOFF`] so the loop does not spin.
pub fn listener_error_backoff(error: &io::Error) -> Option<Duration> {
    match error.kind() {
        io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::Interrupted
        | io::ErrorKind::WouldBlock => None,
        _ => Some(LISTENER_ERROR_BACKOFF),
    }
}

/// Log a receive or accept failure and wait out its backoff.
async fn recover_from_listener_error(protocol: &'static str, error: &io::Error) {
    let backoff = listener_error_backoff(error);
    warn!(
        protocol,
        error = %error,
        backoff_ms = backoff.map_or(0, |pause| pause.as_millis() as u64),
        "Listener error, continuing"
    );

    if let Some(pause) = backoff {
        tokio::time::sleep(pause).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peer_errors_are_retried_immediately() {
        for kind in [
            io::ErrorKind::ConnectionAborted,
            io::ErrorKind::ConnectionReset,
            io::ErrorKind::ConnectionRefused,
            io::ErrorKind::Interrupted,
        ] {
            assert_eq!(listener_error_backoff(&io::Error::from(kind)), None, "{kind:?}");
        }
    }

    #[test]
    fn test_resource_exhaustion_backs_off() {
        // EMFILE
        let too_many_files = io::Error::from_raw_os_error(24);
        assert_eq!(
            listener_error_backoff(&too_many_files),
            Some(LISTENER_ERROR_BACKOFF)
        );
        assert_eq!(
            listener_error_backoff(&io::Error::from(io::ErrorKind::OutOfMemory)),
            Some(LISTENER_ERROR_BACKOFF)
        );
    }

    #[tokio::test]
    async fn test_recovery_returns_after_backoff() {
        let started = tokio::time::Instant::now();
        recover_from_listener_error("TCP", &io::Error::from_raw_os_error(24)).await;
        assert!(started.elapsed() >= LISTENER_ERROR_BACKOFF);
    }
}
