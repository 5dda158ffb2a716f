use super::{recover_from_listener_error, DnsServerHandler};
use async_trait::async_trait;
use dns_blocker_application::ports::ResponseWriter;
use dns_blocker_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tracing::{debug, info};

/// Idle time allowed between two queries on one connection.
pub const TCP_IDLE_TIMEOUT: Duration = Duration::from_secs(10);

/// Writes one length-prefixed (RFC 1035 §4.2.2) response.
pub struct TcpResponseWriter {
    stream: OwnedWriteHalf,
}

impl TcpResponseWriter {
    pub fn new(stream: OwnedWriteHalf) -> Self {
        Self { stream }
    }
}

#[async_trait]
impl ResponseWriter for TcpResponseWriter {
    async fn write(&mut self, wire: &[u8]) -> Result<(), DomainError> {
        let len = u16::try_from(wire.len()).map_err(|_| {
            DomainError::Encode(format!("Response of {} bytes exceeds TCP frame", wire.len()))
        })?;

        let mut frame = Vec::with_capacity(wire.len() + 2);
        frame.extend_from_slice(&len.to_be_bytes());
        frame.extend_from_slice(wire);

        self.stream.write_all(&frame).await?;
        Ok(())
    }
}

pub struct TcpServer {
    listener: TcpListener,
    handler: Arc<DnsServerHandler>,
}

impl TcpServer {
    pub async fn bind(addr: SocketAddr, handler: Arc<DnsServerHandler>) -> Result<Self, DomainError> {
        let listener = TcpListener::bind(addr).await?;
        info!(protocol = "TCP", bind_address = %listener.local_addr()?, "DNS server listening");

        Ok(Self { listener, handler })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept loop; every connection is served in its own task.
    ///
    /// Accept errors are logged and never end the loop.
    pub async fn run(self) {
        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    recover_from_listener_error("TCP", &e).await;
                    continue;
                }
            };
            let handler = Arc::clone(&self.handler);

            tokio::spawn(async move {
                if let Err(e) = Self::handle_connection(stream, &handler).await {
                    debug!(peer = %peer, error = %e, "TCP connection error");
                }
            });
        }
    }

    /// Serve queries until the peer closes, goes idle, or a write fails.
    async fn handle_connection(
        stream: TcpStream,
        handler: &DnsServerHandler,
    ) -> Result<(), DomainError> {
        let (mut reader, writer) = stream.into_split();
        let mut writer = TcpResponseWriter::new(writer);

        while let Some(message) = Self::read_frame(&mut reader).await {
            handler.handle_wire(&message, &mut writer).await?;
        }

        Ok(())
    }

    async fn read_frame(reader: &mut OwnedReadHalf) -> Option<Vec<u8>> {
        let mut len_buf = [0u8; 2];
        match timeout(TCP_IDLE_TIMEOUT, reader.read_exact(&mut len_buf)).await {
            Ok(Ok(_)) => {}
            Ok(Err(_)) | Err(_) => return None,
        }

        let mut message = vec![0u8; usize::from(u16::from_be_bytes(len_buf))];
        match timeout(TCP_IDLE_TIMEOUT, reader.read_exact(&mut message)).await {
            Ok(Ok(_)) => Some(message),
            Ok(Err(_)) | Err(_) => None,
        }
    }
}
