use super::{recover_from_listener_error, DnsServerHandler};
use async_trait::async_trait;
use dns_blocker_application::ports::ResponseWriter;
use dns_blocker_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, info};

/// Largest datagram accepted (EDNS-sized).
pub const MAX_UDP_MESSAGE_SIZE: usize = 4096;

/// Sends the response back to the datagram's source.
pub struct UdpResponseWriter {
    socket: Arc<UdpSocket>,
    peer: SocketAddr,
}

impl UdpResponseWriter {
    pub fn new(socket: Arc<UdpSocket>, peer: SocketAddr) -> Self {
        Self { socket, peer }
    }
}

#[async_trait]
impl ResponseWriter for UdpResponseWriter {
    async fn write(&mut self, wire: &[u8]) -> Result<(), DomainError> {
        self.socket.send_to(wire, self.peer).await?;
        Ok(())
    }
}

pub struct UdpServer {
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
}

impl UdpServer {
    pub async fn bind(addr: SocketAddr, handler: Arc<DnsServerHandler>) -> Result<Self, DomainError> {
        let socket = UdpSocket::bind(addr).await?;
        info!(protocol = "UDP", bind_address = %socket.local_addr()?, "DNS server listening");

        Ok(Self {
            socket: Arc::new(socket),
            handler,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        Ok(self.socket.local_addr()?)
    }

    /// Receive loop; every datagram is handled in its own task.
    ///
    /// Receive errors are logged and never end the loop.
    pub async fn run(self) {
        let mut buf = vec![0u8; MAX_UDP_MESSAGE_SIZE];

        loop {
            let (len, peer) = match self.socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(e) => {
                    recover_from_listener_error("UDP", &e).await;
                    continue;
                }
            };

            let query = buf[..len].to_vec();
            let socket = Arc::clone(&self.socket);
            let handler = Arc::clone(&self.handler);

            tokio::spawn(async move {
                let mut writer = UdpResponseWriter::new(socket, peer);
                if let Err(e) = handler.handle_wire(&query, &mut writer).await {
                    debug!(peer = %peer, error = %e, "UDP query failed");
                }
            });
        }
    }
}
