pub mod block_filter;
pub mod cache;
pub mod cache_updater;
pub mod codec;
pub mod forwarding;
pub mod server;
pub mod transport;

pub use block_filter::BlocklistLoader;
pub use cache::{CacheMetrics, CacheMetricsSnapshot, DnsCache};
pub use cache_updater::CacheCompactor;
pub use codec::HickoryCodec;
pub use server::{DnsServerHandler, TcpServer, UdpServer};
pub use transport::DohForwarder;
