//! Proxy reachability probes.

use super::ProxyEndpoint;

use async_trait::async_trait;
use std::io;
use std::time::Duration;
use tokio::net::TcpStream;

/// A reachability test against one proxy candidate.
#[async_trait]
pub trait ProxyProbe: Send + Sync {
    /// Probes `endpoint` once. The probe must give up after `timeout`.
    async fn probe(&self, endpoint: &ProxyEndpoint, timeout: Duration) -> io::Result<()>;
}

/// Probes a proxy by opening a TCP connection to it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProbe;

#[async_trait]
impl ProxyProbe for TcpProbe {
    async fn probe(&self, endpoint: &ProxyEndpoint, timeout: Duration) -> io::Result<()> {
        let connect = TcpStream::connect((endpoint.address.as_str(), endpoint.port));
        match tokio::time::timeout(timeout, connect).await {
            Ok(stream) => stream.map(|_| ()),
            Err(_) => Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("no answer from {} after {:?}", endpoint, timeout),
            )),
        }
    }
}
