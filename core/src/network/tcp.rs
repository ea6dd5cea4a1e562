use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

use launchpad_common::ports::PortProber;

/// Full TCP handshake with a deadline. The stream is dropped immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpPortProber;

impl TcpPortProber {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PortProber for TcpPortProber {
    async fn is_open(&self, addr: IpAddr, port: u16, probe_timeout: Duration) -> bool {
        handshake_probe(SocketAddr::new(addr, port), probe_timeout).await
    }
}

pub async fn handshake_probe(socket_addr: SocketAddr, probe_timeout: Duration) -> bool {
    match timeout(probe_timeout, TcpStream::connect(socket_addr)).await {
        Ok(Ok(_)) => true,
        Ok(Err(e)) => {
            trace!("{socket_addr} refused: {e}");
            false
        }
        Err(_elapsed) => false,
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn listening_port_is_open() {
        let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port: u16 = listener.local_addr().unwrap().port();

        let open: bool = TcpPortProber::new()
            .is_open(IpAddr::V4(Ipv4Addr::LOCALHOST), port, Duration::from_secs(1))
            .await;
        assert!(open);
    }

    #[tokio::test]
    async fn closed_port_is_not_open() {
        let listener: TcpListener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port: u16 = listener.local_addr().unwrap().port();
        drop(listener);

        let open: bool = TcpPortProber::new()
            .is_open(IpAddr::V4(Ipv4Addr::LOCALHOST), port, Duration::from_secs(1))
            .await;
        assert!(!open);
    }

    #[tokio::test]
    #[ignore]
    async fn unroutable_address_times_out() {
        let ip: IpAddr = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 1));
        let open: bool = TcpPortProber::new()
            .is_open(ip, 445, Duration::from_millis(100))
            .await;
        assert!(!open);
    }
}
