use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;

#[async_trait]
pub trait PortProber: Send + Sync {
    /// True when a TCP connect to `addr:port` completes within `timeout`.
    async fn is_open(&self, addr: IpAddr, port: u16, timeout: Duration) -> bool;
}
