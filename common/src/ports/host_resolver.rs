use std::net::IpAddr;

use async_trait::async_trait;

/// Turns an advertised hostname into addresses.
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn lookup(&self, host: &str) -> anyhow::Result<Vec<IpAddr>>;
}
