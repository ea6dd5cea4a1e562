use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use async_trait::async_trait;

use launchpad_common::ports::HostResolver;

/// Resolves through the operating system (`getaddrinfo`), which covers
/// `.local` names wherever an mDNS-aware resolver is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHostResolver;

#[async_trait]
impl HostResolver for SystemHostResolver {
    async fn lookup(&self, host: &str) -> anyhow::Result<Vec<IpAddr>> {
        let host: &str = host.trim_end_matches('.');
        let addrs: Vec<IpAddr> = tokio::net::lookup_host((host, 0))
            .await
            .with_context(|| format!("failed to resolve {host}"))?
            .map(|addr: SocketAddr| addr.ip())
            .collect();

        if addrs.is_empty() {
            anyhow::bail!("{host} resolved to no addresses");
        }
        Ok(addrs)
    }
}
