use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::redirect::Policy;
use tracing::trace;

use launchpad_common::error::ProbeError;
use launchpad_common::ports::HttpProber;

/// `HEAD` requests through `reqwest`. Redirects are reported, not followed.
#[derive(Debug, Clone)]
pub struct ReqwestProber {
    client: reqwest::Client,
}

impl ReqwestProber {
    pub fn new(accept_invalid_certs: bool) -> anyhow::Result<Self> {
        let client: reqwest::Client = reqwest::Client::builder()
            .redirect(Policy::none())
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpProber for ReqwestProber {
    async fn probe(&self, url: &str, timeout: Duration) -> Result<u16, ProbeError> {
        let request = self.client.head(url).timeout(timeout).send();

        // The outer timeout also bounds DNS and connection setup.
        match tokio::time::timeout(timeout, request).await {
            Ok(Ok(response)) => Ok(response.status().as_u16()),
            Ok(Err(e)) if e.is_timeout() => Err(ProbeError::Timeout),
            Ok(Err(e)) => {
                trace!("HEAD {url} failed: {e:?}");
                Err(ProbeError::Transport(describe(&e)))
            }
            Err(_elapsed) => Err(ProbeError::Timeout),
        }
    }
}

/// Innermost cause of a transport error, which is the readable part.
fn describe(err: &reqwest::Error) -> String {
    let mut source: &dyn std::error::Error = err;
    while let Some(next) = source.source() {
        source = next;
    }
    source.to_string()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
