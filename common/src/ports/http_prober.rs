use std::time::Duration;

use async_trait::async_trait;

use crate::error::ProbeError;

/// Existence check against a URL without transferring a body.
#[async_trait]
pub trait HttpProber: Send + Sync {
    /// Returns the raw status code. Redirects are not followed.
    async fn probe(&self, url: &str, timeout: Duration) -> Result<u16, ProbeError>;
}
