use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::models::share::{ServiceAnnouncement, ShareKind};

/// Multicast service discovery.
#[async_trait]
pub trait ServiceBrowser: Send + Sync {
    /// Queries for `kinds` and pushes every announcement into `tx`.
    ///
    /// May run forever; callers bound it with a timeout and drop the future
    /// to cancel it. Duplicate announcements are expected.
    async fn browse(
        &self,
        kinds: &[ShareKind],
        tx: UnboundedSender<ServiceAnnouncement>,
    ) -> anyhow::Result<()>;
}
