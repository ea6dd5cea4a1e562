use async_trait::async_trait;

use crate::error::LaunchError;
use crate::models::browser::Browser;

/// Platform capability for starting things the user interacts with.
///
/// Everything started here is detached: it is not awaited, reaped or wired
/// to our standard streams, and it outlives the caller.
#[async_trait]
pub trait ProcessSpawner: Send + Sync {
    fn platform(&self) -> &'static str;

    /// Hands `url` to the OS default handler.
    async fn open_url(&self, url: &str) -> Result<(), LaunchError>;

    /// Opens `url` in a specific browser.
    async fn open_url_with(&self, browser: &Browser, url: &str) -> Result<(), LaunchError>;

    /// Opens an interactive terminal window running `command` (argv form).
    async fn open_terminal(&self, command: &[String]) -> Result<(), LaunchError>;

    /// Starts an executable or application bundle.
    async fn launch_app(&self, app_path: &str, args: &[String]) -> Result<(), LaunchError>;
}
