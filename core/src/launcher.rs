//! # Launch Dispatcher
//!
//! Turns a [`LaunchableItem`] into the matching side effect: a browser tab,
//! an SSH session in a terminal window, or a detached application.
//!
//! ## Rules
//! 1. Resolution happens before anything is spawned; an item that does not
//!    resolve under the profile fails with [`LaunchError::Resolution`].
//! 2. An unknown browser id falls back to the default handler.
//! 3. Nothing started here is tracked after it has been spawned.

pub mod credentials;
pub mod platform;

use std::sync::Arc;

use tracing::{info, warn};

use launchpad_common::error::LaunchError;
use launchpad_common::models::address::NetworkProfile;
use launchpad_common::models::browser::{Browser, DEFAULT_BROWSER_ID};
use launchpad_common::models::item::{AppItem, BookmarkItem, LaunchableItem, SshItem};
use launchpad_common::ports::{BrowserRegistry, ProcessSpawner};
use launchpad_common::resolve;

use credentials::{CredentialInjectionStrategy, SshCommand};

pub struct LaunchDispatcher {
    spawner: Arc<dyn ProcessSpawner>,
    browsers: Arc<dyn BrowserRegistry>,
    strategies: Vec<Box<dyn CredentialInjectionStrategy>>,
}

/// Outcome of one item in [`LaunchDispatcher::launch_all`].
#[derive(Debug)]
pub struct LaunchOutcome {
    pub item_id: String,
    pub result: Result<(), LaunchError>,
}

impl LaunchDispatcher {
    /// `strategies` are consulted in order when a password is supplied.
    pub fn new(
        spawner: Arc<dyn ProcessSpawner>,
        browsers: Arc<dyn BrowserRegistry>,
        strategies: Vec<Box<dyn CredentialInjectionStrategy>>,
    ) -> Self {
        Self {
            spawner,
            browsers,
            strategies,
        }
    }

    /// Native spawner and the installed credential helpers.
    pub fn native(browsers: Arc<dyn BrowserRegistry>) -> Self {
        Self::new(platform::native(), browsers, credentials::default_strategies())
    }

    pub async fn launch(
        &self,
        item: &LaunchableItem,
        profile: NetworkProfile,
        browser_id: Option<&str>,
        credential: Option<&str>,
    ) -> Result<(), LaunchError> {
        match item {
            LaunchableItem::Bookmark(bookmark) => self.launch_bookmark(bookmark, profile, browser_id).await,
            LaunchableItem::Ssh(ssh) => self.launch_ssh(ssh, profile, credential).await,
            LaunchableItem::App(app) => self.launch_app(app).await,
        }
    }

    /// Launches every item in order without stopping at failures.
    /// Credentials are never injected here.
    pub async fn launch_all(
        &self,
        items: &[LaunchableItem],
        profile: NetworkProfile,
        browser_id: Option<&str>,
    ) -> Vec<LaunchOutcome> {
        let mut outcomes: Vec<LaunchOutcome> = Vec::with_capacity(items.len());
        for item in items {
            let result: Result<(), LaunchError> = self.launch(item, profile, browser_id, None).await;
            if let Err(e) = &result {
                warn!("{} failed to launch: {e}", item.name());
            }
            outcomes.push(LaunchOutcome {
                item_id: item.id().to_string(),
                result,
            });
        }
        outcomes
    }

    async fn launch_bookmark(
        &self,
        item: &BookmarkItem,
        profile: NetworkProfile,
        browser_id: Option<&str>,
    ) -> Result<(), LaunchError> {
        let url: String = resolve::resolve_and_build_url(item, profile)?;

        let browser: Option<Browser> = browser_id
            .filter(|id| !id.is_empty() && *id != DEFAULT_BROWSER_ID)
            .and_then(|id| {
                let found: Option<Browser> = self.browsers.get_browser_by_id(id);
                if found.is_none() {
                    info!("Browser {id} is not installed, using the default");
                }
                found
            })
            .filter(Browser::is_launchable);

        match browser {
            Some(browser) => self.spawner.open_url_with(&browser, &url).await,
            None => self.spawner.open_url(&url).await,
        }
    }

    async fn launch_ssh(
        &self,
        item: &SshItem,
        profile: NetworkProfile,
        credential: Option<&str>,
    ) -> Result<(), LaunchError> {
        let host: &str = resolve::resolve_host(&item.network_addresses, profile)?;
        let ssh: SshCommand = SshCommand::new(item.username(), host, item.port());

        let argv: Vec<String> = match credential.filter(|c| !c.is_empty()) {
            None => ssh.interactive(),
            Some(password) => match self.strategies.iter().find(|s| s.is_available()) {
                Some(strategy) => {
                    info!("Injecting the password with {}", strategy.name());
                    strategy.wrap(&ssh, password)
                }
                None => {
                    warn!("Neither sshpass nor expect is installed; the password must be typed");
                    ssh.interactive()
                }
            },
        };

        info!("Opening SSH session to {} on port {}", ssh.destination(), ssh.port);
        self.spawner.open_terminal(&argv).await
    }

    async fn launch_app(&self, item: &AppItem) -> Result<(), LaunchError> {
        info!("Starting {}", item.app_path);
        self.spawner.launch_app(&item.app_path, &item.arguments).await
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
