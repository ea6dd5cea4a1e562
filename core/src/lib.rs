//! # Launchpad Core
//!
//! The services behind every command, plus the adapters that give the
//! outbound ports in `launchpad_common::ports` real I/O.
//!
//! * [`health`]: sequential HEAD probing with a result cache.
//! * [`launcher`]: opening bookmarks, SSH sessions and applications.
//! * [`discovery`]: bounded mDNS scan for file shares.
//! * [`tailscale`]: cached status of the local Tailscale client.
//! * [`browsers`]: installed-browser detection.
//! * [`apps`]: GUI applications currently running.
//! * [`network`]: concrete prober, browser and resolver adapters.

pub mod apps;
pub mod browsers;
pub mod discovery;
pub mod health;
pub mod launcher;
pub mod network;
pub mod tailscale;

pub use apps::RunningApps;
pub use browsers::InstalledBrowsers;
pub use discovery::NetworkDiscoveryService;
pub use health::HealthChecker;
pub use launcher::LaunchDispatcher;
pub use tailscale::TailscaleService;
