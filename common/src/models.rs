//! # Domain Models
//!
//! Plain data passed between the CLI, the services and the adapters.
//!
//! * [`address`]: per-profile host strings and the profile selector.
//! * [`item`]: the launchable bookmark / ssh / app variants.
//! * [`health`]: outcome of a single reachability probe.
//! * [`share`]: services found on the LAN.
//! * [`tailscale`]: snapshot of the local Tailscale client.
//! * [`browser`]: an installed web browser.
//! * [`app`]: a GUI application found running.

pub mod address;
pub mod app;
pub mod browser;
pub mod health;
pub mod item;
pub mod share;
pub mod tailscale;
