//! # Launchpad Common
//!
//! Types and pure logic shared by every other crate:
//!
//! * **[`models`]**: the items, addresses and results passed around.
//! * **[`resolve`]**: profile-aware address resolution and URL building.
//! * **[`ports`]**: traits isolating the services from OS and network I/O.
//! * **[`error`]**: resolution and launch failures.
//! * **[`config`]**: runtime tunables.

pub mod config;
pub mod error;
pub mod models;
pub mod network;
pub mod ports;
pub mod resolve;
pub mod utils;

pub use error::{LaunchError, ProbeError, ResolutionError};
pub use models::address::{NetworkAddressSet, NetworkProfile};
pub use models::item::{AppItem, BookmarkItem, LaunchableItem, SshItem};
