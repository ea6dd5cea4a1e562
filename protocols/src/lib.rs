//! Wire formats used by discovery.

pub mod mdns;
pub mod services;

pub use services::{SHARE_SERVICES, ServiceType};
