//! # Outbound Ports
//!
//! Traits the services depend on instead of touching the OS or the network
//! directly. Concrete implementations live in `launchpad-core`; tests swap
//! in mocks.
//!
//! ## Rules
//! 1. All items here are traits or the plain data they exchange.
//! 2. No concrete implementations.
//! 3. Expected failures (timeouts, unreachable hosts) are values, not errors.

pub mod browser_registry;
pub mod command_runner;
pub mod host_resolver;
pub mod http_prober;
pub mod port_prober;
pub mod process_spawner;
pub mod service_browser;

pub use browser_registry::BrowserRegistry;
pub use command_runner::{CommandOutput, CommandRunner};
pub use host_resolver::HostResolver;
pub use http_prober::HttpProber;
pub use port_prober::PortProber;
pub use process_spawner::ProcessSpawner;
pub use service_browser::ServiceBrowser;
