//! Adapters implementing the outbound ports against the real network and OS.

pub mod command;
pub mod http;
pub mod mdns;
pub mod resolver;
pub mod tcp;

pub use command::TokioCommandRunner;
pub use http::ReqwestProber;
pub use mdns::MdnsServiceBrowser;
pub use resolver::SystemHostResolver;
pub use tcp::TcpPortProber;
