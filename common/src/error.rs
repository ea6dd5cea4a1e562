//! Error taxonomy for resolution and launching.
//!
//! Probe and discovery failures are deliberately *not* part of the public
//! error surface: they are folded into result values by the services.

use std::io;
use std::process::ExitStatus;

use thiserror::Error;

use crate::models::address::NetworkProfile;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Nothing is set anywhere in the profile's fallback chain.
    #[error("No address configured for the {0} profile")]
    NoAddress(NetworkProfile),
    #[error("Cannot build a URL without a host")]
    MissingHost,
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error("No supported terminal emulator found")]
    NoTerminalFound,

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Script {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Opening {target} with the default handler failed: {source}")]
    DefaultHandler {
        target: String,
        #[source]
        source: io::Error,
    },

    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
}

impl LaunchError {
    pub fn spawn(program: impl Into<String>, source: io::Error) -> Self {
        Self::Spawn {
            program: program.into(),
            source,
        }
    }

    /// True when the program itself could not be found, as opposed to failing
    /// after it started.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Spawn { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Why a health probe did not produce an HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("Request timeout")]
    Timeout,
    #[error("{0}")]
    Transport(String),
}
