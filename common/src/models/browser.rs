use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BROWSER_ID: &str = "default";

/// How a browser record has to be started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BrowserKind {
    /// The OS default URL handler. Has no path.
    SystemDefault,
    /// A macOS `.app` bundle, started through `open -a`.
    AppBundle,
    Executable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Browser {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
    pub kind: BrowserKind,
}

impl Browser {
    pub fn system_default() -> Self {
        Self {
            id: DEFAULT_BROWSER_ID.to_string(),
            name: "Default Browser".to_string(),
            path: PathBuf::new(),
            kind: BrowserKind::SystemDefault,
        }
    }

    pub fn is_launchable(&self) -> bool {
        self.kind != BrowserKind::SystemDefault && !self.path.as_os_str().is_empty()
    }
}
