use serde::{Deserialize, Serialize};

use crate::models::item::{AppItem, LaunchableItem};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunningApp {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bundle_id: Option<String>,
    /// The `.app` bundle, not the executable inside it.
    pub path: String,
    pub pid: u32,
}

impl RunningApp {
    /// Catalog entry that starts this application. The bundle id doubles as
    /// the item id when it is known.
    pub fn to_item(&self) -> LaunchableItem {
        let id: String = self
            .bundle_id
            .clone()
            .unwrap_or_else(|| slug(&self.name));

        LaunchableItem::App(AppItem {
            id,
            name: self.name.clone(),
            app_path: self.path.clone(),
            arguments: Vec::new(),
        })
    }
}

fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect::<Vec<String>>()
        .join("-")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
