//! # Installed Browsers
//!
//! Detects which web browsers exist on this machine so bookmarks can be
//! opened in a specific one.
//!
//! ## Rules
//! 1. The `default` pseudo-browser is always present and has no path.
//! 2. Detection only looks at well-known locations; nothing is executed.
//! 3. Results are kept until [`InstalledBrowsers::clear_cache`].

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use launchpad_common::models::browser::{Browser, BrowserKind};
use launchpad_common::ports::BrowserRegistry;
use launchpad_common::utils::which;

const MAC_APPLICATIONS: &str = "/Applications";
const MAC_EXTRA_KEYWORDS: [&str; 3] = ["browser", "web", "surf"];

const MAC_BROWSERS: &[(&str, &str, &[&str])] = &[
    ("chrome", "Google Chrome", &["Google Chrome.app", "Chrome.app"]),
    ("firefox", "Firefox", &["Firefox.app"]),
    ("safari", "Safari", &["Safari.app"]),
    ("brave", "Brave", &["Brave Browser.app", "Brave.app"]),
    ("edge", "Microsoft Edge", &["Microsoft Edge.app"]),
    ("arc", "Arc", &["Arc.app"]),
    ("opera", "Opera", &["Opera.app", "Opera GX.app"]),
    ("vivaldi", "Vivaldi", &["Vivaldi.app"]),
    ("chromium", "Chromium", &["Chromium.app"]),
    ("orion", "Orion", &["Orion.app"]),
    ("waterfox", "Waterfox", &["Waterfox.app"]),
    ("tor", "Tor Browser", &["Tor Browser.app"]),
    ("duckduckgo", "DuckDuckGo", &["DuckDuckGo.app"]),
    ("sidekick", "Sidekick", &["Sidekick.app"]),
    ("sigma", "SigmaOS", &["SigmaOS.app"]),
    ("atlas", "Atlas", &["Atlas.app"]),
    ("zen", "Zen Browser", &["Zen Browser.app", "Zen.app"]),
    ("floorp", "Floorp", &["Floorp.app"]),
    ("librewolf", "LibreWolf", &["LibreWolf.app"]),
    ("mullvad", "Mullvad Browser", &["Mullvad Browser.app"]),
    ("min", "Min", &["Min.app"]),
    ("beam", "Beam", &["Beam.app"]),
    ("chatgpt", "ChatGPT", &["ChatGPT.app"]),
];

const WINDOWS_BROWSERS: &[(&str, &str, &[&str])] = &[
    ("chrome", "Google Chrome", &[
        r"C:\Program Files\Google\Chrome\Application\chrome.exe",
        r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
    ]),
    ("firefox", "Firefox", &[r"C:\Program Files\Mozilla Firefox\firefox.exe"]),
    ("edge", "Microsoft Edge", &[r"C:\Program Files (x86)\Microsoft\Edge\Application\msedge.exe"]),
    ("brave", "Brave", &[r"C:\Program Files\BraveSoftware\Brave-Browser\Application\brave.exe"]),
    ("opera", "Opera", &[r"C:\Program Files\Opera\launcher.exe"]),
    ("vivaldi", "Vivaldi", &[r"C:\Program Files\Vivaldi\Application\vivaldi.exe"]),
];

const LINUX_BROWSERS: &[(&str, &str, &[&str])] = &[
    ("chrome", "Google Chrome", &["google-chrome", "google-chrome-stable"]),
    ("firefox", "Firefox", &["firefox"]),
    ("chromium", "Chromium", &["chromium", "chromium-browser"]),
    ("brave", "Brave", &["brave-browser", "brave"]),
    ("opera", "Opera", &["opera"]),
    ("vivaldi", "Vivaldi", &["vivaldi", "vivaldi-stable"]),
];

#[derive(Debug, Clone, Default)]
pub struct InstalledBrowsers {
    browsers: Vec<Browser>,
}

impl InstalledBrowsers {
    /// Runs detection for the current platform.
    pub fn detect() -> Self {
        let mut registry: InstalledBrowsers = Self::default();
        registry.refresh();
        registry
    }

    /// A registry holding exactly `browsers` plus the default entry.
    pub fn from_browsers(browsers: Vec<Browser>) -> Self {
        let mut all: Vec<Browser> = vec![Browser::system_default()];
        all.extend(browsers);
        Self { browsers: all }
    }

    pub fn refresh(&mut self) {
        let found: Vec<Browser> = if cfg!(target_os = "macos") {
            detect_app_bundles(Path::new(MAC_APPLICATIONS))
        } else if cfg!(windows) {
            detect_executables(|path| path.exists())
        } else {
            detect_on_path(which::which)
        };
        debug!("Detected {} browsers", found.len());
        *self = Self::from_browsers(found);
    }

    pub fn installed(&self) -> &[Browser] {
        &self.browsers
    }

    /// Forgets detected browsers; only the default entry remains.
    pub fn clear_cache(&mut self) {
        *self = Self::from_browsers(Vec::new());
    }
}

impl BrowserRegistry for InstalledBrowsers {
    fn get_browser_by_id(&self, id: &str) -> Option<Browser> {
        self.browsers.iter().find(|b| b.id == id).cloned()
    }
}

fn detect_app_bundles(apps_dir: &Path) -> Vec<Browser> {
    let mut browsers: Vec<Browser> = Vec::new();

    for (id, name, bundles) in MAC_BROWSERS {
        if let Some(path) = bundles.iter().map(|b| apps_dir.join(b)).find(|p| p.exists()) {
            browsers.push(browser(id, name, path, BrowserKind::AppBundle));
        }
    }

    let entries = match fs::read_dir(apps_dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Cannot list {}: {e}", apps_dir.display());
            return browsers;
        }
    };

    let mut extras: Vec<Browser> = Vec::new();
    for entry in entries.flatten() {
        let file_name: String = entry.file_name().to_string_lossy().into_owned();
        let Some(app_name) = file_name.strip_suffix(".app") else {
            continue;
        };
        let lower: String = app_name.to_lowercase();
        let known: bool = browsers.iter().any(|b| b.path == entry.path());

        if !known && MAC_EXTRA_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            let id: String = lower.split_whitespace().collect::<Vec<&str>>().join("-");
            extras.push(browser(&id, app_name, entry.path(), BrowserKind::AppBundle));
        }
    }
    extras.sort_by(|a, b| a.id.cmp(&b.id));
    browsers.extend(extras);

    browsers
}

fn detect_executables(exists: impl Fn(&Path) -> bool) -> Vec<Browser> {
    WINDOWS_BROWSERS
        .iter()
        .filter_map(|(id, name, paths)| {
            paths
                .iter()
                .map(PathBuf::from)
                .find(|p| exists(p.as_path()))
                .map(|path| browser(id, name, path, BrowserKind::Executable))
        })
        .collect()
}

fn detect_on_path(locate: impl Fn(&str) -> Option<PathBuf>) -> Vec<Browser> {
    LINUX_BROWSERS
        .iter()
        .filter_map(|(id, name, commands)| {
            commands
                .iter()
                .find_map(|cmd| locate(*cmd))
                .map(|path| browser(id, name, path, BrowserKind::Executable))
        })
        .collect()
}

fn browser(id: &str, name: &str, path: PathBuf, kind: BrowserKind) -> Browser {
    Browser {
        id: id.to_string(),
        name: name.to_string(),
        path,
        kind,
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

#[cfg(test)]
mod tests {
    use super::*;
    use launchpad_common::models::browser::DEFAULT_BROWSER_ID;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir: PathBuf = std::env::temp_dir().join(format!("launchpad-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn default_browser_is_always_listed() {
        let registry: InstalledBrowsers = InstalledBrowsers::from_browsers(vec![]);
        let default: Browser = registry.get_browser_by_id(DEFAULT_BROWSER_ID).unwrap();
        assert_eq!(default.kind, BrowserKind::SystemDefault);
        assert!(!default.is_launchable());
    }

    #[test]
    fn cleared_registry_keeps_only_the_default() {
        let mut registry: InstalledBrowsers = InstalledBrowsers::from_browsers(vec![Browser {
            id: "firefox".to_string(),
            name: "Firefox".to_string(),
            path: PathBuf::from("/usr/bin/firefox"),
            kind: BrowserKind::Executable,
        }]);
        registry.clear_cache();

        let ids: Vec<&str> = registry.installed().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec![DEFAULT_BROWSER_ID]);
        assert!(registry.get_browser_by_id("firefox").is_none());
    }

    #[test]
    fn first_command_on_path_wins() {
        let found: Vec<Browser> = detect_on_path(|cmd| match cmd {
            "google-chrome-stable" => Some(PathBuf::from("/usr/bin/google-chrome-stable")),
            "chromium-browser" => Some(PathBuf::from("/usr/bin/chromium-browser")),
            "chromium" => Some(PathBuf::from("/snap/bin/chromium")),
            _ => None,
        });

        let ids: Vec<&str> = found.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["chrome", "chromium"]);
        assert_eq!(found[1].path, PathBuf::from("/snap/bin/chromium"));
        assert!(found.iter().all(|b| b.kind == BrowserKind::Executable));
    }

    #[test]
    fn x86_chrome_is_a_fallback() {
        let found: Vec<Browser> = detect_executables(|p| p.to_string_lossy().contains("(x86)\\Google"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "chrome");
    }

    #[test]
    fn app_bundles_and_keyword_matches_are_found() {
        let apps: PathBuf = scratch_dir("apps");
        for bundle in ["Firefox.app", "Opera GX.app", "Cool Web Thing.app", "Notes.app"] {
            fs::create_dir_all(apps.join(bundle)).unwrap();
        }

        let found: Vec<Browser> = detect_app_bundles(&apps);
        let ids: Vec<&str> = found.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["firefox", "opera", "cool-web-thing"]);
        assert_eq!(found[1].path, apps.join("Opera GX.app"));
        assert!(found.iter().all(|b| b.kind == BrowserKind::AppBundle));

        let _ = fs::remove_dir_all(&apps);
    }
}
