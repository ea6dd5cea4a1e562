//! # Running Applications
//!
//! Lists GUI applications that are currently running so one can be turned
//! into an `app` catalog entry.
//!
//! ## Rules
//! 1. Only executables inside an `.app/Contents/MacOS/` directory count.
//! 2. Helpers nested in another bundle, `/System/`, `/usr/` and the bundle
//!    this program runs from are skipped.
//! 3. One entry per bundle, sorted by name. A failing `ps` yields nothing.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, trace};

use launchpad_common::config::Config;
use launchpad_common::models::app::RunningApp;
use launchpad_common::ports::{CommandOutput, CommandRunner};

const BUNDLE_MARKER: &str = ".app/Contents/MacOS/";
const BUNDLE_SUFFIX: &str = ".app";
const SYSTEM_PREFIXES: [&str; 2] = ["/System/", "/usr/"];

pub struct RunningApps {
    runner: Arc<dyn CommandRunner>,
    cfg: Config,
}

impl RunningApps {
    pub fn new(runner: Arc<dyn CommandRunner>, cfg: Config) -> Self {
        Self { runner, cfg }
    }

    /// Running applications with their bundle ids filled in where `defaults`
    /// can read them.
    pub async fn list(&self) -> Vec<RunningApp> {
        let args: Vec<String> = vec!["-axo".to_string(), "pid=,comm=".to_string()];
        let stdout: String = match self.runner.run("ps", &args, self.cfg.app_query_timeout).await {
            Ok(CommandOutput { success: true, stdout, .. }) => stdout,
            Ok(CommandOutput { stderr, .. }) => {
                debug!("ps failed: {}", stderr.trim());
                return Vec::new();
            }
            Err(e) => {
                debug!("Could not run ps: {e:#}");
                return Vec::new();
            }
        };

        let mut apps: Vec<RunningApp> = parse_process_list(&stdout);
        if let Ok(exe) = std::env::current_exe() {
            apps.retain(|app| !is_own_bundle(app, &exe));
        }

        for app in &mut apps {
            app.bundle_id = self.bundle_id(&app.path).await;
        }
        debug!("Found {} running applications", apps.len());
        apps
    }

    async fn bundle_id(&self, bundle: &str) -> Option<String> {
        let args: Vec<String> = vec![
            "read".to_string(),
            format!("{bundle}/Contents/Info.plist"),
            "CFBundleIdentifier".to_string(),
        ];
        match self.runner.run("defaults", &args, self.cfg.app_query_timeout).await {
            Ok(CommandOutput { success: true, stdout, .. }) => {
                Some(stdout.trim().to_string()).filter(|id| !id.is_empty())
            }
            Ok(_) => None,
            Err(e) => {
                trace!("No bundle id for {bundle}: {e:#}");
                None
            }
        }
    }
}

/// Parses `ps -axo pid=,comm=` output into one entry per bundle.
pub fn parse_process_list(stdout: &str) -> Vec<RunningApp> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut apps: Vec<RunningApp> = Vec::new();

    for line in stdout.lines() {
        let Some((pid, command)) = line.trim().split_once(char::is_whitespace) else {
            continue;
        };
        let Ok(pid) = pid.parse::<u32>() else {
            continue;
        };
        let Some(bundle) = bundle_path(command.trim()) else {
            continue;
        };
        if SYSTEM_PREFIXES.iter().any(|prefix| bundle.starts_with(prefix)) || !seen.insert(bundle) {
            continue;
        }

        apps.push(RunningApp {
            name: bundle_name(bundle),
            bundle_id: None,
            path: bundle.to_string(),
            pid,
        });
    }

    apps.sort_by_key(|app| app.name.to_lowercase());
    apps
}

/// `/Applications/Slack.app` for an executable directly inside that bundle.
fn bundle_path(command: &str) -> Option<&str> {
    let end: usize = command.find(BUNDLE_MARKER)? + BUNDLE_SUFFIX.len();
    let bundle: &str = &command[..end];
    let outer: &str = &bundle[..end - BUNDLE_SUFFIX.len()];

    (bundle.starts_with('/') && !outer.contains(".app/")).then_some(bundle)
}

fn is_own_bundle(app: &RunningApp, exe: &Path) -> bool {
    exe.starts_with(&app.path)
}

fn bundle_name(bundle: &str) -> String {
    Path::new(bundle)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| bundle.to_string())
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
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::time::Duration;

    const PS_OUTPUT: &str = "    1 /sbin/launchd
  412 /System/Library/CoreServices/Finder.app/Contents/MacOS/Finder
  733 /Applications/Slack.app/Contents/MacOS/Slack
  741 /Applications/Slack.app/Contents/Frameworks/Slack Helper.app/Contents/MacOS/Slack Helper
  802 /Applications/Google Chrome.app/Contents/MacOS/Google Chrome
  815 /Applications/Slack.app/Contents/MacOS/Slack
  901 /usr/libexec/Thing.app/Contents/MacOS/Thing
  955 /Users/me/Applications/arc.app/Contents/MacOS/Arc
 1020 /usr/local/bin/node
  abc /Applications/Broken.app/Contents/MacOS/Broken
";

    struct FakeRunner {
        ps: Option<&'static str>,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl FakeRunner {
        fn new(ps: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                ps,
                calls: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl CommandRunner for FakeRunner {
        async fn run(&self, program: &str, args: &[String], _timeout: Duration) -> anyhow::Result<CommandOutput> {
            self.calls.lock().unwrap().push(args.to_vec());
            match program {
                "ps" => match self.ps {
                    Some(stdout) => Ok(CommandOutput {
                        success: true,
                        stdout: stdout.to_string(),
                        stderr: String::new(),
                    }),
                    None => anyhow::bail!("No such file or directory"),
                },
                "defaults" if args[1].starts_with("/Applications/Slack.app/") => Ok(CommandOutput {
                    success: true,
                    stdout: "com.tinyspeck.slackmacgap\n".to_string(),
                    stderr: String::new(),
                }),
                _ => Ok(CommandOutput {
                    success: false,
                    stdout: String::new(),
                    stderr: "does not exist".to_string(),
                }),
            }
        }

        fn locate(&self, _program: &str) -> Option<PathBuf> {
            None
        }
    }

    #[test]
    fn bundles_are_deduplicated_and_sorted() {
        let apps: Vec<RunningApp> = parse_process_list(PS_OUTPUT);
        let names: Vec<&str> = apps.iter().map(|app| app.name.as_str()).collect();
        assert_eq!(names, vec!["arc", "Google Chrome", "Slack"]);

        let slack: &RunningApp = apps.iter().find(|app| app.name == "Slack").unwrap();
        assert_eq!(slack.path, "/Applications/Slack.app");
        assert_eq!(slack.pid, 733);

        let chrome: &RunningApp = apps.iter().find(|app| app.name == "Google Chrome").unwrap();
        assert_eq!(chrome.path, "/Applications/Google Chrome.app");
    }

    #[test]
    fn system_locations_and_helpers_are_skipped() {
        let apps: Vec<RunningApp> = parse_process_list(PS_OUTPUT);
        assert!(apps.iter().all(|app| !app.path.starts_with("/System/")));
        assert!(apps.iter().all(|app| !app.path.starts_with("/usr/")));
        assert!(apps.iter().all(|app| !app.name.contains("Helper")));
    }

    #[test]
    fn own_bundle_is_recognized() {
        let apps: Vec<RunningApp> = parse_process_list(PS_OUTPUT);
        let slack: &RunningApp = apps.iter().find(|app| app.name == "Slack").unwrap();
        assert!(is_own_bundle(slack, Path::new("/Applications/Slack.app/Contents/MacOS/Slack")));
        assert!(!is_own_bundle(slack, Path::new("/Applications/Slack Beta.app/Contents/MacOS/Slack")));
    }

    #[test]
    fn plain_binaries_are_not_apps() {
        assert_eq!(bundle_path("/usr/local/bin/node"), None);
        assert_eq!(bundle_path("Slack.app/Contents/MacOS/Slack"), None);
    }

    #[tokio::test]
    async fn bundle_ids_are_looked_up_per_app() {
        let runner: Arc<FakeRunner> = FakeRunner::new(Some(PS_OUTPUT));
        let apps: Vec<RunningApp> = RunningApps::new(runner.clone(), Config::default()).list().await;

        assert_eq!(apps.len(), 3);
        let slack: &RunningApp = apps.iter().find(|app| app.name == "Slack").unwrap();
        assert_eq!(slack.bundle_id.as_deref(), Some("com.tinyspeck.slackmacgap"));
        let arc: &RunningApp = apps.iter().find(|app| app.name == "arc").unwrap();
        assert_eq!(arc.bundle_id, None);

        // One ps call plus one lookup per app.
        assert_eq!(runner.calls.lock().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn missing_ps_lists_nothing() {
        let apps: Vec<RunningApp> = RunningApps::new(FakeRunner::new(None), Config::default()).list().await;
        assert!(apps.is_empty());
    }
}
