//! Per-platform [`ProcessSpawner`] implementations.
//!
//! Each spawner only decides *what* to run; the pure command builders are
//! kept separate from [`detach`] so they can be checked without starting
//! anything.

use std::io;
use std::process::{Command, Stdio};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use launchpad_common::error::LaunchError;
use launchpad_common::models::browser::{Browser, BrowserKind};
use launchpad_common::ports::ProcessSpawner;

/// Spawner for the platform this binary was built for.
pub fn native() -> Arc<dyn ProcessSpawner> {
    if cfg!(target_os = "macos") {
        Arc::new(MacSpawner)
    } else if cfg!(windows) {
        Arc::new(WindowsSpawner)
    } else {
        Arc::new(LinuxSpawner)
    }
}

/// Starts `program` in its own process group with no standard streams.
/// The child is neither awaited nor reaped.
pub fn detach(program: &str, args: &[String]) -> io::Result<()> {
    let mut command: Command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const DETACHED_PROCESS: u32 = 0x0000_0008;
        const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
        command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
    }

    let child = command.spawn()?;
    debug!("Started {program} as pid {}", child.id());
    Ok(())
}

fn spawn_detached(program: &str, args: &[String]) -> Result<(), LaunchError> {
    detach(program, args).map_err(|e| LaunchError::spawn(program, e))
}

fn open_with_default_handler(target: &str) -> Result<(), LaunchError> {
    info!("Opening {target} with the default handler");
    open::that_detached(target).map_err(|source| LaunchError::DefaultHandler {
        target: target.to_string(),
        source,
    })
}

/// Quotes an argv for a POSIX shell.
pub fn shell_join(argv: &[String]) -> Result<String, LaunchError> {
    shlex::try_join(argv.iter().map(String::as_str)).map_err(|e| {
        LaunchError::spawn(
            argv.first().map(String::as_str).unwrap_or("shell"),
            io::Error::new(io::ErrorKind::InvalidInput, e.to_string()),
        )
    })
}

// ── macOS ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct MacSpawner;

impl MacSpawner {
    /// AppleScript that opens a Terminal window running `shell_command`.
    pub fn terminal_script(shell_command: &str) -> String {
        format!(
            "tell application \"Terminal\"\n  activate\n  do script \"{}\"\nend tell",
            escape_applescript(shell_command)
        )
    }

    pub fn app_args(app_path: &str, args: &[String]) -> (String, Vec<String>) {
        if !is_app_bundle(app_path) {
            return (app_path.to_string(), args.to_vec());
        }
        let mut open_args: Vec<String> = vec!["-a".to_string(), app_path.to_string()];
        if !args.is_empty() {
            open_args.push("--args".to_string());
            open_args.extend(args.iter().cloned());
        }
        ("open".to_string(), open_args)
    }
}

#[async_trait]
impl ProcessSpawner for MacSpawner {
    fn platform(&self) -> &'static str {
        "macos"
    }

    async fn open_url(&self, url: &str) -> Result<(), LaunchError> {
        open_with_default_handler(url)
    }

    async fn open_url_with(&self, browser: &Browser, url: &str) -> Result<(), LaunchError> {
        let path: String = browser.path.to_string_lossy().into_owned();
        info!("Opening {url} in {}", browser.name);
        match browser.kind {
            BrowserKind::SystemDefault => open_with_default_handler(url),
            BrowserKind::AppBundle => spawn_detached("open", &["-a".to_string(), path, url.to_string()]),
            BrowserKind::Executable => spawn_detached(&path, &[url.to_string()]),
        }
    }

    async fn open_terminal(&self, command: &[String]) -> Result<(), LaunchError> {
        let script: String = Self::terminal_script(&shell_join(command)?);
        let output = tokio::process::Command::new("osascript")
            .arg("-e")
            .arg(&script)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| LaunchError::spawn("osascript", e))?;

        if !output.status.success() {
            return Err(LaunchError::Script {
                program: "osascript".to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    async fn launch_app(&self, app_path: &str, args: &[String]) -> Result<(), LaunchError> {
        let (program, args): (String, Vec<String>) = Self::app_args(app_path, args);
        spawn_detached(&program, &args)
    }
}

fn is_app_bundle(path: &str) -> bool {
    path.trim_end_matches('/').ends_with(".app")
}

fn escape_applescript(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

// ── Windows ───────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsSpawner;

impl WindowsSpawner {
    /// Windows Terminal first, then a plain console host.
    pub fn terminal_candidates(command_line: &str) -> Vec<(&'static str, Vec<String>)> {
        vec![
            ("wt", strings(&["new-tab", "cmd", "/k", command_line])),
            ("cmd", strings(&["/c", "start", "", "cmd", "/k", command_line])),
        ]
    }

    pub fn app_args(app_path: &str, args: &[String]) -> Vec<String> {
        let mut start: Vec<String> = strings(&["/c", "start", "", app_path]);
        start.extend(args.iter().cloned());
        start
    }
}

#[async_trait]
impl ProcessSpawner for WindowsSpawner {
    fn platform(&self) -> &'static str {
        "windows"
    }

    async fn open_url(&self, url: &str) -> Result<(), LaunchError> {
        open_with_default_handler(url)
    }

    async fn open_url_with(&self, browser: &Browser, url: &str) -> Result<(), LaunchError> {
        if !browser.is_launchable() {
            return open_with_default_handler(url);
        }
        info!("Opening {url} in {}", browser.name);
        spawn_detached(&browser.path.to_string_lossy(), &[url.to_string()])
    }

    async fn open_terminal(&self, command: &[String]) -> Result<(), LaunchError> {
        let command_line: String = windows_join(command);
        first_that_starts(Self::terminal_candidates(&command_line))
    }

    async fn launch_app(&self, app_path: &str, args: &[String]) -> Result<(), LaunchError> {
        spawn_detached("cmd", &Self::app_args(app_path, args))
    }
}

/// Joins an argv for `cmd.exe`, quoting words with spaces or quotes.
pub fn windows_join(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| {
            if arg.is_empty() || arg.contains([' ', '\t', '"']) {
                format!("\"{}\"", arg.replace('"', "\\\""))
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

// ── Linux and other unix ──────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxSpawner;

impl LinuxSpawner {
    /// Emulators in the order they are tried. The shell is kept open after
    /// the session ends so errors stay readable.
    pub fn terminal_candidates(shell_command: &str) -> Vec<(&'static str, Vec<String>)> {
        let keep_open: String = format!("{shell_command}; exec bash");
        let inline: String = shlex::try_join(["bash", "-c", keep_open.as_str()])
            .unwrap_or_else(|_| keep_open.clone());

        vec![
            ("gnome-terminal", strings(&["--", "bash", "-c", &keep_open])),
            ("konsole", strings(&["-e", "bash", "-c", &keep_open])),
            ("xfce4-terminal", strings(&["-e", &inline])),
            ("xterm", strings(&["-e", "bash", "-c", &keep_open])),
        ]
    }
}

#[async_trait]
impl ProcessSpawner for LinuxSpawner {
    fn platform(&self) -> &'static str {
        "linux"
    }

    async fn open_url(&self, url: &str) -> Result<(), LaunchError> {
        open_with_default_handler(url)
    }

    async fn open_url_with(&self, browser: &Browser, url: &str) -> Result<(), LaunchError> {
        if !browser.is_launchable() {
            return open_with_default_handler(url);
        }
        info!("Opening {url} in {}", browser.name);
        spawn_detached(&browser.path.to_string_lossy(), &[url.to_string()])
    }

    async fn open_terminal(&self, command: &[String]) -> Result<(), LaunchError> {
        let shell_command: String = shell_join(command)?;
        first_that_starts(Self::terminal_candidates(&shell_command))
    }

    async fn launch_app(&self, app_path: &str, args: &[String]) -> Result<(), LaunchError> {
        spawn_detached(app_path, args)
    }
}

fn first_that_starts(candidates: Vec<(&'static str, Vec<String>)>) -> Result<(), LaunchError> {
    for (program, args) in candidates {
        match detach(program, &args) {
            Ok(()) => {
                info!("Opened a terminal with {program}");
                return Ok(());
            }
            Err(e) => debug!("{program} did not start: {e}"),
        }
    }
    Err(LaunchError::NoTerminalFound)
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
