//! Password injection for interactive SSH sessions.
//!
//! Strategies are tried in priority order and the first one whose helper is
//! installed wraps the `ssh` invocation. The password only ever lives in the
//! argv handed to the terminal.

use launchpad_common::utils::which;

/// Target of an SSH session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshCommand {
    pub username: String,
    pub host: String,
    pub port: u16,
}

impl SshCommand {
    pub fn new(username: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            username: username.into(),
            host: host.into(),
            port,
        }
    }

    pub fn destination(&self) -> String {
        format!("{}@{}", self.username, self.host)
    }

    /// Bare `ssh`; the user authenticates in the terminal.
    pub fn interactive(&self) -> Vec<String> {
        vec![
            "ssh".to_string(),
            self.destination(),
            "-p".to_string(),
            self.port.to_string(),
        ]
    }

    /// `ssh` that accepts unknown host keys, so a scripted password is not
    /// answered to the host-key prompt.
    pub fn accepting_new_hosts(&self) -> Vec<String> {
        vec![
            "ssh".to_string(),
            "-o".to_string(),
            "StrictHostKeyChecking=accept-new".to_string(),
            self.destination(),
            "-p".to_string(),
            self.port.to_string(),
        ]
    }
}

pub trait CredentialInjectionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the helper program is installed.
    fn is_available(&self) -> bool;

    /// argv that runs `ssh` with `password` supplied automatically.
    fn wrap(&self, ssh: &SshCommand, password: &str) -> Vec<String>;
}

/// `sshpass -p <password> ssh ...`
#[derive(Debug, Clone, Copy)]
pub struct SshpassStrategy {
    available: bool,
}

impl SshpassStrategy {
    pub fn detect() -> Self {
        Self::with_availability(which::exists("sshpass"))
    }

    pub fn with_availability(available: bool) -> Self {
        Self { available }
    }
}

impl CredentialInjectionStrategy for SshpassStrategy {
    fn name(&self) -> &'static str {
        "sshpass"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn wrap(&self, ssh: &SshCommand, password: &str) -> Vec<String> {
        let mut argv: Vec<String> = vec!["sshpass".to_string(), "-p".to_string(), password.to_string()];
        argv.extend(ssh.accepting_new_hosts());
        argv
    }
}

/// An inline `expect -c` script that answers the password prompt and then
/// hands the session to the user.
#[derive(Debug, Clone, Copy)]
pub struct ExpectStrategy {
    available: bool,
}

impl ExpectStrategy {
    pub fn detect() -> Self {
        Self::with_availability(which::exists("expect"))
    }

    pub fn with_availability(available: bool) -> Self {
        Self { available }
    }
}

impl CredentialInjectionStrategy for ExpectStrategy {
    fn name(&self) -> &'static str {
        "expect"
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn wrap(&self, ssh: &SshCommand, password: &str) -> Vec<String> {
        vec!["expect".to_string(), "-c".to_string(), expect_script(ssh, password)]
    }
}

fn expect_script(ssh: &SshCommand, password: &str) -> String {
    let spawn: String = ssh
        .accepting_new_hosts()
        .iter()
        .map(|arg| format!("\"{}\"", escape_tcl(arg)))
        .collect::<Vec<String>>()
        .join(" ");
    let secret: String = escape_tcl(password);

    format!(
        "spawn {spawn}\n\
         expect {{\n\
         \x20 \"password:\" {{ send \"{secret}\\r\"; interact }}\n\
         \x20 \"Password:\" {{ send \"{secret}\\r\"; interact }}\n\
         \x20 \"yes/no\" {{ send \"yes\\r\"; expect \"assword:\"; send \"{secret}\\r\"; interact }}\n\
         \x20 timeout {{ interact }}\n\
         }}\n"
    )
}

/// Escapes a value for use inside a double-quoted Tcl word.
fn escape_tcl(value: &str) -> String {
    let mut escaped: String = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '[' | ']') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Helpers in priority order.
pub fn default_strategies() -> Vec<Box<dyn CredentialInjectionStrategy>> {
    vec![
        Box::new(SshpassStrategy::detect()),
        Box::new(ExpectStrategy::detect()),
    ]
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
