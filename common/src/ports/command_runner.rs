use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs short-lived helper programs and waits for their output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs `program` to completion. The child is killed if `timeout` elapses.
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> anyhow::Result<CommandOutput>;

    /// Finds `program` on `PATH`.
    fn locate(&self, program: &str) -> Option<PathBuf>;
}
