//! Running the wrapped tool and capturing what it did

use super::error::{ShimError, ShimResult};
use super::resolve::ResolvedExecutable;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

/// Outcome of one tool invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: i32,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// stdout followed by stderr, the way the hook framework shows a failure
    pub fn combined_output(&self) -> Vec<u8> {
        let mut combined = Vec::with_capacity(self.stdout.len() + self.stderr.len());
        combined.extend_from_slice(&self.stdout);
        combined.extend_from_slice(&self.stderr);
        combined
    }
}

/// Spawns tools one at a time, optionally bounded by a timeout
///
/// A non-zero exit is a normal [`ExecutionResult`]; only a tool that cannot be
/// spawned, or that outlives the timeout, is an error.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub async fn run(
        &self,
        command: &str,
        executable: &ResolvedExecutable,
        args: &[String],
    ) -> ShimResult<ExecutionResult> {
        let (program, argv) = executable.command_line(args);
        tracing::debug!("Running {}", executable.describe(args));

        let mut child = Command::new(&program);
        child
            .args(&argv)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.output()).await {
                Ok(output) => output,
                Err(_) => {
                    return Err(ShimError::ToolExecution {
                        command: command.to_string(),
                        problem: format!("Timed out after {}s.", limit.as_secs_f32()),
                        details: format!("Args: {}", executable.describe(args)),
                    });
                }
            },
            None => child.output().await,
        };

        let output = output.map_err(|err| ShimError::ToolExecution {
            command: command.to_string(),
            problem: format!("Unable to execute {}.", executable.path.display()),
            details: format!("Args: {}\n{err}", executable.describe(args)),
        })?;

        let exit_code = output.status.code().unwrap_or_else(|| {
            tracing::warn!("{command} was terminated by a signal");
            1
        });
        tracing::debug!(
            "{command} exited with {exit_code} ({} bytes stdout, {} bytes stderr)",
            output.stdout.len(),
            output.stderr.len()
        );

        Ok(ExecutionResult {
            stdout: output.stdout,
            stderr: output.stderr,
            exit_code,
        })
    }
}
