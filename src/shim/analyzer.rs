//! Non-mutating tools: run once over every path and pass the exit code through

use super::ShimCommand;
use super::error::{ShimError, ShimResult};

pub struct AnalyzerRunner {
    command: ShimCommand,
}

impl AnalyzerRunner {
    pub fn new(command: ShimCommand) -> Self {
        Self { command }
    }

    /// Run `<tool> <tool args...> <paths...>`
    ///
    /// Returns `Ok(true)` on a clean exit. Any other exit code becomes
    /// [`ShimError::AnalysisFindings`] holding the tool's stdout and stderr.
    pub async fn run_command(&self) -> ShimResult<bool> {
        let args = &self.command.args;
        let argv: Vec<String> = args
            .tool_args
            .iter()
            .chain(args.paths.iter())
            .cloned()
            .collect();

        let result = self.command.execute(&argv).await?;
        if !result.success() {
            tracing::info!(
                "{} reported findings (exit code {})",
                self.command.name(),
                result.exit_code
            );
            return Err(ShimError::AnalysisFindings {
                command: self.command.name().to_string(),
                exit_code: result.exit_code,
                output: result.combined_output(),
            });
        }

        Ok(true)
    }
}
