//! Failure kinds for a single shim invocation
//!
//! Every variant carries what is needed to render the one diagnostic the hook
//! framework shows, and knows the exit code the process should end with.

use std::path::PathBuf;

/// Result alias for shim operations
pub type ShimResult<T> = std::result::Result<T, ShimError>;

/// Everything that can stop a shim invocation
#[derive(Debug, thiserror::Error)]
pub enum ShimError {
    /// The executable could not be located
    #[error("{command} not found")]
    ExecutableNotFound {
        command: String,
        location: Option<PathBuf>,
        help_url: Option<String>,
    },

    /// `--version` output did not contain anything that looks like a version
    #[error("getting version")]
    VersionFormatUnrecognized { command: String, output: String },

    /// The tool's look-behind pattern is not a valid regex
    #[error("invalid version look-behind pattern")]
    InvalidLookBehind {
        command: String,
        #[source]
        source: regex::Error,
    },

    /// Installed version does not satisfy the requested one
    #[error("Version of {command} is wrong.")]
    VersionMismatch {
        command: String,
        expected: String,
        actual: String,
    },

    /// `--install-dir` points somewhere that is not a directory
    #[error("Install path argument is invalid.")]
    InvalidInstallPath { command: String, path: PathBuf },

    /// A shim option was given without its value
    #[error("Missing value for {flag}.")]
    InvalidArgument { command: String, flag: String },

    /// A target file disappeared or was never there
    #[error("File {} not found", .path.display())]
    FileNotFound { command: String, path: PathBuf },

    /// The tool could not be run, or misbehaved while producing output
    #[error("{problem}")]
    ToolExecution {
        command: String,
        problem: String,
        details: String,
    },

    /// Git could not tell us which files are being committed
    #[error("Problem determining which files are being committed using git.")]
    GitDiscovery { command: String, details: String },

    /// The analyzer ran fine and reported problems
    #[error("{command} exited with code {exit_code}")]
    AnalysisFindings {
        command: String,
        exit_code: i32,
        output: Vec<u8>,
    },

    /// One or more files differ from their formatted form
    #[error("{files} file(s) need formatting with {command}")]
    FormattingDiff {
        command: String,
        files: usize,
        report: Vec<u8>,
    },
}

impl ShimError {
    /// Name of the wrapped command this error belongs to
    pub fn command(&self) -> &str {
        match self {
            Self::ExecutableNotFound { command, .. }
            | Self::VersionFormatUnrecognized { command, .. }
            | Self::InvalidLookBehind { command, .. }
            | Self::VersionMismatch { command, .. }
            | Self::InvalidInstallPath { command, .. }
            | Self::InvalidArgument { command, .. }
            | Self::FileNotFound { command, .. }
            | Self::ToolExecution { command, .. }
            | Self::GitDiscovery { command, .. }
            | Self::AnalysisFindings { command, .. }
            | Self::FormattingDiff { command, .. } => command,
        }
    }

    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::AnalysisFindings { exit_code, .. } if *exit_code != 0 => *exit_code,
            _ => 1,
        }
    }

    /// Second line of the diagnostic, telling the user what to do about it
    pub fn details(&self) -> String {
        match self {
            Self::ExecutableNotFound {
                command,
                location,
                help_url,
            } => {
                let checked = match location {
                    Some(dir) => format!("at '{}'", dir.display()),
                    None => "and on your PATH".to_string(),
                };
                let mut details = format!("Make sure {command} is installed {checked}.");
                if let Some(url) = help_url {
                    details.push_str(&format!("\nFor more info: {url}"));
                }
                details
            }
            Self::VersionFormatUnrecognized { output, .. } => format!(
                "The version format for this command has changed.\nReceived: `{}`",
                output.trim()
            ),
            Self::InvalidLookBehind { source, .. } => {
                format!("The pattern could not be compiled: {source}")
            }
            Self::VersionMismatch {
                command,
                expected,
                actual,
            } => format!(
                "Expected version: {expected} Found version: {actual}. \
                 Edit your pre-commit config or use a different version of {command}."
            ),
            Self::InvalidInstallPath { path, .. } => {
                format!("The path '{}' does not exist on the system.", path.display())
            }
            Self::InvalidArgument { flag, .. } => {
                format!("Pass it as {flag}=<value> or {flag} <value>.")
            }
            Self::FileNotFound { .. } => "Check your path to the file.".to_string(),
            Self::ToolExecution { details, .. } | Self::GitDiscovery { details, .. } => {
                details.clone()
            }
            Self::AnalysisFindings { output, .. } => String::from_utf8_lossy(output).into_owned(),
            Self::FormattingDiff { report, .. } => String::from_utf8_lossy(report).into_owned(),
        }
    }

    /// Bytes written to stderr before exiting
    ///
    /// Findings and diffs are the tool's own output and are passed through
    /// untouched; everything else uses `Problem with <command>: <problem>`.
    pub fn report(&self) -> Vec<u8> {
        match self {
            Self::AnalysisFindings { output, .. } => output.clone(),
            Self::FormattingDiff { report, .. } => report.clone(),
            _ => format!(
                "Problem with {}: {}\n{}\n",
                self.command(),
                self,
                self.details()
            )
            .into_bytes(),
        }
    }
}
