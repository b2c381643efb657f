//! The adapter core
//!
//! A [`ShimCommand`] ties together everything needed to run one wrapped tool:
//! its identity ([`CommandSpec`]), the split hook arguments
//! ([`InvocationArgs`]), the located executable and a [`ProcessRunner`].
//! [`AnalyzerRunner`] and [`FormatterVerifier`] are the two ways of using it.

pub mod analyzer;
pub mod args;
pub mod error;
pub mod formatter;
pub mod process;
pub mod resolve;
pub mod version;


pub use analyzer::AnalyzerRunner;
pub use args::{ArgSplitter, InvocationArgs};
pub use error::{ShimError, ShimResult};
pub use formatter::FormatterVerifier;
pub use process::{ExecutionResult, ProcessRunner};
pub use resolve::{ExecutableResolver, ResolvedExecutable, default_interpreters};
pub use version::VersionPolicy;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Identity of a wrapped tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Executable name
    pub name: String,
    /// Directory holding the executable; `None` searches PATH
    pub install_dir: Option<PathBuf>,
    /// Documentation link shown when things go wrong
    pub help_url: Option<String>,
    /// Regex expected right before the version number in `--version` output
    pub look_behind: String,
}

impl CommandSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            install_dir: None,
            help_url: None,
            look_behind: String::new(),
        }
    }

    pub fn with_install_dir(mut self, dir: PathBuf) -> Self {
        self.install_dir = Some(dir);
        self
    }

    pub fn with_help_url(mut self, url: impl Into<String>) -> Self {
        self.help_url = Some(url.into());
        self
    }

    pub fn with_look_behind(mut self, pattern: impl Into<String>) -> Self {
        self.look_behind = pattern.into();
        self
    }
}

/// Knobs shared by every invocation, usually taken from configuration
#[derive(Debug, Clone)]
pub struct ShimOptions {
    pub version_policy: VersionPolicy,
    pub timeout: Option<Duration>,
    pub interpreters: BTreeMap<String, String>,
}

impl Default for ShimOptions {
    fn default() -> Self {
        Self {
            version_policy: VersionPolicy::default(),
            timeout: None,
            interpreters: default_interpreters(),
        }
    }
}

/// A tool that has been located and, if asked, version-checked
#[derive(Debug, Clone)]
pub struct ShimCommand {
    pub spec: CommandSpec,
    pub args: InvocationArgs,
    executable: ResolvedExecutable,
    runner: ProcessRunner,
}

impl ShimCommand {
    /// Resolve the executable and enforce `--version` before anything runs
    ///
    /// An install directory parsed from the hook arguments takes precedence
    /// over the one in `spec`. A satisfied version check falls through so the
    /// tool still runs on the given paths.
    pub async fn prepare(
        mut spec: CommandSpec,
        args: InvocationArgs,
        options: &ShimOptions,
    ) -> ShimResult<Self> {
        if let Some(dir) = &args.install_dir {
            spec.install_dir = Some(dir.clone());
        }

        let executable = ExecutableResolver::new(&options.interpreters).resolve(&spec)?;
        let command = Self {
            spec,
            args,
            executable,
            runner: ProcessRunner::new(options.timeout),
        };

        if let Some(expected) = &command.args.expected_version {
            let actual = command.version().await?;
            version::assert_version(&command.spec.name, &actual, expected, options.version_policy)?;
        }

        Ok(command)
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn executable(&self) -> &ResolvedExecutable {
        &self.executable
    }

    /// Version reported by `<tool> --version`
    pub async fn version(&self) -> ShimResult<String> {
        let result = self.execute(&["--version".to_string()]).await?;
        let output = String::from_utf8_lossy(&result.stdout);
        version::parse_version(&self.spec.name, &self.spec.look_behind, &output)
    }

    /// Run the tool with exactly `args`
    pub async fn execute(&self, args: &[String]) -> ShimResult<ExecutionResult> {
        self.runner.run(&self.spec.name, &self.executable, args).await
    }

    /// Printable argv for diagnostics
    pub fn describe(&self, args: &[String]) -> String {
        self.executable.describe(args)
    }
}
