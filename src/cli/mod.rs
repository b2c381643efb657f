//! Command-line interface for hookshim
//!
//! Every hook run goes through one subcommand here. Failures travel back up as
//! errors and are turned into a report and an exit code in exactly one place,
//! [`Cli::run`].

use crate::config::ShimConfig;
use crate::shim::{ShimError, VersionPolicy};
use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod output;

pub use output::Output;

/// hookshim - run static analyzers and formatters as pre-commit hooks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long)]
    pub quiet: bool,

    /// Configuration file to use instead of the user and repository files
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long = "directory", value_name = "DIR")]
    pub directory: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a static analyzer over the given (or staged) files
    Analyze(ToolArgs),
    /// Fail if any file differs from the formatter's output
    Format(ToolArgs),
    /// Analyze or format depending on the tool's profile
    Run(ToolArgs),
    /// List known tool profiles
    Tools,
    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the merged configuration as TOML
    Show,
}

/// A tool plus everything the hook passed to it
///
/// Shim options must come before TOOL. Everything after TOOL is a hook
/// argument: paths, `--install-dir <DIR>`, `--version <EXPECTED>`, and options
/// forwarded to the tool (written as `--flag=value`).
#[derive(Args, Debug, Clone)]
pub struct ToolArgs {
    /// Regex that precedes the version number in `TOOL --version`
    #[arg(long, value_name = "REGEX")]
    pub look_behind: Option<String>,

    /// Documentation link shown in diagnostics
    #[arg(long, value_name = "URL")]
    pub help_url: Option<String>,

    /// The formatter rewrites files instead of printing them
    #[arg(long)]
    pub in_place: bool,

    /// How --version <EXPECTED> is compared with the installed version
    #[arg(long, value_enum, value_name = "POLICY")]
    pub version_policy: Option<VersionPolicy>,

    /// Kill the tool after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Executable name of the tool
    pub tool: String,

    /// Arguments from the hook
    #[arg(
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "HOOK_ARGS"
    )]
    pub hook_args: Vec<String>,
}

impl Cli {
    /// Execute the CLI command and map the outcome to a process exit code
    pub async fn run(self) -> ExitCode {
        setup_logging(self.verbose, self.quiet);
        let output = Output::new(self.verbose > 0, self.quiet);

        match self.dispatch(&output).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => report_failure(&err, &output),
        }
    }

    async fn dispatch(self, output: &Output) -> Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Failed to change directory to {}", dir.display()))?;
        }
        let root = std::env::current_dir().context("Failed to get current directory")?;
        let config = ShimConfig::load(&root, self.config.as_deref())?;

        match self.command {
            Commands::Analyze(args) => commands::analyze::execute(args, &config, &root).await,
            Commands::Format(args) => commands::format::execute(args, &config, &root).await,
            Commands::Run(args) => commands::run::execute(args, &config, &root).await,
            Commands::Tools => commands::tools::execute(&config, output),
            Commands::Config(cmd) => commands::config::execute(cmd, &config),
        }
    }
}

/// Write the failure to stderr and pick the exit code
fn report_failure(err: &anyhow::Error, output: &Output) -> ExitCode {
    match err.downcast_ref::<ShimError>() {
        Some(shim_err) => {
            tracing::debug!("{} failed: {shim_err}", shim_err.command());
            output.diagnostic(&shim_err.report());
            exit_code(shim_err.exit_code())
        }
        None => {
            output.error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Codes that don't fit a process exit status become a plain failure
fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(exit_status(code))
}

fn exit_status(code: i32) -> u8 {
    u8::try_from(code)
        .ok()
        .filter(|code| *code != 0)
        .unwrap_or(1)
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // stdout belongs to the wrapped tool and `config show`
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
