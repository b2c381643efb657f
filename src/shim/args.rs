//! Splitting hook arguments into shim options, tool options and paths
//!
//! `--install-dir`/`--install-path` and `--version` belong to the shim and are
//! accepted as `--flag=value` or `--flag value`. Everything else that starts
//! with `-` is forwarded to the tool untouched. Because `--flag value` is
//! ambiguous for options the shim does not know, tool options must be written
//! as `--flag=value`; a bare token is always a path.

use super::error::{ShimError, ShimResult};
use std::path::PathBuf;

const INSTALL_DIR_FLAG: &str = "--install-dir";
const INSTALL_PATH_FLAG: &str = "--install-path";
const VERSION_FLAG: &str = "--version";

/// Per-run state produced by [`ArgSplitter`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationArgs {
    /// Arguments forwarded to the tool, in order
    pub tool_args: Vec<String>,
    /// Files the tool should act on, in order
    pub paths: Vec<String>,
    /// Version the installed tool must satisfy
    pub expected_version: Option<String>,
    /// Validated, absolute install directory
    pub install_dir: Option<PathBuf>,
    /// Formatter rewrites files instead of printing them
    pub edit_in_place: bool,
}

impl InvocationArgs {
    /// Add a default tool argument unless the caller already set the same option
    ///
    /// Options are compared by key, the text before `=`, so a default of
    /// `--error-exitcode=1` is skipped when `--error-exitcode=2` was given.
    pub fn add_if_missing<S: AsRef<str>>(&mut self, new_args: &[S]) {
        let Some(first) = new_args.first() else {
            return;
        };
        let key = option_key(first.as_ref());
        if self.tool_args.iter().any(|arg| option_key(arg) == key) {
            return;
        }
        self.tool_args
            .extend(new_args.iter().map(|arg| arg.as_ref().to_string()));
    }

    /// Switch to edit-in-place when one of `flags` appears among the tool args
    pub fn detect_in_place<S: AsRef<str>>(&mut self, flags: &[S]) {
        let found = self
            .tool_args
            .iter()
            .any(|arg| flags.iter().any(|flag| option_key(arg) == flag.as_ref()));
        self.edit_in_place |= found;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShimOption {
    InstallDir,
    Version,
}

/// Separates shim-only arguments from the ones meant for the tool
pub struct ArgSplitter<'a> {
    command: &'a str,
}

impl<'a> ArgSplitter<'a> {
    pub fn new(command: &'a str) -> Self {
        Self { command }
    }

    /// Split a full argv, dropping the program name in front
    pub fn split_argv<I, S>(&self, argv: I) -> ShimResult<InvocationArgs>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.split(argv.into_iter().skip(1))
    }

    /// Split hook arguments (no program name)
    pub fn split<I, S>(&self, args: I) -> ShimResult<InvocationArgs>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = InvocationArgs::default();
        let mut tokens = args.into_iter().map(Into::into).peekable();
        let mut only_paths = false;

        while let Some(token) = tokens.next() {
            if only_paths {
                parsed.paths.push(token);
                continue;
            }
            if token == "--" {
                only_paths = true;
                continue;
            }

            if let Some((option, inline)) = parse_shim_option(&token) {
                let flag = token.split('=').next().unwrap_or(&token).to_string();
                let value = match inline {
                    Some(value) => Some(value.to_string()),
                    None => tokens.next_if(|next| !next.starts_with("--")),
                };
                let value = value
                    .filter(|value| !value.is_empty())
                    .ok_or_else(|| ShimError::InvalidArgument {
                        command: self.command.to_string(),
                        flag,
                    })?;

                match option {
                    ShimOption::InstallDir => {
                        parsed.install_dir = Some(self.validate_install_dir(&value)?)
                    }
                    ShimOption::Version => parsed.expected_version = Some(value),
                }
                continue;
            }

            if token.starts_with('-') {
                parsed.tool_args.push(token);
            } else {
                parsed.paths.push(token);
            }
        }

        tracing::debug!(
            "Split arguments for {}: tool args {:?}, {} path(s)",
            self.command,
            parsed.tool_args,
            parsed.paths.len()
        );
        Ok(parsed)
    }

    fn validate_install_dir(&self, raw: &str) -> ShimResult<PathBuf> {
        let path = PathBuf::from(raw);
        let invalid = || ShimError::InvalidInstallPath {
            command: self.command.to_string(),
            path: PathBuf::from(raw),
        };
        if !path.is_dir() {
            return Err(invalid());
        }
        path.canonicalize().map_err(|_| invalid())
    }
}

fn parse_shim_option(token: &str) -> Option<(ShimOption, Option<&str>)> {
    let (key, value) = match token.split_once('=') {
        Some((key, value)) => (key, Some(value)),
        None => (token, None),
    };
    let option = match key {
        INSTALL_DIR_FLAG | INSTALL_PATH_FLAG => ShimOption::InstallDir,
        VERSION_FLAG => ShimOption::Version,
        _ => return None,
    };
    Some((option, value))
}

fn option_key(arg: &str) -> &str {
    arg.split('=').next().unwrap_or(arg)
}
