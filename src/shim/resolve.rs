//! Locating the wrapped executable

use super::CommandSpec;
use super::error::{ShimError, ShimResult};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Script suffixes that are run through an interpreter instead of directly
pub fn default_interpreters() -> BTreeMap<String, String> {
    [("py", "python3"), ("sh", "sh"), ("pl", "perl"), ("rb", "ruby")]
        .into_iter()
        .map(|(suffix, program)| (suffix.to_string(), program.to_string()))
        .collect()
}

/// A located executable, plus the interpreter needed to run it if it is a script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedExecutable {
    pub path: PathBuf,
    pub interpreter: Option<String>,
}

impl ResolvedExecutable {
    /// Program to spawn and the full argument list to give it
    pub fn command_line(&self, args: &[String]) -> (OsString, Vec<OsString>) {
        let tool_args = args.iter().map(OsString::from);
        match &self.interpreter {
            Some(interpreter) => (
                OsString::from(interpreter),
                std::iter::once(self.path.clone().into_os_string())
                    .chain(tool_args)
                    .collect(),
            ),
            None => (self.path.clone().into_os_string(), tool_args.collect()),
        }
    }

    /// Printable argv for diagnostics
    pub fn describe(&self, args: &[String]) -> String {
        let (program, argv) = self.command_line(args);
        let mut parts = vec![program.to_string_lossy().into_owned()];
        parts.extend(argv.iter().map(|arg| arg.to_string_lossy().into_owned()));
        format!("{parts:?}")
    }
}

/// Finds executables on PATH or under an explicit install directory
pub struct ExecutableResolver<'a> {
    interpreters: &'a BTreeMap<String, String>,
}

impl<'a> ExecutableResolver<'a> {
    pub fn new(interpreters: &'a BTreeMap<String, String>) -> Self {
        Self { interpreters }
    }

    pub fn resolve(&self, spec: &CommandSpec) -> ShimResult<ResolvedExecutable> {
        let found = match &spec.install_dir {
            Some(dir) => find_in_dir(dir, &spec.name),
            None => which::which(&spec.name).ok(),
        };

        let path = found.ok_or_else(|| ShimError::ExecutableNotFound {
            command: spec.name.clone(),
            location: spec.install_dir.clone(),
            help_url: spec.help_url.clone(),
        })?;

        let interpreter = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.interpreters.get(&ext.to_ascii_lowercase()))
            .cloned();

        tracing::debug!(
            "Resolved {} to {}{}",
            spec.name,
            path.display(),
            interpreter
                .as_deref()
                .map(|i| format!(" (via {i})"))
                .unwrap_or_default()
        );

        Ok(ResolvedExecutable { path, interpreter })
    }
}

fn find_in_dir(dir: &Path, name: &str) -> Option<PathBuf> {
    let candidate = dir.join(name);
    if candidate.is_file() {
        return Some(candidate);
    }
    let suffix = std::env::consts::EXE_SUFFIX;
    if suffix.is_empty() {
        return None;
    }
    let with_suffix = dir.join(format!("{name}{suffix}"));
    with_suffix.is_file().then_some(with_suffix)
}
