//! Command implementations for the hookshim CLI
//!
//! `analyze`, `format` and `run` share [`prepare`], which turns the command
//! line into a located, version-checked [`ShimCommand`].

pub mod analyze;
pub mod config;
pub mod format;
pub mod run;
pub mod tools;

use crate::cli::ToolArgs;
use crate::config::ShimConfig;
use crate::git;
use crate::shim::{ArgSplitter, ShimCommand};
use crate::tools::{ToolKind, ToolProfile};
use anyhow::Result;
use std::path::Path;
use std::time::Duration;

/// Resolve the profile for `args.tool`, split the hook arguments and ready the tool
///
/// `kind` forces analyzer or formatter handling; `None` keeps the profile's.
/// Without explicit paths the files added in the current commit are used.
pub(crate) async fn prepare(
    args: ToolArgs,
    kind: Option<ToolKind>,
    config: &ShimConfig,
    root: &Path,
) -> Result<(ToolProfile, ShimCommand)> {
    let mut profile = config.registry().profile(&args.tool);
    if let Some(kind) = kind {
        profile.kind = kind;
    }
    if let Some(look_behind) = args.look_behind {
        profile.look_behind = look_behind;
    }
    if let Some(help_url) = args.help_url {
        profile.help_url = Some(help_url);
    }

    let mut invocation = ArgSplitter::new(&args.tool).split(args.hook_args)?;
    profile.configure(&mut invocation);
    invocation.edit_in_place |= args.in_place;

    if invocation.paths.is_empty() {
        invocation.paths = git::staged_paths(&args.tool, root)?;
    }

    let mut options = config.shim_options();
    if let Some(policy) = args.version_policy {
        options.version_policy = policy;
    }
    if let Some(secs) = args.timeout {
        options.timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }

    tracing::info!(
        "Running {} as {} on {} file(s)",
        profile.name,
        profile.kind,
        invocation.paths.len()
    );
    let command = ShimCommand::prepare(profile.command_spec(), invocation, &options).await?;
    Ok((profile, command))
}
