//! `hookshim run`: analyze or format, whichever the tool's profile says

use crate::cli::ToolArgs;
use crate::config::ShimConfig;
use crate::tools::ToolKind;
use anyhow::Result;
use std::path::Path;

pub async fn execute(args: ToolArgs, config: &ShimConfig, root: &Path) -> Result<()> {
    let (profile, command) = super::prepare(args, None, config, root).await?;

    match profile.kind {
        ToolKind::Analyzer => super::analyze::analyze(command).await,
        ToolKind::Formatter => super::format::verify(command).await,
    }
}
