//! `hookshim analyze`

use crate::cli::ToolArgs;
use crate::config::ShimConfig;
use crate::shim::{AnalyzerRunner, ShimCommand};
use crate::tools::ToolKind;
use anyhow::Result;
use std::path::Path;

pub async fn execute(args: ToolArgs, config: &ShimConfig, root: &Path) -> Result<()> {
    let (_, command) = super::prepare(args, Some(ToolKind::Analyzer), config, root).await?;
    analyze(command).await
}

pub(crate) async fn analyze(command: ShimCommand) -> Result<()> {
    AnalyzerRunner::new(command).run_command().await?;
    Ok(())
}
