//! `hookshim format`

use crate::cli::ToolArgs;
use crate::config::ShimConfig;
use crate::shim::{FormatterVerifier, ShimCommand};
use crate::tools::ToolKind;
use anyhow::Result;
use std::path::Path;

pub async fn execute(args: ToolArgs, config: &ShimConfig, root: &Path) -> Result<()> {
    let (_, command) = super::prepare(args, Some(ToolKind::Formatter), config, root).await?;
    verify(command).await
}

pub(crate) async fn verify(command: ShimCommand) -> Result<()> {
    if command.args.paths.is_empty() {
        tracing::info!("No files to check for {}", command.name());
    }
    FormatterVerifier::new(command).verify_all().await?;
    Ok(())
}
