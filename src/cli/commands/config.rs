//! Configuration command implementations

use crate::cli::ConfigCommands;
use crate::config::ShimConfig;
use anyhow::Result;

/// Execute config commands
pub fn execute(cmd: ConfigCommands, config: &ShimConfig) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show(config),
    }
}

/// Plain TOML on stdout so it can be redirected into a config file
fn show(config: &ShimConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}
