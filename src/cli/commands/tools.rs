//! `hookshim tools`: what the shim knows about each tool

use crate::cli::Output;
use crate::config::ShimConfig;
use anyhow::Result;

pub fn execute(config: &ShimConfig, output: &Output) -> Result<()> {
    output.header("Known tools");

    for profile in config.registry().profiles() {
        let help_url = profile.help_url.as_deref().unwrap_or("-");
        output.table_row(&profile.name, &format!("{:<10} {help_url}", profile.kind));

        if output.is_verbose() {
            output.indent(&format!("version after: {:?}", profile.look_behind));
        }
        if !profile.default_args.is_empty() {
            output.indent(&format!("default args: {}", profile.default_args.join(" ")));
        }
        if !profile.in_place_flags.is_empty() {
            output.indent(&format!("in-place flags: {}", profile.in_place_flags.join(" ")));
        }
    }

    output.blank_line();
    output.info("Add or change tools under [tools.<name>] in hookshim.toml");
    Ok(())
}
