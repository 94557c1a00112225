use colored::*;
use eyre::Result;

use crate::config::Config;
use crate::server::ServerData;

pub fn run(operator: Option<&str>, name: &str, args: &[String], config: &Config) -> Result<()> {
    let data = ServerData::load(config)?;
    let host = data.host()?;

    // Unknown operators get nothing, same as a forbidden command
    let Some(shell) = data.open_shell(config, operator) else {
        log::debug!("No session for operator {}, no completions", operator.unwrap_or_default());
        return Ok(());
    };

    let result = host.completion(&shell, name, args);
    if result.is_empty() {
        log::debug!("No completions for {} {}", name, args.join(" "));
    }
    for option in &result.options {
        println!("{}", option);
    }
    if let Some(hint) = &result.hint {
        println!("{} {}", "hint:".dimmed(), hint);
    }

    Ok(())
}
