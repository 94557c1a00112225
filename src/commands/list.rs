//! List console commands

use colored::*;
use eyre::Result;

use crate::config::Config;
use crate::server::ServerData;

pub fn run(verbose: bool, config: &Config) -> Result<()> {
    let data = ServerData::load(config)?;
    let host = data.host()?;

    println!("{}", "Console commands:".bold());
    println!();

    for command in host.commands() {
        let flag = command
            .required_flag()
            .map(|f| format!("[{}]", f).yellow().to_string())
            .unwrap_or_default();
        println!("  {} {} {}", command.name().green(), flag, command.description().dimmed());

        if verbose {
            for line in command.help().lines() {
                println!("      {}", line);
            }
        }
    }

    Ok(())
}
