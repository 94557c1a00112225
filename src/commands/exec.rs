//! Run one console command and render its output

use colored::*;
use eyre::Result;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::console::{LineLevel, ShellLine};
use crate::server::ServerData;

#[derive(Serialize)]
struct ExecOutput<'a> {
    command: &'a str,
    args: &'a [String],
    lines: &'a [ShellLine],
}

pub fn run(
    operator: Option<&str>,
    format: OutputFormat,
    name: &str,
    args: &[String],
    quiet: bool,
    config: &Config,
) -> Result<()> {
    let data = ServerData::load(config)?;
    let host = data.host()?;

    let lines = match data.open_shell(config, operator) {
        Some(mut shell) => {
            host.execute(&mut shell, name, args);
            shell.into_lines()
        }
        None => {
            let username = operator.unwrap_or_default();
            log::warn!("No session for operator {}", username);
            vec![ShellLine {
                level: LineLevel::Error,
                text: data
                    .locale
                    .get_string_with("shell-invoker-not-found", &[("username", username)]),
            }]
        }
    };

    match format {
        OutputFormat::Json => {
            let output = ExecOutput {
                command: name,
                args,
                lines: &lines,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Yaml => {
            let output = ExecOutput {
                command: name,
                args,
                lines: &lines,
            };
            println!("{}", serde_yaml::to_string(&output)?);
        }
        OutputFormat::Text => print_lines(&lines, quiet),
    }

    Ok(())
}

/// Info lines to stdout, errors to stderr
pub fn print_lines(lines: &[ShellLine], quiet: bool) {
    for line in lines {
        match line.level {
            LineLevel::Info if !quiet => println!("{}", line.text),
            LineLevel::Info => {}
            LineLevel::Error => eprintln!("{}", line.text.red()),
        }
    }
}
