use clap::CommandFactory;
use clap_complete::{Shell, generate};
use eyre::Result;
use std::io::{self, Write};

use crate::cli::Cli;

const BIN_NAME: &str = "adminsh";

pub fn run(shell: Shell) -> Result<()> {
    write_script(shell, &mut io::stdout())?;
    Ok(())
}

/// Completion script for `shell`, covering every subcommand
pub fn write_script(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, BIN_NAME, out);
    log::debug!("Generated {} completions for {}", shell, BIN_NAME);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_script_names_subcommands() {
        let mut buf = Vec::new();
        write_script(Shell::Bash, &mut buf).unwrap();
        let script = String::from_utf8(buf).unwrap();

        assert!(script.contains(BIN_NAME));
        for sub in ["exec", "complete", "commands", "status"] {
            assert!(script.contains(sub), "missing {}", sub);
        }
    }
}
