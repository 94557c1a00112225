use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "adminsh",
    about = "Administrative console for inspecting game server player data",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to the configured logs directory (default: ~/.config/adminsh/logs/adminsh.log)"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to adminsh.yaml config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, help = "Suppress non-error output")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a console command
    Exec {
        /// Run as this operator's session instead of the server console
        #[arg(long = "as", value_name = "USERNAME")]
        operator: Option<String>,

        /// Output format
        #[arg(long, short = 'o', value_enum, default_value = "text")]
        format: OutputFormat,

        /// Console command name (e.g. lstraits)
        name: String,

        /// Command arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Show completion hints for a partially typed console command
    Complete {
        /// Complete as this operator's session instead of the server console
        #[arg(long = "as", value_name = "USERNAME")]
        operator: Option<String>,

        /// Console command name
        name: String,

        /// Arguments typed so far; the last one is being completed
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// List available console commands
    Commands,

    /// Show loaded data status
    Status {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exec() {
        let cli = Cli::parse_from(["adminsh", "exec", "--as", "alice", "lstraits", "bob", "extra"]);
        match cli.command {
            Commands::Exec {
                operator,
                format,
                name,
                args,
            } => {
                assert_eq!(operator.as_deref(), Some("alice"));
                assert_eq!(format, OutputFormat::Text);
                assert_eq!(name, "lstraits");
                assert_eq!(args, vec!["bob".to_string(), "extra".to_string()]);
            }
            _ => panic!("expected exec"),
        }
    }

    #[test]
    fn test_parse_exec_without_args() {
        let cli = Cli::parse_from(["adminsh", "exec", "-o", "json", "lstraits"]);
        match cli.command {
            Commands::Exec { format, args, .. } => {
                assert_eq!(format, OutputFormat::Json);
                assert!(args.is_empty());
            }
            _ => panic!("expected exec"),
        }
    }

    #[test]
    fn test_parse_complete_with_empty_token() {
        let cli = Cli::parse_from(["adminsh", "complete", "lstraits", ""]);
        match cli.command {
            Commands::Complete { name, args, .. } => {
                assert_eq!(name, "lstraits");
                assert_eq!(args, vec![String::new()]);
            }
            _ => panic!("expected complete"),
        }
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
