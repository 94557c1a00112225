use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::fs;

use adminsh::cli::{self, Cli, Commands};
use adminsh::commands;
use adminsh::config::Config;

fn setup_logging(config: &Config) -> Result<()> {
    let log_level = &config.log_level;
    let log_dir = Config::expand_path(&config.paths.logs);

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("adminsh.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG env var takes precedence, otherwise use config log_level
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(log_level.to_level_filter());
    }

    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    info!(
        "Log level: {} (from {})",
        log_level.as_filter(),
        if std::env::var("RUST_LOG").is_ok() { "RUST_LOG env" } else { "config" }
    );
    Ok(())
}

fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Exec {
            operator,
            format,
            name,
            args,
        } => commands::exec::run(operator.as_deref(), format, &name, &args, cli.quiet, &config),
        Commands::Complete { operator, name, args } => {
            commands::complete::run(operator.as_deref(), &name, &args, &config)
        }
        Commands::Commands => commands::list::run(cli.verbose, &config),
        Commands::Status { format } => commands::status::run(cli::OutputFormat::resolve(format), &config),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments first
    let cli = Cli::parse();

    // Load configuration (before logging, so log messages in Config::load are silent)
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(&config).context("Failed to setup logging")?;

    info!("Starting adminsh with config from: {:?}", cli.config);

    run(cli, config).context("Command failed")?;

    Ok(())
}
