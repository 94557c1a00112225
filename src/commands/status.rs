//! Loaded data status command
//!
//! Shows what adminsh sees: where its data comes from and how much was loaded.

use colored::*;
use eyre::Result;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::server::ServerData;

#[derive(Serialize)]
struct Status {
    version: String,
    data_dir: String,
    sessions_file: String,
    preferences_file: String,
    prototypes_dir: String,
    locale_file: String,
    sessions: Vec<SessionStatus>,
    preference_records: usize,
    prototypes: Vec<PrototypeStatus>,
    locale_strings: usize,
    admins: Vec<AdminStatus>,
}

#[derive(Serialize)]
struct SessionStatus {
    username: String,
    user_id: String,
    connected_at: Option<String>,
}

#[derive(Serialize)]
struct PrototypeStatus {
    kind: String,
    count: usize,
}

#[derive(Serialize)]
struct AdminStatus {
    username: String,
    flags: Vec<String>,
}

pub fn run(format: OutputFormat, config: &Config) -> Result<()> {
    let data = ServerData::load(config)?;

    let sessions: Vec<SessionStatus> = data
        .sessions
        .iter()
        .map(|s| SessionStatus {
            username: s.username.clone(),
            user_id: s.user_id.to_string(),
            connected_at: s.connected_at.map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string()),
        })
        .collect();

    let prototypes: Vec<PrototypeStatus> = data
        .prototypes
        .kinds()
        .map(|(kind, count)| PrototypeStatus {
            kind: kind.to_string(),
            count,
        })
        .collect();

    let mut admins: Vec<AdminStatus> = config
        .admins
        .iter()
        .map(|(username, flags)| AdminStatus {
            username: username.clone(),
            flags: flags.iter().map(|f| f.to_string()).collect(),
        })
        .collect();
    admins.sort_by(|a, b| a.username.cmp(&b.username));

    let status = Status {
        version: env!("CARGO_PKG_VERSION").to_string(),
        data_dir: Config::adminsh_dir().display().to_string(),
        sessions_file: Config::expand_path(&config.paths.sessions).display().to_string(),
        preferences_file: Config::expand_path(&config.paths.preferences).display().to_string(),
        prototypes_dir: Config::expand_path(&config.paths.prototypes).display().to_string(),
        locale_file: Config::expand_path(&config.paths.locale).display().to_string(),
        sessions,
        preference_records: data.preferences.len(),
        prototypes,
        locale_strings: data.locale.len(),
        admins,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&status)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&status)?),
        OutputFormat::Text => print_text_status(&status),
    }

    Ok(())
}

fn print_text_status(status: &Status) {
    println!("{}", "adminsh Status".bold());
    println!();

    println!("  {:14} {}", "Version:".dimmed(), status.version);
    println!("  {:14} {}", "Data Dir:".dimmed(), status.data_dir);
    println!();

    // Sessions
    println!(
        "{} ({}):",
        "Sessions".cyan(),
        format!("{} known", status.sessions.len()).dimmed()
    );
    if status.sessions.is_empty() {
        println!("  {}", "(none)".dimmed());
    } else {
        for session in &status.sessions {
            let connected = session
                .connected_at
                .as_ref()
                .map(|t| format!("(since {})", t).dimmed().to_string())
                .unwrap_or_default();
            println!(
                "  {} {} {} {}",
                "●".green(),
                session.username.green(),
                session.user_id.dimmed(),
                connected
            );
        }
    }
    println!("  {}", status.sessions_file.dimmed());
    println!();

    // Preferences
    println!(
        "{} ({} records):",
        "Preferences".cyan(),
        status.preference_records.to_string().yellow()
    );
    println!("  {}", status.preferences_file.dimmed());
    println!();

    // Prototypes
    let total: usize = status.prototypes.iter().map(|p| p.count).sum();
    println!(
        "{} ({}):",
        "Prototypes".cyan(),
        format!("{} loaded", total).dimmed()
    );
    if status.prototypes.is_empty() {
        println!("  {}", "(none)".dimmed());
    } else {
        for proto in &status.prototypes {
            println!("  {:15} {:>5}", proto.kind, proto.count.to_string().yellow());
        }
    }
    println!("  {}", status.prototypes_dir.dimmed());
    println!();

    // Locale
    println!(
        "{} ({} strings):",
        "Locale".cyan(),
        status.locale_strings.to_string().yellow()
    );
    println!("  {}", status.locale_file.dimmed());
    println!();

    // Admins
    println!(
        "{} ({}):",
        "Admins".cyan(),
        format!("{} configured", status.admins.len()).dimmed()
    );
    if status.admins.is_empty() {
        println!("  {}", "(none)".dimmed());
    } else {
        for admin in &status.admins {
            let flags = if admin.flags.is_empty() {
                "(no flags)".dimmed().to_string()
            } else {
                admin.flags.join(", ").cyan().to_string()
            };
            println!("  {} {} {}", "✓".green(), admin.username, flags);
        }
    }
}
