//! Console command framework
//!
//! This module handles:
//! - The command table and dispatch by name
//! - Admin flag checks before a command runs
//! - Completion hints for interactive shells

use eyre::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod completion;
pub mod shell;

pub use completion::CompletionResult;
pub use shell::{LineLevel, Shell, ShellLine};

use crate::locale::Localization;

/// Admin permission flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminFlag {
    Admin,
    Ban,
    Debug,
    Fun,
    Host,
    Logs,
    Query,
    Server,
    Spawn,
}

impl AdminFlag {
    pub const ALL: [AdminFlag; 9] = [
        AdminFlag::Admin,
        AdminFlag::Ban,
        AdminFlag::Debug,
        AdminFlag::Fun,
        AdminFlag::Host,
        AdminFlag::Logs,
        AdminFlag::Query,
        AdminFlag::Server,
        AdminFlag::Spawn,
    ];
}

impl fmt::Display for AdminFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format!("{:?}", self).to_lowercase())
    }
}

/// A command runnable from the admin console
pub trait ConsoleCommand {
    /// Name typed at the console
    fn name(&self) -> &'static str;

    fn description(&self) -> String;

    fn help(&self) -> String;

    /// Flag the invoker must hold; `None` means anyone may run it
    fn required_flag(&self) -> Option<AdminFlag> {
        None
    }

    fn execute(&self, shell: &mut Shell, args: &[String]);

    /// Suggestions for the last element of `args`
    fn completion(&self, _shell: &Shell, _args: &[String]) -> CompletionResult {
        CompletionResult::empty()
    }
}

/// Registered console commands, in registration order
pub struct ConsoleHost<'a> {
    commands: IndexMap<&'static str, Box<dyn ConsoleCommand + 'a>>,
    loc: &'a Localization,
}

impl<'a> ConsoleHost<'a> {
    pub fn new(loc: &'a Localization) -> Self {
        Self {
            commands: IndexMap::new(),
            loc,
        }
    }

    pub fn register(&mut self, command: Box<dyn ConsoleCommand + 'a>) -> Result<()> {
        let name = command.name();
        if self.commands.contains_key(name) {
            eyre::bail!("Console command {} is already registered", name);
        }
        log::debug!("Registered console command: {}", name);
        self.commands.insert(name, command);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&(dyn ConsoleCommand + 'a)> {
        self.commands.get(name).map(|c| c.as_ref())
    }

    pub fn commands(&self) -> impl Iterator<Item = &(dyn ConsoleCommand + 'a)> {
        self.commands.values().map(|c| c.as_ref())
    }

    /// Run `name` if it exists and the shell may use it; failures become error lines
    pub fn execute(&self, shell: &mut Shell, name: &str, args: &[String]) {
        let Some(command) = self.get(name) else {
            log::info!("{} tried unknown command: {}", shell.invoker_name(), name);
            shell.write_error(self.loc.get_string_with("shell-command-not-found", &[("command", name)]));
            return;
        };

        if let Some(flag) = command.required_flag()
            && !shell.has_flag(flag)
        {
            log::warn!("{} denied {}: missing {} flag", shell.invoker_name(), name, flag);
            let flag = flag.to_string();
            shell.write_error(
                self.loc
                    .get_string_with("shell-missing-required-permission", &[("flag", flag.as_str()), ("command", name)]),
            );
            return;
        }

        log::info!("{} ran: {} {}", shell.invoker_name(), name, args.join(" "));
        command.execute(shell, args);
    }

    /// Completion for `name`; unknown or forbidden commands suggest nothing
    pub fn completion(&self, shell: &Shell, name: &str, args: &[String]) -> CompletionResult {
        match self.get(name) {
            Some(command) if command.required_flag().is_none_or(|flag| shell.has_flag(flag)) => {
                command.completion(shell, args)
            }
            _ => CompletionResult::empty(),
        }
    }
}
