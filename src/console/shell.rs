//! Invocation context for console commands

use serde::Serialize;

use super::AdminFlag;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineLevel {
    Info,
    Error,
}

/// One line of command output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShellLine {
    pub level: LineLevel,
    pub text: String,
}

/// Who is running a command, what they may do, and where output goes.
///
/// Output is buffered in emission order; the caller decides how to render it.
#[derive(Debug)]
pub struct Shell {
    player: Option<Session>,
    flags: Vec<AdminFlag>,
    lines: Vec<ShellLine>,
}

impl Shell {
    /// The server console: no player session, every flag
    pub fn server_console() -> Self {
        Self {
            player: None,
            flags: AdminFlag::ALL.to_vec(),
            lines: Vec::new(),
        }
    }

    /// An operator connected with their own session
    pub fn operator(session: Session, flags: Vec<AdminFlag>) -> Self {
        Self {
            player: Some(session),
            flags,
            lines: Vec::new(),
        }
    }

    pub fn player(&self) -> Option<&Session> {
        self.player.as_ref()
    }

    /// Display name of the invoker, for logs
    pub fn invoker_name(&self) -> &str {
        self.player.as_ref().map(|s| s.username.as_str()).unwrap_or("server console")
    }

    pub fn has_flag(&self, flag: AdminFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn write_line(&mut self, text: impl Into<String>) {
        self.lines.push(ShellLine {
            level: LineLevel::Info,
            text: text.into(),
        });
    }

    pub fn write_error(&mut self, text: impl Into<String>) {
        self.lines.push(ShellLine {
            level: LineLevel::Error,
            text: text.into(),
        });
    }

    pub fn lines(&self) -> &[ShellLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<ShellLine> {
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_console_has_every_flag() {
        let shell = Shell::server_console();
        assert!(shell.player().is_none());
        assert!(AdminFlag::ALL.iter().all(|f| shell.has_flag(*f)));
        assert_eq!(shell.invoker_name(), "server console");
    }

    #[test]
    fn test_operator_flags() {
        let shell = Shell::operator(Session::new("u-1", "alice"), vec![AdminFlag::Logs]);
        assert!(shell.has_flag(AdminFlag::Logs));
        assert!(!shell.has_flag(AdminFlag::Ban));
        assert_eq!(shell.invoker_name(), "alice");
    }

    #[test]
    fn test_lines_keep_order() {
        let mut shell = Shell::server_console();
        shell.write_line("one");
        shell.write_error("two");
        shell.write_line("three");

        let levels: Vec<LineLevel> = shell.lines().iter().map(|l| l.level).collect();
        assert_eq!(levels, vec![LineLevel::Info, LineLevel::Error, LineLevel::Info]);
        assert_eq!(shell.into_lines()[2].text, "three");
    }
}
