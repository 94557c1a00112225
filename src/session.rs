//! Player sessions
//!
//! Sessions are loaded from a YAML snapshot of the server's player list.
//! Lookups borrow from the registry; nothing here is ever written back.

use chrono::{DateTime, Utc};
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Stable identifier of a user account
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A connected or referenced player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,

    #[serde(default)]
    pub connected_at: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: UserId::new(user_id),
            username: username.into(),
            connected_at: None,
        }
    }
}

/// Read-only view of the server's sessions
pub trait SessionRegistry {
    /// Find a session by its exact display name
    fn session_by_username(&self, username: &str) -> Option<&Session>;

    /// Display names of every known session, for completion
    fn session_names(&self) -> Vec<String>;
}

#[derive(Debug, Default, Deserialize)]
struct SessionsFile {
    #[serde(default)]
    sessions: Vec<Session>,
}

/// Session registry backed by `sessions.yaml`
#[derive(Debug, Default)]
pub struct FileSessionRegistry {
    sessions: Vec<Session>,
}

impl FileSessionRegistry {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }

    /// Load sessions from a YAML file; a missing file means nobody is online
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No sessions file at {}", path.display());
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read sessions file: {}", path.display()))?;
        let file: SessionsFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse sessions file: {}", path.display()))?;

        log::info!("Loaded {} sessions from {}", file.sessions.len(), path.display());
        Ok(Self::new(file.sessions))
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter()
    }
}

impl SessionRegistry for FileSessionRegistry {
    fn session_by_username(&self, username: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.username == username)
    }

    fn session_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.sessions.iter().map(|s| s.username.clone()).collect();
        names.sort();
        names
    }
}
