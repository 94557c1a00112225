//! Loaded server state shared by every console command

use eyre::{Context, Result};

use crate::admin;
use crate::config::Config;
use crate::console::{ConsoleHost, Shell};
use crate::locale::Localization;
use crate::preferences::FilePreferencesCache;
use crate::prototype::FilePrototypeRegistry;
use crate::session::{FileSessionRegistry, SessionRegistry};

pub struct ServerData {
    pub sessions: FileSessionRegistry,
    pub preferences: FilePreferencesCache,
    pub prototypes: FilePrototypeRegistry,
    pub locale: Localization,
}

impl ServerData {
    /// Load every data source named in the config
    pub fn load(config: &Config) -> Result<Self> {
        let paths = &config.paths;

        let sessions =
            FileSessionRegistry::load(&Config::expand_path(&paths.sessions)).context("Failed to load sessions")?;
        let preferences = FilePreferencesCache::load(&Config::expand_path(&paths.preferences))
            .context("Failed to load preferences")?;
        let prototypes = FilePrototypeRegistry::load(&Config::expand_path(&paths.prototypes))
            .context("Failed to load prototypes")?;
        let locale = Localization::load(&Config::expand_path(&paths.locale)).context("Failed to load locale")?;

        Ok(Self {
            sessions,
            preferences,
            prototypes,
            locale,
        })
    }

    /// Console host with all admin commands registered
    pub fn host(&self) -> Result<ConsoleHost<'_>> {
        let mut host = ConsoleHost::new(&self.locale);
        admin::register_all(&mut host, self)?;
        Ok(host)
    }

    /// Shell for the server console, or for `operator` if given.
    ///
    /// Returns `None` when the operator has no session.
    pub fn open_shell(&self, config: &Config, operator: Option<&str>) -> Option<Shell> {
        let Some(username) = operator else {
            return Some(Shell::server_console());
        };

        let session = self.sessions.session_by_username(username)?;
        Some(Shell::operator(session.clone(), config.admin_flags(username)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::AdminFlag;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(dir: &TempDir) -> Config {
        let mut config = Config::default();
        config.paths.sessions = dir.path().join("sessions.yaml");
        config.paths.preferences = dir.path().join("preferences.yaml");
        config.paths.prototypes = dir.path().join("prototypes");
        config.paths.locale = dir.path().join("locale.yaml");
        config
    }

    #[test]
    fn test_load_empty_directory() {
        let temp = TempDir::new().unwrap();
        let data = ServerData::load(&config_for(&temp)).unwrap();

        assert!(data.sessions.is_empty());
        assert!(data.preferences.is_empty());
        assert!(data.prototypes.is_empty());

        let host = data.host().unwrap();
        let names: Vec<&str> = host.commands().map(|c| c.name()).collect();
        assert_eq!(names, vec!["lstraits"]);
    }

    #[test]
    fn test_open_shell() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("sessions.yaml"),
            "sessions:\n  - user_id: u-1\n    username: alice\n",
        )
        .unwrap();

        let mut config = config_for(&temp);
        config.admins = HashMap::from([("alice".to_string(), vec![AdminFlag::Logs])]);
        let data = ServerData::load(&config).unwrap();

        let console = data.open_shell(&config, None).unwrap();
        assert!(console.player().is_none());

        let alice = data.open_shell(&config, Some("alice")).unwrap();
        assert_eq!(alice.player().unwrap().username, "alice");
        assert!(alice.has_flag(AdminFlag::Logs));
        assert!(!alice.has_flag(AdminFlag::Host));

        assert!(data.open_shell(&config, Some("mallory")).is_none());
    }

    #[test]
    fn test_malformed_sessions_fail_load() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("sessions.yaml"), "sessions: 12").unwrap();

        assert!(ServerData::load(&config_for(&temp)).is_err());
    }
}
