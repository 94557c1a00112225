//! `lstraits`: list the traits on a player's selected character
//!
//! Resolves a session (the named player, or the invoker's own), fetches that
//! user's cached preferences, narrows the selected character to a humanoid
//! profile and prints each trait, marking ids no prototype defines.

use std::fmt;

use crate::console::{AdminFlag, CompletionResult, ConsoleCommand, Shell};
use crate::locale::Localization;
use crate::preferences::{CharacterProfile, HumanoidProfile, PreferencesCache};
use crate::prototype::PrototypeRegistry;
use crate::session::{Session, SessionRegistry};

/// Why no trait list could be produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsTraitsError {
    /// Neither the named player nor the invoker has a session
    IdentityNotFound,
    /// The session's user has no cached preferences
    PreferencesUnavailable,
    /// The selected character is missing or not a humanoid
    ProfileUnavailable,
}

impl LsTraitsError {
    pub fn locale_key(&self) -> &'static str {
        match self {
            LsTraitsError::IdentityNotFound => "shell-could-not-find-entity",
            LsTraitsError::PreferencesUnavailable => "lstraits-could-not-find-player-preferences",
            LsTraitsError::ProfileUnavailable => "lstraits-could-not-find-profile",
        }
    }
}

impl fmt::Display for LsTraitsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LsTraitsError::IdentityNotFound => write!(f, "session not found"),
            LsTraitsError::PreferencesUnavailable => write!(f, "no cached preferences"),
            LsTraitsError::ProfileUnavailable => write!(f, "selected character is not a humanoid profile"),
        }
    }
}

impl std::error::Error for LsTraitsError {}

pub struct LsTraits<'a> {
    players: &'a dyn SessionRegistry,
    prefs: &'a dyn PreferencesCache,
    prototypes: &'a dyn PrototypeRegistry,
    loc: &'a Localization,
}

impl<'a> LsTraits<'a> {
    pub fn new(
        players: &'a dyn SessionRegistry,
        prefs: &'a dyn PreferencesCache,
        prototypes: &'a dyn PrototypeRegistry,
        loc: &'a Localization,
    ) -> Self {
        Self {
            players,
            prefs,
            prototypes,
            loc,
        }
    }

    /// Resolve the target's humanoid profile; only the first argument is used
    pub fn lookup_profile(
        &self,
        player: Option<&Session>,
        args: &[String],
    ) -> Result<&'a HumanoidProfile, LsTraitsError> {
        let session = match args.first() {
            Some(username) => self.players.session_by_username(username),
            None => player,
        }
        .ok_or(LsTraitsError::IdentityNotFound)?;

        let prefs = self
            .prefs
            .cached_preferences(&session.user_id)
            .ok_or(LsTraitsError::PreferencesUnavailable)?;

        prefs
            .selected_character()
            .and_then(CharacterProfile::as_humanoid)
            .ok_or(LsTraitsError::ProfileUnavailable)
    }
}

impl ConsoleCommand for LsTraits<'_> {
    fn name(&self) -> &'static str {
        "lstraits"
    }

    fn description(&self) -> String {
        self.loc.get_string("lstraits-desc")
    }

    fn help(&self) -> String {
        self.loc.get_string("lstraits-help")
    }

    fn required_flag(&self) -> Option<AdminFlag> {
        Some(AdminFlag::Logs)
    }

    fn execute(&self, shell: &mut Shell, args: &[String]) {
        if args.len() > 1 {
            log::debug!("lstraits: ignoring extra arguments: {}", args[1..].join(" "));
        }

        let profile = match self.lookup_profile(shell.player(), args) {
            Ok(profile) => profile,
            Err(e) => {
                log::debug!("lstraits failed for {}: {}", shell.invoker_name(), e);
                shell.write_error(self.loc.get_string(e.locale_key()));
                return;
            }
        };

        shell.write_line(self.loc.get_string("lstraits-traits"));

        if profile.traits.is_empty() {
            shell.write_line(self.loc.get_string("lstraits-no-traits"));
            return;
        }

        let mut unknown = 0;
        for trait_id in &profile.traits {
            if self.prototypes.has_trait(trait_id) {
                shell.write_line(format!("  - {}", trait_id));
            } else {
                unknown += 1;
                shell.write_line(
                    self.loc
                        .get_string_with("lstraits-unknown-trait", &[("trait", trait_id.as_str())]),
                );
            }
        }

        log::debug!(
            "lstraits listed {} traits for {} ({} unknown)",
            profile.traits.len(),
            profile.name,
            unknown
        );
    }

    fn completion(&self, _shell: &Shell, args: &[String]) -> CompletionResult {
        if args.len() == 1 {
            return CompletionResult::from_hint_options(
                self.players.session_names(),
                self.loc.get_string("shell-argument-username-hint"),
            );
        }

        CompletionResult::empty()
    }
}
