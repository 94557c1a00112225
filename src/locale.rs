//! Localized console strings
//!
//! Every user-facing line is looked up by key. English strings are built in;
//! a locale file can override or add keys. Templates use Fluent-style
//! `{ $name }` placeholders.

use eyre::{Context, Result};
use indexmap::IndexMap;
use lazy_regex::{regex_captures, regex_replace_all};
use once_cell::sync::Lazy;
use std::fs;
use std::path::Path;

static BUILTIN: Lazy<IndexMap<&'static str, &'static str>> = Lazy::new(|| {
    IndexMap::from([
        ("shell-could-not-find-entity", "Could not find a session for that player."),
        ("shell-argument-username-hint", "<username>"),
        ("shell-command-not-found", "Unknown command: { $command }"),
        (
            "shell-missing-required-permission",
            "You need the { $flag } admin flag to run { $command }.",
        ),
        ("shell-invoker-not-found", "No session found for operator { $username }."),
        ("lstraits-desc", "Lists the traits on a player's selected character."),
        (
            "lstraits-help",
            "Usage: lstraits [username]\nWithout a username, lists the traits of your own character.",
        ),
        ("lstraits-could-not-find-player-preferences", "Could not find player preferences."),
        ("lstraits-could-not-find-profile", "Could not find a humanoid character profile."),
        ("lstraits-traits", "Traits:"),
        ("lstraits-no-traits", "No traits."),
        ("lstraits-unknown-trait", "  - { $trait } (unknown trait)"),
    ])
});

/// Key to template table
#[derive(Debug, Clone)]
pub struct Localization {
    strings: IndexMap<String, String>,
}

impl Default for Localization {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Localization {
    pub fn builtin() -> Self {
        Self {
            strings: BUILTIN.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
        }
    }

    /// Built-in strings overridden by `path`, which may be YAML or `.ftl`
    pub fn load(path: &Path) -> Result<Self> {
        let mut loc = Self::builtin();

        if !path.exists() {
            log::debug!("No locale file at {}, using built-in strings", path.display());
            return Ok(loc);
        }

        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read locale file: {}", path.display()))?;

        let overrides = if path.extension().is_some_and(|e| e == "ftl") {
            parse_ftl(&content)
        } else if content.trim().is_empty() {
            IndexMap::new()
        } else {
            serde_yaml::from_str::<IndexMap<String, String>>(&content)
                .with_context(|| format!("Failed to parse locale file: {}", path.display()))?
        };

        log::info!("Loaded {} locale strings from {}", overrides.len(), path.display());
        loc.strings.extend(overrides);
        Ok(loc)
    }

    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.strings.insert(key.into(), template.into());
    }

    pub fn get_string(&self, key: &str) -> String {
        self.get_string_with(key, &[])
    }

    /// Render `key`, replacing `{ $name }` with the matching argument
    pub fn get_string_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let Some(template) = self.strings.get(key) else {
            log::warn!("Missing locale string: {}", key);
            return key.to_string();
        };

        regex_replace_all!(r"\{\s*\$([A-Za-z0-9_-]+)\s*\}", template.as_str(), |whole: &str, name: &str| {
            args.iter()
                .find(|(arg, _)| *arg == name)
                .map(|(_, value)| value.to_string())
                .unwrap_or_else(|| whole.to_string())
        })
        .into_owned()
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Parse `key = value` messages; indented lines continue the previous value
fn parse_ftl(content: &str) -> IndexMap<String, String> {
    let mut strings: IndexMap<String, String> = IndexMap::new();
    let mut last: Option<String> = None;

    for line in content.lines() {
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            last = None;
            continue;
        }

        if line.starts_with(char::is_whitespace) {
            if let Some(value) = last.as_ref().and_then(|key| strings.get_mut(key)) {
                if !value.is_empty() {
                    value.push('\n');
                }
                value.push_str(line.trim());
            }
            continue;
        }

        if let Some((_, key, value)) = regex_captures!(r"^([A-Za-z][A-Za-z0-9_-]*)\s*=\s*(.*)$", line) {
            strings.insert(key.to_string(), value.trim_end().to_string());
            last = Some(key.to_string());
        } else {
            log::debug!("Ignoring unparsable locale line: {}", line);
            last = None;
        }
    }

    strings
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_builtin_strings() {
        let loc = Localization::builtin();
        assert_eq!(loc.get_string("lstraits-traits"), "Traits:");
        assert_eq!(loc.get_string("lstraits-no-traits"), "No traits.");
    }

    #[test]
    fn test_placeholder_substitution() {
        let loc = Localization::builtin();
        assert_eq!(
            loc.get_string_with("lstraits-unknown-trait", &[("trait", "trait_gone")]),
            "  - trait_gone (unknown trait)"
        );
    }

    #[test]
    fn test_placeholder_spacing_and_missing_args() {
        let mut loc = Localization::builtin();
        loc.insert("greeting", "Hi {$name}, from { $place }");
        assert_eq!(loc.get_string_with("greeting", &[("name", "bob")]), "Hi bob, from { $place }");
    }

    #[test]
    fn test_missing_key_renders_key() {
        let loc = Localization::builtin();
        assert_eq!(loc.get_string("no-such-key"), "no-such-key");
    }

    #[test]
    fn test_yaml_override() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("locale.yaml");
        fs::write(&path, "lstraits-traits: \"Traits for player:\"\nextra-key: Extra\n").unwrap();

        let loc = Localization::load(&path).unwrap();
        assert_eq!(loc.get_string("lstraits-traits"), "Traits for player:");
        assert_eq!(loc.get_string("extra-key"), "Extra");
        assert_eq!(loc.get_string("lstraits-no-traits"), "No traits.");
    }

    #[test]
    fn test_ftl_override() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("admin.ftl");
        fs::write(
            &path,
            "# admin strings\nlstraits-no-traits = This character has no traits.\nlstraits-help = Usage: lstraits [username]\n    Lists traits.\n",
        )
        .unwrap();

        let loc = Localization::load(&path).unwrap();
        assert_eq!(loc.get_string("lstraits-no-traits"), "This character has no traits.");
        assert_eq!(loc.get_string("lstraits-help"), "Usage: lstraits [username]\nLists traits.");
    }

    #[test]
    fn test_missing_locale_file_uses_builtin() {
        let temp = TempDir::new().unwrap();
        let loc = Localization::load(&temp.path().join("locale.yaml")).unwrap();
        assert_eq!(loc.len(), Localization::builtin().len());
    }
}
