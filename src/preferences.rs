//! Player preferences
//!
//! Each user has at most one preference record holding their character slots.
//! Records are loaded once and served from memory.

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use crate::prototype::TraitId;
use crate::session::UserId;

/// Character with a body, name and trait picks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanoidProfile {
    pub name: String,

    #[serde(default)]
    pub traits: Vec<TraitId>,
}

/// Silicon character; has no traits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BorgProfile {
    pub name: String,
}

/// A stored character, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CharacterProfile {
    Humanoid(HumanoidProfile),
    Borg(BorgProfile),
}

impl CharacterProfile {
    pub fn name(&self) -> &str {
        match self {
            CharacterProfile::Humanoid(p) => &p.name,
            CharacterProfile::Borg(p) => &p.name,
        }
    }

    /// The trait-bearing payload, if this is a humanoid
    pub fn as_humanoid(&self) -> Option<&HumanoidProfile> {
        match self {
            CharacterProfile::Humanoid(p) => Some(p),
            _ => None,
        }
    }
}

/// Per-user stored settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    #[serde(default)]
    pub selected_character_slot: u32,

    #[serde(default)]
    pub characters: BTreeMap<u32, CharacterProfile>,
}

impl PreferenceRecord {
    /// Profile in the selected slot; an empty slot yields nothing
    pub fn selected_character(&self) -> Option<&CharacterProfile> {
        self.characters.get(&self.selected_character_slot)
    }
}

/// Read-only access to cached preference records
pub trait PreferencesCache {
    fn cached_preferences(&self, user_id: &UserId) -> Option<&PreferenceRecord>;
}

/// Preference cache backed by `preferences.yaml`
#[derive(Debug, Default)]
pub struct FilePreferencesCache {
    records: HashMap<UserId, PreferenceRecord>,
}

impl FilePreferencesCache {
    pub fn new(records: HashMap<UserId, PreferenceRecord>) -> Self {
        Self { records }
    }

    /// Load records from a YAML mapping of user id to record
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No preferences file at {}", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read preferences file: {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let records: HashMap<UserId, PreferenceRecord> = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse preferences file: {}", path.display()))?;

        log::info!("Loaded {} preference records from {}", records.len(), path.display());
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl PreferencesCache for FilePreferencesCache {
    fn cached_preferences(&self, user_id: &UserId) -> Option<&PreferenceRecord> {
        self.records.get(user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn humanoid(name: &str, traits: &[&str]) -> CharacterProfile {
        CharacterProfile::Humanoid(HumanoidProfile {
            name: name.to_string(),
            traits: traits.iter().map(|t| TraitId::new(*t)).collect(),
        })
    }

    #[test]
    fn test_selected_character() {
        let record = PreferenceRecord {
            selected_character_slot: 1,
            characters: BTreeMap::from([
                (0, humanoid("First", &[])),
                (1, humanoid("Second", &["trait_blind"])),
            ]),
        };

        let selected = record.selected_character().unwrap();
        assert_eq!(selected.name(), "Second");
        assert_eq!(selected.as_humanoid().unwrap().traits, vec![TraitId::new("trait_blind")]);
    }

    #[test]
    fn test_selected_slot_empty() {
        let record = PreferenceRecord {
            selected_character_slot: 3,
            characters: BTreeMap::from([(0, humanoid("First", &[]))]),
        };
        assert!(record.selected_character().is_none());
    }

    #[test]
    fn test_borg_is_not_humanoid() {
        let borg = CharacterProfile::Borg(BorgProfile {
            name: "B-0451".to_string(),
        });
        assert!(borg.as_humanoid().is_none());
        assert_eq!(borg.name(), "B-0451");
    }

    #[test]
    fn test_deserialize_tagged_profiles() {
        let yaml = r#"
selected_character_slot: 1
characters:
  0:
    kind: borg
    name: B-0451
  1:
    kind: humanoid
    name: Alice Smith
    traits:
      - trait_blind
      - trait_nerdy
      - trait_blind
"#;
        let record: PreferenceRecord = serde_yaml::from_str(yaml).unwrap();
        let human = record.selected_character().and_then(|c| c.as_humanoid()).unwrap();

        // Order and duplicates survive
        let ids: Vec<&str> = human.traits.iter().map(|t| t.as_str()).collect();
        assert_eq!(ids, vec!["trait_blind", "trait_nerdy", "trait_blind"]);
        assert!(matches!(record.characters.get(&0), Some(CharacterProfile::Borg(_))));
    }

    #[test]
    fn test_load_cache() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preferences.yaml");
        fs::write(
            &path,
            r#"
u-1:
  selected_character_slot: 0
  characters:
    0:
      kind: humanoid
      name: Alice
"#,
        )
        .unwrap();

        let cache = FilePreferencesCache::load(&path).unwrap();
        assert_eq!(cache.len(), 1);

        let record = cache.cached_preferences(&UserId::new("u-1")).unwrap();
        assert!(record.selected_character().unwrap().as_humanoid().unwrap().traits.is_empty());
        assert!(cache.cached_preferences(&UserId::new("u-2")).is_none());
    }

    #[test]
    fn test_load_empty_and_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("preferences.yaml");
        assert!(FilePreferencesCache::load(&path).unwrap().is_empty());

        fs::write(&path, "").unwrap();
        assert!(FilePreferencesCache::load(&path).unwrap().is_empty());
    }
}
