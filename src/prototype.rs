//! Prototype data tables
//!
//! Prototypes are YAML documents, each a sequence of mappings with a `type`
//! and an `id`. Only the `(type, id)` pairs are kept; they answer whether an
//! identifier still refers to something that exists.

use eyre::{Context, Result};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Prototype kind holding trait definitions
pub const TRAIT_KIND: &str = "trait";

/// Identifier of a trait prototype
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraitId(pub String);

impl TraitId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TraitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TraitId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Read-only identifier lookups
pub trait PrototypeRegistry {
    /// Whether a trait prototype with this id is loaded
    fn has_trait(&self, id: &TraitId) -> bool;
}

/// Registry indexed from a directory of prototype files
#[derive(Debug, Default)]
pub struct FilePrototypeRegistry {
    index: IndexMap<String, IndexSet<String>>,
}

impl FilePrototypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walk `dir` and index every `*.yml`/`*.yaml` file under it
    pub fn load(dir: &Path) -> Result<Self> {
        let mut registry = Self::new();

        if !dir.exists() {
            log::debug!("No prototypes directory at {}", dir.display());
            return Ok(registry);
        }

        let mut files = 0;
        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.with_context(|| format!("Failed to walk prototypes directory: {}", dir.display()))?;
            let path = entry.path();
            if !entry.file_type().is_file() || !path.extension().is_some_and(|e| e == "yml" || e == "yaml") {
                continue;
            }

            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    log::warn!("Skipping unreadable prototype file {}: {}", path.display(), e);
                    continue;
                }
            };
            match registry.add_document(&content) {
                Ok(count) => {
                    files += 1;
                    log::debug!("Indexed {} prototypes from {}", count, path.display());
                }
                Err(e) => {
                    log::warn!("Skipping prototype file {}: {}", path.display(), e);
                }
            }
        }

        log::info!(
            "Loaded {} prototypes from {} files under {}",
            registry.len(),
            files,
            dir.display()
        );
        Ok(registry)
    }

    /// Index one YAML document, returning how many entries it held
    pub fn add_document(&mut self, content: &str) -> Result<usize> {
        if content.trim().is_empty() {
            return Ok(0);
        }

        let entries: Vec<serde_yaml::Value> = serde_yaml::from_str(content).context("Failed to parse prototypes")?;

        let mut count = 0;
        for entry in &entries {
            let kind = entry.get("type").and_then(|v| v.as_str());
            let id = entry.get("id").and_then(|v| v.as_str());
            match (kind, id) {
                (Some(kind), Some(id)) => {
                    self.insert(kind, id);
                    count += 1;
                }
                _ => log::debug!("Ignoring prototype entry without type and id"),
            }
        }

        Ok(count)
    }

    pub fn insert(&mut self, kind: &str, id: &str) {
        if !self.index.entry(kind.to_string()).or_default().insert(id.to_string()) {
            log::debug!("Duplicate {} prototype: {}", kind, id);
        }
    }

    pub fn contains(&self, kind: &str, id: &str) -> bool {
        self.index.get(kind).is_some_and(|ids| ids.contains(id))
    }

    /// Kinds in load order with their entry counts
    pub fn kinds(&self) -> impl Iterator<Item = (&str, usize)> {
        self.index.iter().map(|(kind, ids)| (kind.as_str(), ids.len()))
    }

    pub fn len(&self) -> usize {
        self.index.values().map(|ids| ids.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PrototypeRegistry for FilePrototypeRegistry {
    fn has_trait(&self, id: &TraitId) -> bool {
        self.contains(TRAIT_KIND, id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TRAITS_YAML: &str = r#"
- type: trait
  id: trait_blind
  name: trait-blind-name
  components:
    - type: PermanentBlindness
- type: trait
  id: trait_nerdy
- type: species
  id: Human
"#;

    #[test]
    fn test_add_document() {
        let mut registry = FilePrototypeRegistry::new();
        assert_eq!(registry.add_document(TRAITS_YAML).unwrap(), 3);

        assert!(registry.has_trait(&TraitId::new("trait_blind")));
        assert!(registry.has_trait(&"trait_nerdy".into()));
        assert!(!registry.has_trait(&TraitId::new("Human")));
        assert!(registry.contains("species", "Human"));
    }

    #[test]
    fn test_duplicates_counted_once() {
        let mut registry = FilePrototypeRegistry::new();
        registry.add_document(TRAITS_YAML).unwrap();
        registry.add_document(TRAITS_YAML).unwrap();

        assert_eq!(registry.len(), 3);
        let kinds: Vec<(&str, usize)> = registry.kinds().collect();
        assert_eq!(kinds, vec![("trait", 2), ("species", 1)]);
    }

    #[test]
    fn test_entries_without_id_are_ignored() {
        let mut registry = FilePrototypeRegistry::new();
        let count = registry.add_document("- type: trait\n- id: orphan\n- type: trait\n  id: ok\n").unwrap();
        assert_eq!(count, 1);
        assert!(registry.has_trait(&TraitId::new("ok")));
    }

    #[test]
    fn test_load_directory_skips_bad_files() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("Traits");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("disabilities.yml"), TRAITS_YAML).unwrap();
        fs::write(temp.path().join("broken.yaml"), "- type: trait\n  id: [unclosed").unwrap();
        fs::write(temp.path().join("notes.txt"), "- type: trait\n  id: ignored\n").unwrap();

        let registry = FilePrototypeRegistry::load(temp.path()).unwrap();
        assert!(registry.has_trait(&TraitId::new("trait_blind")));
        assert!(!registry.has_trait(&TraitId::new("ignored")));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_load_directory_skips_non_utf8_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("good.yml"), TRAITS_YAML).unwrap();
        fs::write(temp.path().join("latin1.yml"), b"- type: trait\n  id: caf\xe9\n").unwrap();

        let registry = FilePrototypeRegistry::load(temp.path()).unwrap();
        assert!(registry.has_trait(&TraitId::new("trait_blind")));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_load_missing_directory() {
        let temp = TempDir::new().unwrap();
        let registry = FilePrototypeRegistry::load(&temp.path().join("nope")).unwrap();
        assert!(registry.is_empty());
    }
}
