//! Catalog - ordered pokemon entries and their alternate forms

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::generations::GenerationTable;

/// Baseline form every entry implicitly has. Never selectable with `--form`.
pub const REGULAR_FORM: &str = "regular";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    #[serde(default)]
    pub forms: Vec<String>,
}

impl CatalogEntry {
    pub fn new(name: impl Into<String>, forms: &[&str]) -> Self {
        Self {
            name: name.into(),
            forms: forms.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Selectable forms, in catalog order.
    pub fn alternate_forms(&self) -> Vec<&str> {
        self.forms
            .iter()
            .map(String::as_str)
            .filter(|f| *f != REGULAR_FORM)
            .collect()
    }

    pub fn has_alternate_form(&self, form: &str) -> bool {
        form != REGULAR_FORM && self.forms.iter().any(|f| f == form)
    }
}

/// Read-only catalog. Order encodes generation membership.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
    generations: GenerationTable,
}

impl Catalog {
    /// Build a catalog, enforcing unique names and full generation coverage.
    pub fn new(entries: Vec<CatalogEntry>, generations: GenerationTable) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if entry.name.is_empty() {
                return Err(Error::InvalidCatalog(format!(
                    "entry {} has an empty name",
                    position + 1
                )));
            }
            if index.insert(entry.name.clone(), position).is_some() {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate name '{}'",
                    entry.name
                )));
            }
        }

        generations
            .validate(entries.len())
            .map_err(Error::InvalidCatalog)?;

        Ok(Self {
            entries,
            index,
            generations,
        })
    }

    pub fn load(path: &Path, generations: GenerationTable) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(&content).map_err(|e| Error::json(path, e))?;
        debug!(path = %path.display(), entries = entries.len(), "loaded catalog");
        Self::new(entries, generations)
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    /// Entry at a 1-based catalog position.
    pub fn at(&self, position: usize) -> Option<&CatalogEntry> {
        position.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// 1-based position of `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).map(|&i| i + 1)
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn generations(&self) -> &GenerationTable {
        &self.generations
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generations::GenerationRange;

    fn two_gen_table() -> GenerationTable {
        GenerationTable::new(vec![
            GenerationRange { label: "1".into(), start: 1, end: 2 },
            GenerationRange { label: "2".into(), start: 3, end: 3 },
        ])
    }

    fn sample_entries() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry::new("bulbasaur", &["regular"]),
            CatalogEntry::new("charizard", &["regular", "mega-x", "mega-y", "gmax"]),
            CatalogEntry::new("chikorita", &[]),
        ]
    }

    #[test]
    fn test_lookup_and_positions() {
        let catalog = Catalog::new(sample_entries(), two_gen_table()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.position("charizard"), Some(2));
        assert_eq!(catalog.at(1).map(|e| e.name.as_str()), Some("bulbasaur"));
        assert!(catalog.at(0).is_none());
        assert!(catalog.at(4).is_none());
        assert!(catalog.get("Bulbasaur").is_none());
        let names: Vec<_> = catalog.names().collect();
        assert_eq!(names, vec!["bulbasaur", "charizard", "chikorita"]);
    }

    #[test]
    fn test_alternate_forms_exclude_regular() {
        let entry = CatalogEntry::new("charizard", &["regular", "mega-x", "gmax"]);
        assert_eq!(entry.alternate_forms(), vec!["mega-x", "gmax"]);
        assert!(entry.has_alternate_form("mega-x"));
        assert!(!entry.has_alternate_form("regular"));
        assert!(!entry.has_alternate_form("mega-z"));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut entries = sample_entries();
        entries[2].name = "bulbasaur".into();
        let err = Catalog::new(entries, two_gen_table()).unwrap_err();
        assert!(err.to_string().contains("duplicate name 'bulbasaur'"));
    }

    #[test]
    fn test_generation_mismatch_rejected() {
        let mut entries = sample_entries();
        entries.push(CatalogEntry::new("cyndaquil", &[]));
        assert!(Catalog::new(entries, two_gen_table()).is_err());
    }

    #[test]
    fn test_parse_ignores_unknown_fields() {
        let json = r#"[
            {"name": "bulbasaur", "forms": ["regular"], "gen": 1},
            {"name": "charizard", "forms": ["regular", "mega-x"]},
            {"name": "chikorita"}
        ]"#;
        let entries: Vec<CatalogEntry> = serde_json::from_str(json).unwrap();
        let catalog = Catalog::new(entries, two_gen_table()).unwrap();
        assert!(catalog.get("chikorita").unwrap().forms.is_empty());
    }
}
