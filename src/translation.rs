//! Transliteration table - foreign display name to canonical name

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};
use crate::hashing::digest_of;

/// On-disk form of the table. Only `entries` is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationArtifact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_sha256: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries_sha256: Option<String>,
    pub entries: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationTable {
    entries: BTreeMap<String, String>,
}

impl TranslationTable {
    pub fn new(entries: BTreeMap<String, String>) -> Self {
        Self { entries }
    }

    /// Load and, when the artifact carries one, verify the entry digest.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let artifact: TranslationArtifact =
            serde_json::from_str(&content).map_err(|e| Error::json(path, e))?;

        if let Some(expected) = &artifact.entries_sha256 {
            let actual = digest_of(&artifact.entries)?;
            if !expected.eq_ignore_ascii_case(&actual) {
                return Err(Error::DigestMismatch {
                    path: path.to_path_buf(),
                    expected: expected.clone(),
                    actual,
                });
            }
        }

        debug!(
            path = %path.display(),
            entries = artifact.entries.len(),
            "loaded translation table"
        );
        Ok(Self::new(artifact.entries))
    }

    pub fn get(&self, display_name: &str) -> Option<&str> {
        self.entries.get(display_name).map(String::as_str)
    }

    pub fn insert(&mut self, display_name: String, canonical: String) {
        self.entries.insert(display_name, canonical);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stamp the table for writing. `source_sha256` identifies the page it
    /// was extracted from.
    pub fn to_artifact(&self, source_sha256: Option<String>) -> Result<TranslationArtifact> {
        Ok(TranslationArtifact {
            generated_at: Some(Utc::now()),
            source_sha256,
            entries_sha256: Some(digest_of(&self.entries)?),
            entries: self.entries.clone(),
        })
    }

    pub fn save(&self, path: &Path, source_sha256: Option<String>) -> Result<()> {
        let artifact = self.to_artifact(source_sha256)?;
        let json = serde_json::to_string_pretty(&artifact)?;
        fs::write(path, json).map_err(|e| Error::io(path, e))
    }
}

impl FromIterator<(String, String)> for TranslationTable {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Table that is read from disk on first use, at most once.
#[derive(Debug)]
pub struct LazyTranslations {
    path: Option<PathBuf>,
    table: OnceCell<TranslationTable>,
}

impl LazyTranslations {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            table: OnceCell::new(),
        }
    }

    /// Already loaded; never touches the filesystem.
    pub fn preloaded(table: TranslationTable) -> Self {
        Self {
            path: None,
            table: OnceCell::from(table),
        }
    }

    pub fn get(&self) -> Result<&TranslationTable> {
        if let Some(table) = self.table.get() {
            return Ok(table);
        }
        let table = match &self.path {
            Some(path) => TranslationTable::load(path)?,
            None => TranslationTable::default(),
        };
        Ok(self.table.get_or_init(|| table))
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }
}
