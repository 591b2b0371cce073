//! Asset store - pre-rendered art addressed by `AssetKey`

use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use crate::key::{AssetKey, Palette, Size};

pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path_for(&self, key: &AssetKey) -> PathBuf {
        self.root.join(key.relative_path())
    }

    pub fn read(&self, key: &AssetKey) -> Result<Vec<u8>> {
        let path = self.path_for(key);
        debug!(path = %path.display(), "reading asset");
        fs::read(&path).map_err(|e| Error::io(path, e))
    }

    /// Every asset the catalog promises that is not on disk.
    ///
    /// Each entry and each of its alternate forms must exist for all
    /// four `(size, palette)` pairs.
    pub fn missing(&self, catalog: &Catalog) -> Vec<PathBuf> {
        let mut missing = vec![];
        for entry in catalog.entries() {
            let mut names = vec![entry.name.clone()];
            names.extend(
                entry
                    .alternate_forms()
                    .into_iter()
                    .map(|form| format!("{}-{}", entry.name, form)),
            );

            for name in &names {
                for size in Size::ALL {
                    for palette in Palette::ALL {
                        let path = self.path_for(&AssetKey::new(size, palette, name.as_str()));
                        if !path.is_file() {
                            missing.push(path);
                        }
                    }
                }
            }
        }
        missing
    }
}
