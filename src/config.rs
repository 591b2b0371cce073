//! Install root discovery and data file layout.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};

pub const ROOT_ENV: &str = "POKEMON_COLORSCRIPTS_ROOT";
pub const DEFAULT_INSTALL_ROOT: &str = "/usr/local/opt/pokemon-colorscripts";

pub const CATALOG_FILE: &str = "pokemon.json";
pub const GENERATIONS_FILE: &str = "generations.json";
pub const TRANSLATIONS_FILE: &str = "translations.json";
pub const ART_DIR: &str = "colorscripts";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub root: PathBuf,
}

fn is_install_root(candidate: &Path) -> bool {
    candidate.join(CATALOG_FILE).is_file()
}

fn root_from_hint(hint: &Path) -> Option<PathBuf> {
    if hint.as_os_str().is_empty() || !is_install_root(hint) {
        return None;
    }
    fs::canonicalize(hint).ok()
}

fn search_upwards(start: &Path) -> Option<PathBuf> {
    let mut dir = fs::canonicalize(start).ok()?;
    loop {
        if is_install_root(&dir) {
            return Some(dir);
        }
        if !dir.pop() {
            return None;
        }
    }
}

impl Config {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locate the install root.
    ///
    /// Order: explicit override, `POKEMON_COLORSCRIPTS_ROOT`, the executable's
    /// directory and its parents, the build-time hint, then the default
    /// install location. A candidate must contain `pokemon.json`.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return root_from_hint(path).map(Self::new).ok_or(Error::RootNotFound);
        }

        if let Ok(env_root) = env::var(ROOT_ENV) {
            if let Some(root) = root_from_hint(Path::new(&env_root)) {
                debug!(root = %root.display(), "install root from environment");
                return Ok(Self::new(root));
            }
        }

        if let Ok(exe_path) = env::current_exe() {
            if let Some(root) = exe_path.parent().and_then(search_upwards) {
                debug!(root = %root.display(), "install root from executable location");
                return Ok(Self::new(root));
            }
        }

        if let Some(hint) = option_env!("POKEMON_COLORSCRIPTS_ROOT_HINT") {
            if let Some(root) = root_from_hint(Path::new(hint)) {
                return Ok(Self::new(root));
            }
        }

        root_from_hint(Path::new(DEFAULT_INSTALL_ROOT))
            .map(Self::new)
            .ok_or(Error::RootNotFound)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(CATALOG_FILE)
    }

    /// Optional override of the built-in generation table.
    pub fn generations_path(&self) -> PathBuf {
        self.root.join(GENERATIONS_FILE)
    }

    pub fn translations_path(&self) -> PathBuf {
        self.root.join(TRANSLATIONS_FILE)
    }

    pub fn art_dir(&self) -> PathBuf {
        self.root.join(ART_DIR)
    }
}
