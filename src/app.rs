//! Application - one loaded install and the commands run against it

use rand::Rng;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::generations::GenerationTable;
use crate::key::DisplayOptions;
use crate::resolver::{Resolution, ResolutionError, Resolver, FORM_WITH_RANDOM};
use crate::store::AssetStore;
use crate::translation::LazyTranslations;

/// Process-scoped, read-only state built once at startup.
pub struct App {
    catalog: Catalog,
    translations: LazyTranslations,
    store: AssetStore,
}

impl App {
    pub fn new(catalog: Catalog, translations: LazyTranslations, store: AssetStore) -> Self {
        Self {
            catalog,
            translations,
            store,
        }
    }

    /// Load the catalog (and generation override, if shipped). The
    /// translation table is left for first use.
    pub fn open(config: &Config) -> Result<Self> {
        let generations_path = config.generations_path();
        let generations = if generations_path.is_file() {
            GenerationTable::load(&generations_path)?
        } else {
            GenerationTable::standard()
        };
        let catalog = Catalog::load(&config.catalog_path(), generations)?;
        debug!(root = %config.root.display(), "opened install");

        Ok(Self::new(
            catalog,
            LazyTranslations::new(config.translations_path()),
            AssetStore::new(config.art_dir()),
        ))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.catalog, &self.translations)
    }

    pub fn list<W: Write>(&self, out: &mut W) -> Result<()> {
        for name in self.catalog.names() {
            writeln!(out, "{name}").map_err(Error::Output)?;
        }
        Ok(())
    }

    pub fn show<W: Write>(
        &self,
        name: &str,
        options: &DisplayOptions,
        out: &mut W,
    ) -> Result<()> {
        let resolution = self.resolver().resolve_by_name(name, options)?;
        self.emit(&resolution, options, out)
    }

    /// `selector` defaults to every generation in the table.
    pub fn show_random<W: Write, R: Rng>(
        &self,
        selector: Option<&str>,
        options: &DisplayOptions,
        rng: &mut R,
        out: &mut W,
    ) -> Result<()> {
        if options.requested_form().is_some() {
            return Err(ResolutionError::InvalidUsage(FORM_WITH_RANDOM.to_string()).into());
        }
        let selector = match selector {
            Some(s) => s.to_string(),
            None => self.catalog.generations().full_selector().unwrap_or_default(),
        };
        let resolution = self.resolver().resolve_random(&selector, options, rng)?;
        self.emit(&resolution, options, out)
    }

    /// Print every missing asset path; returns how many there were.
    pub fn check<W: Write>(&self, out: &mut W) -> Result<usize> {
        let missing: Vec<PathBuf> = self.store.missing(&self.catalog);
        for path in &missing {
            writeln!(out, "missing {}", path.display()).map_err(Error::Output)?;
        }
        Ok(missing.len())
    }

    fn emit<W: Write>(
        &self,
        resolution: &Resolution,
        options: &DisplayOptions,
        out: &mut W,
    ) -> Result<()> {
        // Read before printing the title so a missing file prints nothing.
        let art = self.store.read(&resolution.key)?;
        if options.show_title {
            writeln!(out, "{}", resolution.title()).map_err(Error::Output)?;
        }
        out.write_all(&art).map_err(Error::Output)?;
        out.write_all(b"\n").map_err(Error::Output)
    }
}
