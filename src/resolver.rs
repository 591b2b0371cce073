//! Resolver - identifier + display options to exactly one asset key
//!
//! Every lookup miss is terminal; there is no fuzzy matching and no retry.

use rand::seq::SliceRandom;
use rand::Rng;
use std::borrow::Cow;
use thiserror::Error;
use tracing::debug;

use crate::catalog::{Catalog, CatalogEntry};
use crate::error::Result;
use crate::key::{AssetKey, DisplayOptions, Palette, Size};
use crate::script;
use crate::selector::GenerationSelector;
use crate::translation::LazyTranslations;

/// Chance that a random pick is upgraded to the shiny palette.
pub const SHINY_RATE: f64 = 1.0 / 128.0;

pub const FORM_WITH_RANDOM: &str = "--form flag unexpected with --random";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("Invalid pokemon {0}")]
    UnknownPokemon(String),

    #[error("Invalid form '{form}' for pokemon {name}")]
    UnknownForm {
        name: String,
        form: String,
        available: Vec<String>,
    },

    #[error("Invalid generation '{0}'")]
    UnknownGeneration(String),

    #[error("Invalid generation range '{selector}': generation {start} comes after generation {end}")]
    InvertedRange {
        selector: String,
        start: String,
        end: String,
    },

    #[error("Invalid pokemon {0}")]
    UnknownForeignName(String),

    #[error("{0}")]
    InvalidUsage(String),
}

impl ResolutionError {
    /// Follow-up lines for the user, if any.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::UnknownForm { name, available, .. } if available.is_empty() => {
                Some(format!("No alternate forms available for {name}"))
            }
            Self::UnknownForm { available, .. } => {
                let mut lines = vec!["Available alternate forms are".to_string()];
                lines.extend(available.iter().map(|f| format!("- {f}")));
                Some(lines.join("\n"))
            }
            _ => None,
        }
    }
}

/// A resolved asset plus the name to show above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub key: AssetKey,
    /// Foreign display name when one was translated, else the qualified name.
    pub label: String,
}

impl Resolution {
    pub fn title(&self) -> String {
        match self.key.palette {
            Palette::Shiny => format!("{} (shiny)", self.label),
            Palette::Regular => self.label.clone(),
        }
    }
}

pub struct Resolver<'a> {
    catalog: &'a Catalog,
    translations: &'a LazyTranslations,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a Catalog, translations: &'a LazyTranslations) -> Self {
        Self {
            catalog,
            translations,
        }
    }

    /// Resolve a literal or foreign-script name.
    ///
    /// The only I/O is the first read of the translation table, and only
    /// for foreign names without a gender sign. A failed read surfaces as
    /// a startup-class [`crate::Error`], so this returns the crate error rather
    /// than a bare [`ResolutionError`].
    pub fn resolve_by_name(
        &self,
        identifier: &str,
        options: &DisplayOptions,
    ) -> Result<Resolution> {
        let mut label = None;

        let canonical: Cow<'_, str> = match script::first_foreign_char(identifier) {
            None => Cow::Borrowed(identifier),
            Some(trigger) => {
                debug!(identifier, %trigger, "foreign display name");
                if let Some(name) = script::gender_sign_name(identifier) {
                    Cow::Borrowed(name)
                } else {
                    let table = self.translations.get()?;
                    let name = table.get(identifier).ok_or_else(|| {
                        ResolutionError::UnknownForeignName(identifier.to_string())
                    })?;
                    label = Some(identifier.to_string());
                    Cow::Owned(name.to_string())
                }
            }
        };

        let entry = self
            .catalog
            .get(&canonical)
            .ok_or_else(|| ResolutionError::UnknownPokemon(canonical.to_string()))?;

        let resolution = qualify(
            entry,
            options.requested_form(),
            options.size(),
            options.palette(),
            label,
        )?;
        debug!(key = %resolution.key, "resolved by name");
        Ok(resolution)
    }

    /// Resolve a random pick within `selector`.
    ///
    /// The selector is fully validated before anything is drawn from `rng`.
    /// Never touches the translation table, so every failure is a
    /// [`ResolutionError`].
    pub fn resolve_random<R: Rng>(
        &self,
        selector: &str,
        options: &DisplayOptions,
        rng: &mut R,
    ) -> Result<Resolution, ResolutionError> {
        if options.requested_form().is_some() {
            return Err(ResolutionError::InvalidUsage(FORM_WITH_RANDOM.to_string()));
        }

        let parsed = GenerationSelector::parse(selector)?;
        let generations = self.catalog.generations();
        let unknown = || ResolutionError::UnknownGeneration(selector.to_string());
        if parsed.labels().iter().any(|label| !generations.contains(label)) {
            return Err(unknown());
        }

        let (start, end) = match &parsed {
            GenerationSelector::List(labels) => {
                let chosen = labels.choose(&mut *rng).ok_or_else(unknown)?;
                (chosen.as_str(), chosen.as_str())
            }
            GenerationSelector::Range { start, end } => (start.as_str(), end.as_str()),
            GenerationSelector::Single(label) => (label.as_str(), label.as_str()),
        };

        let low = generations.get(start).ok_or_else(unknown)?.start;
        let high = generations.get(end).ok_or_else(unknown)?.end;
        if low > high {
            return Err(ResolutionError::InvertedRange {
                selector: selector.to_string(),
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let position = rng.gen_range(low..=high);
        let entry = self.catalog.at(position).ok_or_else(unknown)?;
        let palette = if options.shiny || rng.gen_bool(SHINY_RATE) {
            Palette::Shiny
        } else {
            Palette::Regular
        };

        let resolution = qualify(entry, None, options.size(), palette, None)?;
        debug!(selector, position, key = %resolution.key, "resolved random pick");
        Ok(resolution)
    }
}

fn qualify(
    entry: &CatalogEntry,
    form: Option<&str>,
    size: Size,
    palette: Palette,
    label: Option<String>,
) -> Result<Resolution, ResolutionError> {
    let qualified_name = match form {
        None => entry.name.clone(),
        Some(form) if entry.has_alternate_form(form) => format!("{}-{}", entry.name, form),
        Some(form) => {
            return Err(ResolutionError::UnknownForm {
                name: entry.name.clone(),
                form: form.to_string(),
                available: entry
                    .alternate_forms()
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
            })
        }
    };

    Ok(Resolution {
        label: label.unwrap_or_else(|| qualified_name.clone()),
        key: AssetKey::new(size, palette, qualified_name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::generations::{GenerationRange, GenerationTable};
    use crate::translation::TranslationTable;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                CatalogEntry::new("nidoran-f", &["regular"]),
                CatalogEntry::new("nidoran-m", &["regular"]),
                CatalogEntry::new("charizard", &["regular", "mega-x", "mega-y"]),
                CatalogEntry::new("pikachu", &[]),
            ],
            GenerationTable::new(vec![
                GenerationRange { label: "1".into(), start: 1, end: 3 },
                GenerationRange { label: "2".into(), start: 4, end: 4 },
            ]),
        )
        .unwrap()
    }

    fn translations() -> LazyTranslations {
        LazyTranslations::preloaded(
            [("リザードン".to_string(), "charizard".to_string())]
                .into_iter()
                .collect::<TranslationTable>(),
        )
    }

    #[test]
    fn test_form_qualifies_name_and_label() {
        let catalog = catalog();
        let translations = translations();
        let resolver = Resolver::new(&catalog, &translations);
        let options = DisplayOptions {
            form: Some("mega-y".into()),
            ..Default::default()
        };
        let r = resolver.resolve_by_name("charizard", &options).unwrap();
        assert_eq!(r.key.qualified_name, "charizard-mega-y");
        assert_eq!(r.title(), "charizard-mega-y");
    }

    #[test]
    fn test_regular_is_not_a_selectable_form() {
        let catalog = catalog();
        let translations = translations();
        let resolver = Resolver::new(&catalog, &translations);
        let options = DisplayOptions {
            form: Some("regular".into()),
            ..Default::default()
        };
        let err = resolver.resolve_by_name("charizard", &options).unwrap_err();
        assert!(matches!(
            err,
            Error::Resolution(ResolutionError::UnknownForm { .. })
        ));
    }

    #[test]
    fn test_unknown_form_hint_lists_alternates() {
        let err = ResolutionError::UnknownForm {
            name: "charizard".into(),
            form: "gmax".into(),
            available: vec!["mega-x".into(), "mega-y".into()],
        };
        assert_eq!(err.to_string(), "Invalid form 'gmax' for pokemon charizard");
        assert_eq!(
            err.hint().unwrap(),
            "Available alternate forms are\n- mega-x\n- mega-y"
        );

        let none = ResolutionError::UnknownForm {
            name: "pikachu".into(),
            form: "gmax".into(),
            available: vec![],
        };
        assert_eq!(none.hint().unwrap(), "No alternate forms available for pikachu");
    }

    #[test]
    fn test_translated_name_keeps_foreign_label() {
        let catalog = catalog();
        let translations = translations();
        let resolver = Resolver::new(&catalog, &translations);
        let options = DisplayOptions {
            shiny: true,
            ..Default::default()
        };
        let r = resolver.resolve_by_name("リザードン", &options).unwrap();
        assert_eq!(r.key.qualified_name, "charizard");
        assert_eq!(r.title(), "リザードン (shiny)");
    }

    #[test]
    fn test_gender_sign_bypasses_table() {
        let catalog = catalog();
        let translations = LazyTranslations::new("/nonexistent/translations.json");
        let resolver = Resolver::new(&catalog, &translations);
        let r = resolver
            .resolve_by_name("ニドラン♀", &DisplayOptions::default())
            .unwrap();
        assert_eq!(r.key.qualified_name, "nidoran-f");
        assert_eq!(r.label, "nidoran-f");
        assert!(!translations.is_loaded());
    }

    #[test]
    fn test_unknown_foreign_name() {
        let catalog = catalog();
        let translations = translations();
        let resolver = Resolver::new(&catalog, &translations);
        let err = resolver
            .resolve_by_name("ピカチュウ", &DisplayOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Resolution(ResolutionError::UnknownForeignName(ref n)) if n == "ピカチュウ"
        ));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let catalog = catalog();
        let translations = translations();
        let resolver = Resolver::new(&catalog, &translations);
        let mut rng = StdRng::seed_from_u64(7);
        let err = resolver
            .resolve_random("2-1", &DisplayOptions::default(), &mut rng)
            .unwrap_err();
        assert!(matches!(err, ResolutionError::InvertedRange { .. }));
    }

    #[test]
    fn test_list_with_unknown_label_rejected() {
        let catalog = catalog();
        let translations = translations();
        let resolver = Resolver::new(&catalog, &translations);
        let mut rng = StdRng::seed_from_u64(7);
        let err = resolver
            .resolve_random("1,9", &DisplayOptions::default(), &mut rng)
            .unwrap_err();
        assert_eq!(err, ResolutionError::UnknownGeneration("1,9".into()));
    }

    #[test]
    fn test_forced_shiny_random() {
        let catalog = catalog();
        let translations = translations();
        let resolver = Resolver::new(&catalog, &translations);
        let mut rng = StdRng::seed_from_u64(11);
        let options = DisplayOptions {
            shiny: true,
            large: true,
            ..Default::default()
        };
        for _ in 0..50 {
            let r = resolver.resolve_random("1-2", &options, &mut rng).unwrap();
            assert_eq!(r.key.palette, Palette::Shiny);
            assert_eq!(r.key.size, Size::Large);
        }
    }

    #[test]
    fn test_accented_latin_goes_through_table() {
        let catalog = catalog();
        let translations = translations();
        let resolver = Resolver::new(&catalog, &translations);
        let err = resolver
            .resolve_by_name("flabébé", &DisplayOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Resolution(ResolutionError::UnknownForeignName(ref n)) if n == "flabébé"
        ));
    }

    #[test]
    fn test_only_by_name_reads_the_table() {
        let dir = tempfile::TempDir::new().unwrap();
        let catalog = catalog();
        let translations = LazyTranslations::new(dir.path().join("translations.json"));
        let resolver = Resolver::new(&catalog, &translations);
        let mut rng = StdRng::seed_from_u64(5);

        resolver
            .resolve_random("1-2", &DisplayOptions::default(), &mut rng)
            .unwrap();
        resolver
            .resolve_by_name("charizard", &DisplayOptions::default())
            .unwrap();
        assert!(!translations.is_loaded());

        let err = resolver
            .resolve_by_name("リザードン", &DisplayOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "{err:?}");
    }
}
