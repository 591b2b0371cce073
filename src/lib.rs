//! pokemon-colorscripts - colored unicode art of pokemon for the terminal
//!
//! The crate resolves a name, form, or random generation pick against a
//! read-only catalog and streams the matching pre-rendered art file.
//! Nothing here renders art; the files are produced offline.

pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod generations;
pub mod hashing;
pub mod key;
pub mod resolver;
pub mod scrape;
pub mod script;
pub mod selector;
pub mod store;
pub mod translation;

pub use app::App;
pub use catalog::{Catalog, CatalogEntry, REGULAR_FORM};
pub use config::Config;
pub use error::{Error, Result};
pub use generations::{GenerationRange, GenerationTable, STANDARD_GENERATIONS};
pub use key::{AssetKey, DisplayOptions, Palette, Size};
pub use resolver::{Resolution, ResolutionError, Resolver, SHINY_RATE};
pub use selector::GenerationSelector;
pub use store::AssetStore;
pub use translation::{LazyTranslations, TranslationTable};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
