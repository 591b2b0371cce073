//! build-translations - offline builder for translations.json
//!
//! Reads a saved copy of the foreign-name reference page and writes the
//! table artifact the CLI loads. Never fetches anything itself.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pokemon_colorscripts::hashing::sha256_hex;
use pokemon_colorscripts::scrape::extract_translations;
use pokemon_colorscripts::{Error, VERSION};

#[derive(Parser)]
#[command(name = "build-translations")]
#[command(version = VERSION)]
#[command(about = "Build translations.json from a saved foreign-name reference page")]
struct Cli {
    /// Saved HTML of the reference page
    input: PathBuf,

    /// Where to write the table
    #[arg(short, long, default_value = "translations.json")]
    output: PathBuf,
}

fn run(cli: &Cli) -> Result<usize, Error> {
    let bytes = fs::read(&cli.input).map_err(|source| Error::Io {
        path: cli.input.clone(),
        source,
    })?;
    let html = String::from_utf8_lossy(&bytes);

    let table = extract_translations(&html);
    info!(input = %cli.input.display(), entries = table.len(), "extracted translations");
    table.save(&cli.output, Some(sha256_hex(&bytes)))?;
    Ok(table.len())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(count) => {
            println!("pokemon:{count}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
