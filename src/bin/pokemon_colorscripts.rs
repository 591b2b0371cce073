//! pokemon-colorscripts CLI
//!
//! Modes, first match wins: --list, --name, --random, --check.
//! With no mode the usage help is printed.
//! Returns 1 on any resolution, usage, or startup error.

use clap::{CommandFactory, Parser};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use pokemon_colorscripts::resolver::FORM_WITH_RANDOM;
use pokemon_colorscripts::{App, Config, DisplayOptions, Error, ResolutionError, VERSION};

#[derive(Parser)]
#[command(name = "pokemon-colorscripts")]
#[command(version = VERSION)]
#[command(about = "CLI utility to print out unicode image of a pokemon in your shell")]
#[command(override_usage = "pokemon-colorscripts [OPTION] [POKEMON NAME]")]
struct Cli {
    /// Print list of all pokemon
    #[arg(short, long)]
    list: bool,

    /// Select pokemon by name. Generally spelled like in the games. A few
    /// exceptions are nidoran-f, nidoran-m, mr-mime, farfetchd, flabebe,
    /// type-null etc. Perhaps grep the output of --list if in doubt.
    #[arg(short, long, value_name = "NAME")]
    name: Option<String>,

    /// Show an alternate form of a pokemon
    #[arg(short, long)]
    form: Option<String>,

    /// Do not display pokemon name
    #[arg(long)]
    no_title: bool,

    /// Show the shiny version of the pokemon instead
    #[arg(short, long)]
    shiny: bool,

    /// Show a larger version of the sprite
    #[arg(short, long)]
    big: bool,

    /// Show a random pokemon. Optionally followed by a generation number,
    /// a range (1-3) or a list (1,3,6) of generations.
    #[arg(short, long, value_name = "GENERATIONS", num_args = 0..=1)]
    random: Option<Option<String>>,

    /// Verify that every pokemon and form has art for all sizes and palettes
    #[arg(long)]
    check: bool,

    /// Install directory holding pokemon.json and colorscripts/
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,
}

#[derive(Debug, PartialEq, Eq)]
enum Mode {
    List,
    Name(String),
    Random(Option<String>),
    Check,
}

impl Cli {
    fn mode(&self) -> Option<Mode> {
        if self.list {
            Some(Mode::List)
        } else if let Some(name) = &self.name {
            Some(Mode::Name(name.clone()))
        } else if let Some(selector) = &self.random {
            Some(Mode::Random(selector.clone()))
        } else if self.check {
            Some(Mode::Check)
        } else {
            None
        }
    }

    fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            shiny: self.shiny,
            large: self.big,
            show_title: !self.no_title,
            form: self.form.clone(),
        }
    }
}

fn report(err: &Error) {
    eprintln!("{err}");
    if let Error::Resolution(inner) = err {
        if let Some(hint) = inner.hint() {
            eprintln!("{hint}");
        }
    }
}

/// `Ok(false)` when `--check` finds missing art.
fn run<W: Write>(cli: &Cli, mode: Mode, out: &mut W) -> Result<bool, Error> {
    let options = cli.display_options();

    // Usage errors are decided before anything is loaded.
    if options.requested_form().is_some() {
        match &mode {
            Mode::Name(_) => {}
            Mode::Random(_) => {
                return Err(ResolutionError::InvalidUsage(FORM_WITH_RANDOM.to_string()).into())
            }
            Mode::List | Mode::Check => {
                return Err(
                    ResolutionError::InvalidUsage("--form requires --name".to_string()).into(),
                )
            }
        }
    }

    let config = Config::discover(cli.root.as_deref())?;
    let app = App::open(&config)?;

    match mode {
        Mode::List => app.list(out)?,
        Mode::Name(name) => app.show(&name, &options, out)?,
        Mode::Random(selector) => {
            let mut rng = rand::thread_rng();
            app.show_random(selector.as_deref(), &options, &mut rng, out)?
        }
        Mode::Check => {
            let missing = app.check(out)?;
            if missing > 0 {
                eprintln!("{missing} asset(s) missing");
                return Ok(false);
            }
        }
    }

    out.flush().map_err(Error::Output)?;
    Ok(true)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(mode) = cli.mode() else {
        if let Err(e) = Cli::command().print_help() {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    };

    let stdout = io::stdout();
    match run(&cli, mode, &mut stdout.lock()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            report(&e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokemon_colorscripts::key::{AssetKey, Palette, Size};
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("pokemon-colorscripts").chain(args.iter().copied()))
            .unwrap()
    }

    fn usage_message(err: Error) -> String {
        match err {
            Error::Resolution(ResolutionError::InvalidUsage(msg)) => msg,
            other => panic!("expected a usage error, got {other:?}"),
        }
    }

    /// One pokemon; without `complete` the shiny art is left out.
    fn install(complete: bool) -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(
            root.join("pokemon.json"),
            r#"[{"name": "bulbasaur", "forms": ["regular"]}]"#,
        )
        .unwrap();
        fs::write(
            root.join("generations.json"),
            r#"[{"label": "1", "start": 1, "end": 1}]"#,
        )
        .unwrap();

        let art = root.join("colorscripts");
        for size in Size::ALL {
            for palette in Palette::ALL {
                if !complete && palette == Palette::Shiny {
                    continue;
                }
                let path = art.join(AssetKey::new(size, palette, "bulbasaur").relative_path());
                fs::create_dir_all(path.parent().unwrap()).unwrap();
                fs::write(path, "art").unwrap();
            }
        }
        dir
    }

    #[test]
    fn test_mode_precedence() {
        let cli = parse(&["--check", "-r", "2", "-n", "pikachu", "-l"]);
        assert_eq!(cli.mode(), Some(Mode::List));

        let cli = parse(&["--check", "-r", "2", "-n", "pikachu"]);
        assert_eq!(cli.mode(), Some(Mode::Name("pikachu".into())));

        let cli = parse(&["--check", "-r", "2"]);
        assert_eq!(cli.mode(), Some(Mode::Random(Some("2".into()))));

        let cli = parse(&["--check"]);
        assert_eq!(cli.mode(), Some(Mode::Check));
    }

    #[test]
    fn test_no_mode_means_help() {
        assert_eq!(parse(&[]).mode(), None);
        assert_eq!(parse(&["-s", "-b", "--no-title"]).mode(), None);
    }

    #[test]
    fn test_bare_random_has_no_selector() {
        assert_eq!(parse(&["-r"]).mode(), Some(Mode::Random(None)));
        assert_eq!(parse(&["-r", "-s"]).mode(), Some(Mode::Random(None)));
        assert_eq!(parse(&["-r", "1-4"]).mode(), Some(Mode::Random(Some("1-4".into()))));
    }

    #[test]
    fn test_display_options_from_flags() {
        let options = parse(&["-n", "charizard"]).display_options();
        assert_eq!(options, DisplayOptions::default());
        assert!(options.show_title);

        let options = parse(&["-n", "charizard", "-s", "-b", "--no-title", "-f", "mega-x"])
            .display_options();
        assert!(options.shiny);
        assert!(options.large);
        assert!(!options.show_title);
        assert_eq!(options.requested_form(), Some("mega-x"));
    }

    #[test]
    fn test_form_outside_name_fails_before_loading() {
        // The root does not exist, so reaching discovery would be RootNotFound.
        for mode_flag in ["-l", "--check"] {
            let cli = parse(&[mode_flag, "-f", "gmax", "--root", "/nonexistent"]);
            let mode = cli.mode().unwrap();
            let err = run(&cli, mode, &mut Vec::new()).unwrap_err();
            assert_eq!(usage_message(err), "--form requires --name");
        }

        let cli = parse(&["-r", "-f", "gmax", "--root", "/nonexistent"]);
        let mode = cli.mode().unwrap();
        let err = run(&cli, mode, &mut Vec::new()).unwrap_err();
        assert_eq!(usage_message(err), FORM_WITH_RANDOM);
    }

    #[test]
    fn test_missing_root_is_startup_error() {
        let dir = TempDir::new().unwrap();
        let cli = parse(&["-l", "--root", &dir.path().display().to_string()]);
        let mode = cli.mode().unwrap();
        assert!(matches!(
            run(&cli, mode, &mut Vec::new()),
            Err(Error::RootNotFound)
        ));
    }

    #[test]
    fn test_check_reports_missing_art() {
        let complete = install(true);
        let cli = parse(&["--check", "--root", &complete.path().display().to_string()]);
        let mut out = Vec::new();
        assert!(run(&cli, Mode::Check, &mut out).unwrap());
        assert!(out.is_empty());

        let partial = install(false);
        let cli = parse(&["--check", "--root", &partial.path().display().to_string()]);
        let mut out = Vec::new();
        assert!(!run(&cli, Mode::Check, &mut out).unwrap());
        let listing = String::from_utf8(out).unwrap();
        assert_eq!(listing.lines().count(), 2);
        assert!(listing.lines().all(|l| l.starts_with("missing ")));
    }

    #[test]
    fn test_name_mode_prints_title_and_art() {
        let dir = install(true);
        let cli = parse(&["-n", "bulbasaur", "--root", &dir.path().display().to_string()]);
        let mode = cli.mode().unwrap();
        let mut out = Vec::new();
        assert!(run(&cli, mode, &mut out).unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "bulbasaur\nart\n");
    }
}
