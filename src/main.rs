//! Command line entry point.
//!
//! A line-oriented front end over the [`Engine`]: every line read from stdin
//! is mapped to an engine intent, and every published view is rendered to
//! stdout as it arrives.
//!
//! # Lifecycle
//!
//! 1. **Load**: Parse flags and the optional TOML config, initialize tracing
//! 2. **Start**: Build the city source and favorites store, start the engine
//! 3. **Render**: Print the view on every change, and the selection detail
//!    whenever the selection changes
//! 4. **Input**: Map lines to intents until `quit` or end of input
//!
//! # Commands
//!
//! - `/<text>` or `search <text>`: Set the query (`/` alone clears it)
//! - `only`: Toggle the favorites-only filter
//! - `fav <id>`: Toggle a city's favorite flag
//! - `select <id>`: Select a city for the detail view
//! - `clear`: Clear the query
//! - `show`: Print the current view and selection again
//! - `reload`: Reload the city collection
//! - `help`: List commands
//! - `quit`: Exit

#![allow(clippy::multiple_crate_versions)]

use citysearch::observability::init_tracing;
use citysearch::ui::{render, render_selection};
use citysearch::{initialize, CityId, Config, Engine};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;

const HELP: &str = "\
Commands:
  /<text>, search <text>   set the query
  only                     toggle favorites-only
  fav <id>                 toggle favorite
  select <id>              show city details
  clear                    clear the query
  show                     print the current view
  reload                   reload cities
  help                     this text
  quit                     exit";

/// Browse cities with prefix search and favorites.
#[derive(Debug, Parser)]
#[command(name = "citysearch", version, about)]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// URL of the JSON city feed.
    #[arg(long, conflicts_with = "file")]
    url: Option<String>,

    /// Local JSON city file.
    #[arg(long)]
    file: Option<PathBuf>,

    /// Favorites file.
    #[arg(long, conflicts_with = "ephemeral")]
    favorites: Option<PathBuf>,

    /// Keep favorites in memory only.
    #[arg(long)]
    ephemeral: bool,

    /// Tracing filter, e.g. `debug`.
    #[arg(long)]
    trace_level: Option<String>,
}

impl Args {
    /// Loads the config file (if any) and applies flags on top.
    fn into_config(self) -> citysearch::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };

        if let Some(url) = self.url {
            config.cities_url = Some(url);
            config.cities_file = None;
        }
        if let Some(file) = self.file {
            config.cities_file = Some(file);
        }
        if let Some(favorites) = self.favorites {
            config.favorites_path = Some(favorites);
        }
        if self.ephemeral {
            config.ephemeral = true;
        }
        if let Some(level) = self.trace_level {
            config.trace_level = Some(level);
        }

        Ok(config)
    }
}

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Search(String),
    FavoritesOnly,
    Favorite(CityId),
    Select(CityId),
    Clear,
    Show,
    Reload,
    Help,
    Quit,
}

impl Command {
    /// Parses a line. Errors carry a message for the user.
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        if let Some(query) = line.strip_prefix('/') {
            return Ok(Some(Self::Search(query.to_string())));
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        let command = match word {
            "search" => Self::Search(rest.to_string()),
            "only" => Self::FavoritesOnly,
            "fav" => Self::Favorite(parse_id(rest)?),
            "select" => Self::Select(parse_id(rest)?),
            "clear" => Self::Clear,
            "show" => Self::Show,
            "reload" => Self::Reload,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(format!("unknown command `{other}`, type `help`")),
        };
        Ok(Some(command))
    }
}

fn parse_id(text: &str) -> Result<CityId, String> {
    text.parse()
        .map_err(|_| format!("expected a city id, got `{text}`"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Args::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("citysearch: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config);

    let engine = match initialize(&config) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            eprintln!("citysearch: {e}");
            return ExitCode::FAILURE;
        }
    };

    let views = tokio::spawn(print_views(engine.observe_view_state()));
    let selections = tokio::spawn(print_selection(engine.selection().observe_selection()));

    let result = run_commands(&engine).await;

    views.abort();
    selections.abort();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "input failed");
            eprintln!("citysearch: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn print_views(mut views: watch::Receiver<citysearch::ViewState>) {
    loop {
        let text = render(&views.borrow_and_update());
        print!("{text}");
        if views.changed().await.is_err() {
            break;
        }
    }
}

async fn print_selection(mut selection: watch::Receiver<Option<citysearch::City>>) {
    while selection.changed().await.is_ok() {
        let text = render_selection(selection.borrow_and_update().as_ref());
        print!("{text}");
    }
}

async fn run_commands(engine: &Engine) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        let _span = tracing::debug_span!("cli_command", ?command).entered();
        tracing::debug!("processing command");

        match command {
            Command::Search(query) => engine.set_query(query),
            Command::FavoritesOnly => engine.toggle_favorites_only(),
            Command::Favorite(city_id) => engine.toggle_favorite(city_id),
            Command::Select(city_id) => {
                if !engine.select_city(city_id) {
                    println!("no loaded city with id {city_id}");
                }
            }
            Command::Clear => engine.set_query(""),
            Command::Show => {
                print!("{}", render(&engine.view_state()));
                print!("{}", render_selection(engine.selection().current().as_ref()));
            }
            Command::Reload => engine.load_cities(),
            Command::Help => println!("{HELP}"),
            Command::Quit => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_forms() {
        assert_eq!(Command::parse("/Al"), Ok(Some(Command::Search("Al".into()))));
        assert_eq!(Command::parse("/"), Ok(Some(Command::Search(String::new()))));
        assert_eq!(
            Command::parse("search  New York"),
            Ok(Some(Command::Search("New York".into())))
        );
        assert_eq!(Command::parse("search"), Ok(Some(Command::Search(String::new()))));
    }

    #[test]
    fn parses_id_commands() {
        assert_eq!(Command::parse("fav 42"), Ok(Some(Command::Favorite(42))));
        assert_eq!(Command::parse(" select 7 "), Ok(Some(Command::Select(7))));
        assert!(Command::parse("fav abc").is_err());
        assert!(Command::parse("select").is_err());
    }

    #[test]
    fn parses_keywords() {
        assert_eq!(Command::parse(""), Ok(None));
        assert_eq!(Command::parse("only"), Ok(Some(Command::FavoritesOnly)));
        assert_eq!(Command::parse("quit"), Ok(Some(Command::Quit)));
        assert!(Command::parse("frobnicate").is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "cities_file = \"a.json\"\ntrace_level = \"warn\"\n").unwrap();

        let args = Args::parse_from([
            "citysearch",
            "--config",
            path.to_str().unwrap(),
            "--url",
            "http://localhost/cities.json",
            "--ephemeral",
        ]);
        let config = args.into_config().unwrap();

        assert_eq!(config.cities_file, None);
        assert_eq!(config.cities_url.as_deref(), Some("http://localhost/cities.json"));
        assert!(config.ephemeral);
        assert_eq!(config.trace_level.as_deref(), Some("warn"));
    }
}
