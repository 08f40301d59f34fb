use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dashboard_core::{Config, directory};
use inquire::{Password, Text};
use tracing::info;

use crate::{
    app::{self, App, Settled},
    completer::CityCompleter,
    render,
};

/// Typed at the search prompt to refetch the city list.
const RELOAD_COMMAND: &str = "/reload";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Weather dashboard for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store a WeatherAPI.com key.
    Configure,

    /// Show the dashboard for a city once.
    Show {
        /// City name; defaults to the configured default query.
        city: Option<String>,
    },

    /// List known city names containing TEXT.
    Cities {
        text: String,

        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Refetch the list instead of using the local cache.
        #[arg(long)]
        reload: bool,
    },

    /// Search cities with autocomplete and refresh the dashboard (default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { city } => show(city).await,
            Command::Cities { text, limit, reload } => cities(&text, limit, reload).await,
            Command::Interactive => interactive().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let key = Password::new("WeatherAPI.com key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    cfg.set_api_key(key);
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(city: Option<String>) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let query = city.unwrap_or_else(|| cfg.default_query.clone());
    let app = App::from_config(&cfg, &query)?;

    let mut events = app.start();
    match app.next_settled(&mut events).await {
        Settled::Updated(view) => print!("{}", render::dashboard(&view)),
        Settled::Failed { message, .. } => bail!("Could not fetch forecast: {message}"),
        Settled::Closed => bail!("Forecast repository shut down"),
    }
    Ok(())
}

async fn cities(text: &str, limit: usize, reload: bool) -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let city_directory = app::city_directory(&cfg)?;

    let all = if reload { city_directory.reload().await } else { city_directory.load().await };
    if all.is_empty() {
        bail!("City list is unavailable; try again with --reload");
    }

    for name in directory::filter_limited(&all, text, limit) {
        println!("{name}");
    }
    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let app = App::from_config(&cfg, &cfg.default_query)?;

    let mut events = app.start();
    let (mut all, first) = tokio::join!(app.directory.load(), app.next_settled(&mut events));
    info!(cities = all.len(), "city directory ready");
    if !present(first) {
        return Ok(());
    }

    loop {
        let completer = CityCompleter::new(all.clone());
        let input = tokio::task::spawn_blocking(move || {
            Text::new("City:")
                .with_autocomplete(completer)
                .with_help_message("Enter to search, empty or Esc to quit, /reload to refresh city list")
                .prompt_skippable()
        })
        .await
        .context("Prompt task failed")??;

        let Some(input) = input.filter(|s| !s.trim().is_empty()) else {
            break;
        };

        if input.trim() == RELOAD_COMMAND {
            all = app.directory.reload().await;
            println!("Loaded {} cities.", all.len());
            continue;
        }

        match app.store.set_query(&input) {
            Ok(true) => {
                if !present(app.next_settled(&mut events).await) {
                    break;
                }
            }
            Ok(false) => match app.current_view() {
                Some(view) => print!("{}", render::dashboard(&view)),
                None => println!("Still waiting for '{}'.", input.trim()),
            },
            Err(e) => println!("{e}"),
        }
    }

    Ok(())
}

/// Print the settled state; `false` once the repository is gone.
fn present(settled: Settled) -> bool {
    match settled {
        Settled::Updated(view) => {
            print!("{}", render::dashboard(&view));
            true
        }
        Settled::Failed { message, fallback } => {
            println!("Could not fetch forecast: {message}");
            if let Some(view) = fallback {
                println!("Showing last known forecast.\n");
                print!("{}", render::dashboard(&view));
            }
            true
        }
        Settled::Closed => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["weather-dashboard"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn show_takes_an_optional_city() {
        let cli = Cli::try_parse_from(["weather-dashboard", "show", "Paris"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Show { city: Some(ref c) }) if c == "Paris"));

        let cli = Cli::try_parse_from(["weather-dashboard", "show"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Show { city: None })));
    }

    #[test]
    fn cities_defaults_limit() {
        let cli = Cli::try_parse_from(["weather-dashboard", "cities", "la"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Cities { ref text, limit: 20, reload: false }) if text == "la"
        ));
    }
}
