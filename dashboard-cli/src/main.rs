//! Binary crate for the `weather-dashboard` terminal front end.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive city search with autocomplete
//! - Rendering dashboard panels as text

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod app;
mod cli;
mod completer;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
