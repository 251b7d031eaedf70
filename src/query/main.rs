//! Query front-end for the gazetteer.
//!
//! `lookup` resolves a single coordinate and prints the match as JSON.
//! `serve` exposes the same lookup over HTTP.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use revgeo::log::TracingLogger;
use revgeo::{Config, Resolver};

mod server;
use server::{router, AppState};

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "Nearest-place lookups against a gazetteer")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

/// Options shared by every subcommand.
#[derive(clap::Args, Debug)]
struct Source {
    /// Gazetteer SQLite file
    #[arg(short, long)]
    dataset: PathBuf,

    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Source {
    fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load_from_file(path),
            None => Ok(Config::default()),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve one coordinate and print the nearest feature
    Lookup {
        #[command(flatten)]
        source: Source,

        /// Latitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// Run the HTTP lookup server
    Serve {
        #[command(flatten)]
        source: Source,

        /// Listen address (overrides the config file)
        #[arg(short, long)]
        listen: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so `lookup` output stays pipeable.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    match args.command {
        Command::Lookup { source, lat, lon } => {
            let config = source.load_config()?;
            lookup(&source.dataset, &config, lat, lon)
        }
        Command::Serve { source, listen } => {
            let config = source.load_config()?;
            let listen = listen.unwrap_or_else(|| config.server.listen.clone());
            serve(&source.dataset, &config, &listen).await
        }
    }
}

fn open_resolver(dataset: &Path, config: &Config) -> Result<Resolver> {
    Resolver::open_with(dataset, config.resolver, Arc::new(TracingLogger))
        .with_context(|| format!("Failed to open gazetteer {}", dataset.display()))
}

fn lookup(dataset: &Path, config: &Config, lat: f64, lon: f64) -> Result<()> {
    let resolver = open_resolver(dataset, config)?;
    let location = resolver.resolve(lat, lon)?;
    println!("{}", serde_json::to_string_pretty(&location)?);
    Ok(())
}

async fn serve(dataset: &Path, config: &Config, listen: &str) -> Result<()> {
    info!("revgeo query server");
    let resolver = open_resolver(dataset, config)?;

    let feature_count = resolver.store().feature_count()?;
    info!(
        "Connected to gazetteer '{}' with {} features",
        dataset.display(),
        feature_count
    );

    let app = router(Arc::new(AppState::new(resolver, feature_count)));

    info!("Starting server on {}", listen);
    let listener = tokio::net::TcpListener::bind(listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
