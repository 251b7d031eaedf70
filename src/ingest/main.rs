//! GeoNames ingest pipeline.
//!
//! Reads a GeoNames cities dump plus the admin1 and country name tables and
//! writes a new gazetteer file for the resolver.

mod geonames;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use revgeo::store::GazetteerWriter;

use crate::geonames::{open_dump, tsv_reader, CityLine, NameLookups};

#[derive(Parser, Debug)]
#[command(name = "ingest")]
#[command(about = "Build a gazetteer from GeoNames dumps")]
struct Args {
    /// GeoNames cities file (cities500.txt, allCountries.txt, optionally .gz)
    #[arg(long)]
    cities: PathBuf,

    /// admin1CodesASCII.txt for region names
    #[arg(long)]
    admin1: Option<PathBuf>,

    /// countryInfo.txt for country names
    #[arg(long)]
    countries: Option<PathBuf>,

    /// Output gazetteer file (must not exist)
    #[arg(short, long)]
    output: PathBuf,

    /// Skip features with a smaller population
    #[arg(long, default_value = "0")]
    min_population: u64,

    /// Rows per insert transaction
    #[arg(long, default_value = "5000")]
    batch_size: usize,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("revgeo ingest");
    info!("Cities: {}", args.cities.display());

    if args.admin1.is_none() {
        warn!("No admin1 file given; admin names will be empty");
    }
    if args.countries.is_none() {
        warn!("No country file given; country names will be empty");
    }
    let lookups = NameLookups::load(args.admin1.as_deref(), args.countries.as_deref())?;

    let mut writer = GazetteerWriter::create(&args.output)?;
    let mut reader = tsv_reader(open_dump(&args.cities)?);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {pos} features ({per_sec})")?,
    );

    let batch_size = args.batch_size.max(1);
    let mut batch = Vec::with_capacity(batch_size);
    let mut skipped = 0u64;
    let mut malformed = 0u64;

    for result in reader.records() {
        let record = result.context("Failed to read cities file")?;
        let city = match CityLine::parse(&record) {
            Ok(city) => city,
            Err(e) => {
                let line = record.position().map_or(0, |p| p.line());
                warn!("Skipping line {}: {:#}", line, e);
                malformed += 1;
                continue;
            }
        };

        if city.population < args.min_population {
            skipped += 1;
            continue;
        }

        batch.push(city.into_feature(&lookups));
        if batch.len() >= batch_size {
            writer.insert_batch(&batch)?;
            pb.set_position(writer.written());
            batch.clear();
        }
    }

    if !batch.is_empty() {
        writer.insert_batch(&batch)?;
        pb.set_position(writer.written());
    }

    info!("Building coordinate index...");
    let written = writer.finish()?;
    pb.finish_and_clear();

    info!(
        "Wrote {} features to {} ({} below population threshold, {} malformed)",
        written,
        args.output.display(),
        skipped,
        malformed
    );

    Ok(())
}
