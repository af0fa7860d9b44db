//! Batch region lookup.
//!
//! Reads a CSV of latitude/longitude points, resolves each against the
//! boundary dataset in parallel and writes the matched region names.

mod batch;

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use statepip::{load_regions, PipService};

use crate::batch::{read_points, resolve_points, write_rows};

#[derive(Parser, Debug)]
#[command(name = "lookup")]
#[command(about = "Resolve a CSV of points to containing regions")]
struct Args {
    /// GeoJSON boundary dataset
    #[arg(short, long, default_value = statepip::config::DEFAULT_DATASET)]
    dataset: PathBuf,

    /// CSV with `latitude` and `longitude` columns
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean CSV
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Statepip Batch Lookup");

    let index = load_regions(&args.dataset)
        .with_context(|| format!("Failed to load boundary dataset '{}'", args.dataset.display()))?;
    let service = PipService::new(index);

    let input = File::open(&args.input)
        .with_context(|| format!("Failed to open input '{}'", args.input.display()))?;
    let points = read_points(BufReader::new(input))?;
    info!("Resolving {} points", points.len());

    // Create progress bar
    let pb = ProgressBar::new(points.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})",
            )?
            .progress_chars("#>-"),
    );

    let rows = resolve_points(&service, &points, &pb);
    pb.finish_with_message("Lookup complete");

    let rejected = rows.iter().filter(|r| r.regions.is_none()).count();
    if rejected > 0 {
        warn!("{} rows had missing or out-of-range coordinates", rejected);
    }

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output '{}'", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };
    write_rows(writer, &rows)?;

    info!("Done: {} rows written", rows.len());

    Ok(())
}
