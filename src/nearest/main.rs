//! Command-line nearest machine lookup.
//!
//! Takes the current position as flags, resolves the closest machine in the
//! dataset and prints it as text or JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use otto_finder::app::AppState;
use otto_finder::config::DatasetConfig;
use otto_finder::GeoPoint;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "nearest")]
#[command(about = "Find the nearest vending machine to a position")]
struct Args {
    /// Latitude (-90 to 90)
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude (-180 to 180)
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Dataset file (.json, .csv, optionally .gz); bundled data if omitted
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dataset = DatasetConfig {
        path: args.dataset.clone(),
    }
    .open()?;
    debug!("Using dataset {} ({} machines)", dataset.source(), dataset.len());

    let mut app = AppState::new();
    app.set_location(GeoPoint::new(args.lat, args.lon));

    let result = app
        .find_nearest(&dataset)
        .with_context(|| format!("No nearest machine for ({}, {})", args.lat, args.lon))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("{}", result);
    }

    Ok(())
}
