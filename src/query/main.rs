//! Query server for nearest machine lookups.
//!
//! Provides an HTTP API over the machine dataset: nearest machine to a point
//! and point-to-point distance.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{routing::get, Router};
use clap::Parser;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use otto_finder::config::Config;

mod handlers;
use handlers::{distance_handler, health_handler, nearest_handler, AppState};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "Nearest vending machine query server")]
struct Args {
    /// Listen address (overrides config)
    #[arg(short, long)]
    listen: Option<String>,

    /// Dataset file (.json, .csv, optionally .gz); bundled data if omitted
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::DEBUG)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Otto Finder Query Server");

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Config::load_from_file(path)?
        }
        None => Config::default(),
    };
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    if let Some(dataset) = args.dataset {
        config.dataset.path = Some(dataset);
    }

    let dataset = config.dataset.open()?;
    if dataset.is_empty() {
        tracing::warn!("Dataset {} has no usable machines", dataset.source());
    }
    if let Some(bbox) = dataset.bbox() {
        info!(
            "Dataset covers lat {:.4}..{:.4}, lon {:.4}..{:.4}",
            bbox.min_lat, bbox.max_lat, bbox.min_lon, bbox.max_lon
        );
    }

    let state = Arc::new(AppState { dataset });

    let app = router(state);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/nearest", get(nearest_handler))
        .route("/v1/distance", get(distance_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
