//! Query server for region lookups.
//!
//! Loads the boundary dataset once at startup and serves point-in-polygon
//! lookups over HTTP. A dataset that cannot be loaded aborts startup.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use statepip::config::Config;
use statepip::{api, load_regions, PipService};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "query")]
#[command(about = "Region lookup query server")]
struct Args {
    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address (overrides config)
    #[arg(short, long)]
    listen: Option<String>,

    /// GeoJSON boundary dataset (overrides config)
    #[arg(short, long)]
    dataset: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    if let Some(dataset) = args.dataset {
        config.dataset.path = dataset;
    }

    info!("Statepip Query Server");

    let index = load_regions(&config.dataset.path).map_err(|e| {
        let message = format!(
            "Failed to load boundary dataset '{}'",
            config.dataset.path.display()
        );
        let message = match e.hint() {
            Some(hint) => format!("{}.\n{}", message, hint),
            None => message,
        };
        anyhow::Error::new(e).context(message)
    })?;

    if index.is_empty() {
        warn!(
            "Dataset '{}' contains no usable regions; every lookup will be empty",
            config.dataset.path.display()
        );
    }

    info!(
        "Serving {} regions ({} polygons)",
        index.len(),
        index.polygon_count()
    );

    let service = Arc::new(PipService::new(index));
    let app = api::router(service);

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
