//! ludex-gi - Game Ingest Microservice
//!
//! Imports storefront game metadata into the Ludex catalog database,
//! parses free-text hardware requirements, and resolves hardware benchmark
//! scores against the local benchmark catalog.

use anyhow::Result;
use clap::Parser;
use ludex_common::config::ServiceSettings;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use ludex_gi::services::hardware::HardwareTable;
use ludex_gi::services::steam_client::SteamClient;
use ludex_gi::AppState;

#[derive(Parser, Debug)]
#[command(name = "ludex-gi", about = "Ludex game ingest microservice")]
struct Args {
    /// Service root folder (database and media cache live here)
    #[arg(long)]
    root_folder: Option<String>,

    /// HTTP listen port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let settings = ServiceSettings::resolve(args.root_folder.as_deref(), args.port);

    info!("Starting ludex-gi (Game Ingest) microservice");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Root folder: {}", settings.root_folder.display());

    settings
        .ensure_directories()
        .map_err(|e| anyhow::anyhow!("Failed to initialize root folder: {}", e))?;

    let db_path = settings.database_path();
    info!("Database: {}", db_path.display());

    let db_pool = ludex_gi::db::init_database_pool(&db_path).await?;
    info!("Database connection established");

    let cpu_rows = ludex_gi::db::benchmarks::count(&db_pool, HardwareTable::Cpu).await?;
    let gpu_rows = ludex_gi::db::benchmarks::count(&db_pool, HardwareTable::Gpu).await?;
    info!(
        "Benchmark catalog: {} CPU models, {} GPU models",
        cpu_rows, gpu_rows
    );

    let steam = Arc::new(
        SteamClient::new(&settings.steam_country, &settings.steam_language)
            .map_err(|e| anyhow::anyhow!("Failed to create storefront client: {}", e))?,
    );
    info!(
        "Storefront locale: cc={} l={}",
        settings.steam_country, settings.steam_language
    );

    let state = AppState::new(db_pool, steam, settings.media_dir());
    let app = ludex_gi::build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", settings.port)).await?;
    info!("Listening on http://127.0.0.1:{}", settings.port);
    info!("Health check: http://127.0.0.1:{}/api/health", settings.port);

    axum::serve(listener, app).await?;

    Ok(())
}
