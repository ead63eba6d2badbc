//! Sidereal chart HTTP server.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin sidereal-server -- --config sidereal.toml
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 10000)
//! - `SE_EPHE_PATH`: Swiss Ephemeris data directory (default: ./ephe)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sidereal_chart::http::{create_router, AppState};
use sidereal_chart::{Settings, SwissEph};

#[derive(Parser)]
#[command(name = "sidereal-server", about = "Serve sidereal planet positions over HTTP")]
struct Cli {
    /// TOML settings file (default: sidereal.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let cli = Cli::parse();
    info!("Starting sidereal chart server");

    let settings = Settings::load(cli.config.as_deref())?;
    let ephemeris = SwissEph::new(&settings.ephemeris_config())?;

    let state = AppState::new(Arc::new(ephemeris), settings.ephemeris.ayanamsa);
    let app = create_router(state);

    let addr: SocketAddr = settings.bind_address().parse()?;
    info!("Server listening on http://{}", addr);
    info!("Default ayanamsa: {}", settings.ephemeris.ayanamsa);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
