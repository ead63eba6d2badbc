//! One-shot generator: computes a single chart and writes it as JSON for
//! static publishing.

use std::env;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use sidereal_chart::{
    calculate_chart, write_chart_json, Ayanamsa, ChartRequest, Dms, EphemerisConfig, Settings,
    SwissEph,
};

#[derive(Parser)]
#[command(name = "sidereal_chart", about = "Write sidereal planet positions to a JSON file")]
struct Args {
    #[arg(long, default_value_t = 2025)]
    year: i32,
    #[arg(long, default_value_t = 3)]
    month: u32,
    #[arg(long, default_value_t = 10)]
    day: u32,
    /// Local hour with fraction, e.g. 12.5 for 12:30
    #[arg(long, default_value_t = 12.0)]
    hour: f64,
    /// IANA timezone name
    #[arg(long, default_value = "Asia/Kolkata")]
    timezone: String,
    /// lahiri, raman, kp_old, kp_new or kp_krishnamurti
    #[arg(long)]
    ayanamsa: Option<Ayanamsa>,
    /// TOML settings file (default: sidereal.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured ephemeris data directory
    #[arg(long)]
    ephe_path: Option<PathBuf>,
    /// Overrides the configured output file
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .init();

    let args = Args::parse();
    let settings = Settings::load(args.config.as_deref())?;

    let ephe_config = match args.ephe_path {
        Some(path) => EphemerisConfig::new(path),
        None => settings.ephemeris_config(),
    };
    let eph = SwissEph::new(&ephe_config)?;

    let request = ChartRequest::new(args.year, args.month, args.day, args.hour, args.timezone)
        .with_ayanamsa(args.ayanamsa.unwrap_or(settings.ephemeris.ayanamsa));
    let chart = calculate_chart(&eph, &request)?;

    info!("UT {} (JD {:.6})", chart.ut_time, chart.julian_day);
    info!(
        "{} ayanamsa {}",
        chart.ayanamsa,
        Dms::from_degrees(chart.ayanamsa_value)
    );
    for (body, position) in &chart.positions {
        info!(
            "{:<18} {:<12} {}",
            body.name(),
            position.sign.name(),
            Dms::from_degrees(position.degree_in_sign)
        );
    }

    let output = args.output.unwrap_or(settings.output.path);
    write_chart_json(&chart, &output)?;
    println!("API JSON Generated: {}", output.display());

    Ok(())
}
