//! Terrain suitability analyzer.
//!
//! One-shot CLI front-end for the analysis engine:
//! - Resolves the requested scope (viewport bbox or AOI ring)
//! - Runs the full pipeline against the configured elevation and Overpass endpoints
//! - Writes the heatmap PNG and a hotspot GeoJSON FeatureCollection
//! - Prints a machine-readable run summary to stdout

mod inputs;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use engine::{AnalysisEngine, AnalysisRequest, EngineConfig};
use scout_common::{BoundingBox, CancelToken};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "analyzer")]
#[command(about = "Terrain suitability analysis from the command line")]
struct Args {
    /// Viewport bounding box: "west,south,east,north" in degrees
    #[arg(long, env = "SCOUT_BBOX")]
    bbox: Option<String>,

    /// AOI ring: inline JSON [[lon,lat],...] or a path to a JSON file
    #[arg(long, env = "SCOUT_AOI")]
    aoi: Option<String>,

    /// Analysis scope: auto, aoi or viewport
    #[arg(long, default_value = "auto")]
    scope: String,

    /// Display zoom hint (the analysis zoom clamps it to 12-14)
    #[arg(long, default_value = "13")]
    zoom: f64,

    /// Wind origin: degrees or a cardinal (N, NE, E, SE, S, SW, W, NW)
    #[arg(long, default_value = "270")]
    wind: String,

    /// Thermal regime: day or evening
    #[arg(long, default_value = "evening")]
    time: String,

    /// Keep developed areas (buildings, roads) in the scores
    #[arg(long)]
    no_exclude_dev: bool,

    /// Exclusion buffer around development in meters (clamped to 20-120)
    #[arg(long, default_value = "80")]
    dev_buffer: f64,

    /// Output path for the heatmap PNG
    #[arg(long, default_value = "heatmap.png")]
    heatmap: PathBuf,

    /// Output path for the hotspot GeoJSON
    #[arg(long, default_value = "hotspots.geojson")]
    hotspots: PathBuf,

    /// Optional YAML file with engine settings
    #[arg(long, env = "SCOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn build_request(args: &Args) -> Result<AnalysisRequest> {
    let viewport = args
        .bbox
        .as_deref()
        .map(BoundingBox::from_csv)
        .transpose()
        .context("Invalid --bbox")?;
    let aoi = args.aoi.as_deref().map(inputs::parse_aoi).transpose()?;

    Ok(AnalysisRequest {
        scope: inputs::parse_scope(&args.scope)?,
        viewport,
        aoi,
        zoom_hint: args.zoom,
        wind_from_deg: inputs::parse_wind(&args.wind)?,
        time_of_day: inputs::parse_time(&args.time)?,
        exclude_development: !args.no_exclude_dev,
        development_buffer_m: args.dev_buffer,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Initialize tracing
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr; stdout carries the run summary.
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let engine_config = match &args.config {
        Some(path) => inputs::load_engine_config(path)?,
        None => EngineConfig::default(),
    };
    let request = build_request(&args)?;

    info!("Starting terrain analyzer");

    let engine = AnalysisEngine::new(engine_config)?;

    // Ctrl+C cancels the run between stages.
    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            info!("Received shutdown signal");
            cancel.cancel();
        });
    }

    let outcome = engine.analyze(&request, &cancel).await?;

    tokio::fs::write(&args.heatmap, &outcome.overlay_png)
        .await
        .with_context(|| format!("Failed to write heatmap: {}", args.heatmap.display()))?;

    let geojson = output::hotspots_geojson(&outcome.hotspots);
    tokio::fs::write(&args.hotspots, serde_json::to_vec_pretty(&geojson)?)
        .await
        .with_context(|| format!("Failed to write hotspots: {}", args.hotspots.display()))?;

    println!(
        "{}",
        serde_json::to_string_pretty(&output::run_summary(&outcome))?
    );

    info!(
        run_id = %outcome.run_id,
        elapsed_ms = outcome.elapsed_ms(),
        hotspots = outcome.hotspots.len(),
        warnings = outcome.warnings.len(),
        heatmap = %args.heatmap.display(),
        "Analysis session complete"
    );

    Ok(())
}
