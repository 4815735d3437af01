use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use runtime::frame::Frame;
use visibility::engine::{PassOutcome, Trigger, VisibilityEngine};
use visibility::point::{EventId, EventPoint};
use visibility::region::SelectorRegion;
use visibility::synthetic::SyntheticBridge;

/// Headless visibility probe: replays a camera sweep over a dataset of
/// geotagged events and reports the selector contents per frame.
#[derive(Parser, Debug)]
#[command(author, version, about = "Headless probe for the viewport visibility engine")]
struct Args {
    /// JSON dataset: an array of { "id": u64, "lat": f64, "lon": f64 }.
    /// Omitted: a deterministic built-in grid is used.
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Frames to simulate.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Drawn selector radius in pixels.
    #[arg(long, default_value_t = 35.0)]
    radius_px: f64,

    /// Hit-radius dampening multiplier.
    #[arg(long, default_value_t = visibility::region::DEFAULT_DAMPENING)]
    dampening: f64,

    /// Camera longitude sweep per frame, degrees.
    #[arg(long, default_value_t = 3.0)]
    sweep_deg_per_frame: f64,

    /// Starting camera latitude, degrees.
    #[arg(long, default_value_t = 20.0)]
    start_lat: f64,

    /// Starting camera longitude, degrees.
    #[arg(long, default_value_t = -30.0)]
    start_lon: f64,
}

#[derive(Debug, Deserialize)]
struct EventRecord {
    id: u64,
    lat: f64,
    lon: f64,
}

fn load_dataset(path: &PathBuf) -> Result<Vec<EventPoint>, Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(path)?;
    let records: Vec<EventRecord> = serde_json::from_str(&raw)?;
    Ok(records
        .into_iter()
        .map(|r| EventPoint::new(EventId(r.id), r.lat, r.lon))
        .collect())
}

/// A 30-degree lat/lon grid, ids assigned row-major.
fn builtin_grid() -> Vec<EventPoint> {
    let mut points = Vec::new();
    let mut id = 0u64;
    let mut lat = -60.0;
    while lat <= 60.0 {
        let mut lon = -180.0;
        while lon < 180.0 {
            points.push(EventPoint::new(EventId(id), lat, lon));
            id += 1;
            lon += 30.0;
        }
        lat += 30.0;
    }
    points
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let points = match &args.dataset {
        Some(path) => match load_dataset(path) {
            Ok(points) => points,
            Err(e) => {
                error!(path = %path.display(), "failed to load dataset: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => builtin_grid(),
    };
    info!(points = points.len(), "dataset loaded");

    let bridge = SyntheticBridge::looking_at(args.start_lat, args.start_lon);
    let region = SelectorRegion::with_dampening(args.radius_px, args.dampening);
    let mut engine = VisibilityEngine::new(bridge, region);

    engine.subscribe_interaction(|state| info!(?state, "interaction"));
    engine.set_dataset(points);

    // Drag for the whole sweep, release on the final frame; the engine's
    // drag-end guarantee produces one last authoritative pass afterwards.
    engine.trigger(Trigger::InteractionStart);

    let mut frame = Frame::at_default_rate(0);
    for i in 0..args.frames {
        let lon = args.start_lon + args.sweep_deg_per_frame * i as f64;
        let lon = (lon + 180.0).rem_euclid(360.0) - 180.0;
        engine.bridge_mut().set_camera(args.start_lat, lon);
        engine.trigger(Trigger::CameraChanged);

        match engine.on_frame(frame) {
            PassOutcome::Published { count } => {
                info!(frame = frame.index, lon, count, "visible");
            }
            PassOutcome::SkippedNotReady => {
                info!(frame = frame.index, "renderer not ready");
            }
            PassOutcome::NotDue => {}
        }
        frame = frame.next();
    }

    // Release the drag: even with no further camera events, the engine owes
    // one final authoritative pass, after which the indicator settles.
    engine.trigger(Trigger::InteractionEnd);
    if let PassOutcome::Published { count } = engine.on_frame(frame) {
        info!(frame = frame.index, count, "final pass after drag end");
    }
    engine.teardown();

    ExitCode::SUCCESS
}
