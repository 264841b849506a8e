//! Sky dome command line viewer
//!
//! Loads the star and constellation feeds, steps the simulated clock and
//! prints the status line and the objects visible in each frame.
//!
//! Usage:
//!   cargo run --bin skydome -- --preset tokyo --start 2024-03-20T12:00:00Z --frames 3

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use skydome::catalogs::{ConstellationCatalog, JsonStarCatalog, SkyCatalogs};
use skydome::time::{SimTime, SimulationClock};
use skydome::view::{preset, Command};
use skydome::{Frame, Loader, Sky, SkyConfig};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Sky dome viewer
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Prints the visible sky for a place and time",
    long_about = None
)]
struct Args {
    /// Directory holding stars.json and constellations.json (optionally .gz)
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Star feed, overriding the data directory
    #[arg(long)]
    stars: Option<PathBuf>,

    /// Constellation feed, overriding the data directory
    #[arg(long)]
    constellations: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Location preset, matched by name prefix (e.g. "tokyo")
    #[arg(short, long, conflicts_with_all = ["lat", "lon"])]
    preset: Option<String>,

    /// Observer latitude in degrees
    #[arg(long, requires = "lon", allow_hyphen_values = true)]
    lat: Option<String>,

    /// Observer longitude in degrees, east positive
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lon: Option<String>,

    /// Start time, RFC 3339 (defaults to now)
    #[arg(short, long)]
    start: Option<String>,

    /// Time speed multiplier
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    speed: f64,

    /// Number of frames to print
    #[arg(short = 'n', long, default_value_t = 1)]
    frames: usize,

    /// Wall-clock milliseconds between frames
    #[arg(long, default_value_t = 1000)]
    step_ms: i64,

    /// View azimuth in degrees (0 = North)
    #[arg(long, allow_hyphen_values = true)]
    azimuth: Option<f64>,

    /// View altitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    altitude: Option<f64>,

    /// Show the altitude/azimuth grid
    #[arg(long, action = ArgAction::SetTrue)]
    grid: bool,

    /// Print frames as JSON instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

fn load_catalogs(args: &Args) -> SkyCatalogs {
    let loader = Loader::new().with_data_dir(&args.data_dir);
    let mut catalogs = loader.load_sky_catalogs();

    if let Some(path) = &args.stars {
        catalogs.stars = JsonStarCatalog::from_file(path).unwrap_or_else(|e| {
            log::warn!("Could not load {}: {}", path.display(), e);
            JsonStarCatalog::default()
        });
    }
    if let Some(path) = &args.constellations {
        catalogs.constellations = ConstellationCatalog::from_file(path).unwrap_or_else(|e| {
            log::warn!("Could not load {}: {}", path.display(), e);
            ConstellationCatalog::default()
        });
    }
    catalogs
}

fn start_time(args: &Args) -> Result<SimTime> {
    match &args.start {
        Some(text) => {
            let dt = chrono::DateTime::parse_from_rfc3339(text)?;
            Ok(SimTime::from_datetime(dt.with_timezone(&chrono::Utc)))
        }
        None => Ok(SimTime::now()),
    }
}

fn print_frame(frame: &Frame) {
    let mut bodies: Vec<_> = frame.visible_bodies().collect();
    bodies.sort_by(|a, b| a.magnitude.total_cmp(&b.magnitude));
    for body in bodies {
        print_item("body", body);
    }

    let mut stars: Vec<_> = frame.stars.iter().collect();
    stars.sort_by(|a, b| a.magnitude.total_cmp(&b.magnitude));
    for star in stars.iter().filter(|s| s.label) {
        print_item("star", star);
    }
    println!(
        "  {} stars visible, {} constellation runs, {} grid polylines",
        frame.stars.len(),
        frame.constellation_lines.len(),
        frame.grid.polyline_count()
    );
    for label in &frame.constellation_labels {
        println!("  const {:<24} ({:7.1}, {:7.1})", label.text, label.point.x, label.point.y);
    }
}

fn print_item(tag: &str, item: &skydome::DrawItem) {
    let Some(point) = item.point else {
        return;
    };
    let phase = item
        .phase
        .map(|p| format!("  phase {:.2}", p))
        .unwrap_or_default();
    println!(
        "  {} {:<12} mag {:5.1}  alt {:5.1}°  az {:5.1}°  ({:7.1}, {:7.1}){}",
        tag,
        item.name,
        item.magnitude,
        item.horizontal.altitude.to_degrees(),
        item.horizontal.azimuth.to_degrees(),
        point.x,
        point.y,
        phase
    );
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SkyConfig::from_file(path)?,
        None => SkyConfig::default(),
    };

    let catalogs = load_catalogs(&args);
    let wall_start = SimTime::from_millis(0);
    let clock = SimulationClock::new(start_time(&args)?, wall_start);
    let mut sky = Sky::with_clock(&config, catalogs, clock)?;

    if let Some(query) = &args.preset {
        let place = preset(query).ok_or_else(|| format!("No location preset matches {:?}", query))?;
        sky.set_observer(place.observer());
    } else if let (Some(lat), Some(lon)) = (&args.lat, &args.lon) {
        sky.set_observer(skydome::view::manual_location(lat, lon)?);
    }

    sky.apply(Command::SetTimeSpeed(args.speed))?;
    if args.azimuth.is_some() || args.altitude.is_some() {
        let view = *sky.view();
        sky.apply(Command::SetViewDirection {
            azimuth: args.azimuth.map_or(view.view_azimuth, f64::to_radians),
            altitude: args.altitude.map_or(view.view_altitude, f64::to_radians),
        })?;
    }
    if args.grid && !sky.view().grid_visible {
        sky.apply(Command::ToggleGrid)?;
    }

    for index in 0..args.frames {
        if index > 0 {
            sky.tick_at(wall_start.offset_millis(args.step_ms.saturating_mul(index as i64)));
        }
        let frame = sky.frame();
        if args.json {
            println!("{}", serde_json::to_string(&frame)?);
        } else {
            println!("{}", sky.status());
            print_frame(&frame);
        }
    }
    Ok(())
}
