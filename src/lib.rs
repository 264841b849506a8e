//! Skydome: a low-precision planetarium sky
//!
//! This crate computes where the Sun, Moon, five naked-eye planets, catalog
//! stars and constellation figures appear for an observer at any place and
//! any simulated instant, and projects them onto a view-centred disk that a
//! renderer can draw directly.

use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod catalogs;
pub mod celestial;
pub mod config;
pub mod constants;
pub mod coordinates;
pub mod frame;
pub mod planetlib;
pub mod projection;
pub mod sky;
pub mod status;
pub mod time;
pub mod view;

// Re-export commonly used types
pub use catalogs::{ConstellationCatalog, JsonStarCatalog, SkyCatalogs, StarCatalog};
pub use celestial::{BodyKind, CelestialBody, CelestialObject, Color};
pub use config::SkyConfig;
pub use frame::{DrawItem, Frame, FrameAssembler};
pub use projection::{ScreenPoint, SkyProjector};
pub use sky::{SharedSky, Sky, TickLoop};
pub use status::StatusLine;
pub use time::{SimTime, SimulationClock};
pub use view::{Command, GeolocationError, LocationError, Observer, ViewState};

/// Main error type for the skydome library
#[derive(Debug, Error)]
pub enum SkydomeError {
    #[error("Data error: {0}")]
    DataError(String),

    #[error("Catalog error: {0}")]
    CatalogError(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Location(#[from] LocationError),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
}

/// Result type for skydome operations
pub type Result<T> = std::result::Result<T, SkydomeError>;

/// File stem of the star feed inside the data directory
pub const STAR_FEED: &str = "stars";
/// File stem of the constellation feed inside the data directory
pub const CONSTELLATION_FEED: &str = "constellations";

/// Entry point for loading the sky feeds
pub struct Loader {
    data_dir: Option<PathBuf>,
}

impl Loader {
    /// Create a new loader with default data directory
    pub fn new() -> Self {
        Self { data_dir: None }
    }

    /// Set a custom data directory
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Directory the feeds are read from, `./data` unless overridden
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Path of a feed, preferring `<stem>.json` over `<stem>.json.gz`
    pub fn feed_path(&self, stem: &str) -> Result<PathBuf> {
        let dir = self.data_dir();
        [format!("{}.json", stem), format!("{}.json.gz", stem)]
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
            .ok_or_else(|| {
                SkydomeError::DataError(format!(
                    "No {} feed (.json or .json.gz) in {}",
                    stem,
                    dir.display()
                ))
            })
    }

    /// Load the star feed from the data directory
    pub fn load_star_catalog(&self) -> Result<JsonStarCatalog> {
        JsonStarCatalog::from_file(self.feed_path(STAR_FEED)?)
    }

    /// Load the constellation feed from the data directory
    pub fn load_constellations(&self) -> Result<ConstellationCatalog> {
        ConstellationCatalog::from_file(self.feed_path(CONSTELLATION_FEED)?)
    }

    /// Load both feeds. A feed that fails is replaced by an empty catalog.
    pub fn load_sky_catalogs(&self) -> SkyCatalogs {
        let stars = self.load_star_catalog().unwrap_or_else(|e| {
            log::warn!("Star feed unavailable, continuing without stars: {}", e);
            JsonStarCatalog::default()
        });
        let constellations = self.load_constellations().unwrap_or_else(|e| {
            log::warn!(
                "Constellation feed unavailable, continuing without figures: {}",
                e
            );
            ConstellationCatalog::default()
        });
        SkyCatalogs::new(stars, constellations)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
