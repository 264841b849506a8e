//! Observer, view and display-mode state, and the commands that change it
//!
//! `ViewState` is a plain value: every command produces a new state with the
//! view altitude, field of view and azimuth back inside their ranges.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use thiserror::Error;

use crate::coordinates::{normalize_degrees, normalize_radians};
use crate::time::{fast_forward_speed, rewind_speed, swipe_down_speed, swipe_up_speed};

pub mod locations;

pub use locations::{
    manual_location, preset, FixedPosition, GeolocationError, GeolocationProvider, LocationPreset,
    LOCATION_PRESETS,
};

/// Errors from validating an observer location
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocationError {
    #[error("Latitude must be between -90 and 90")]
    LatitudeOutOfRange(f64),

    #[error("Longitude must be between -180 and 180")]
    LongitudeOutOfRange(f64),

    #[error("Please enter valid numbers")]
    InvalidNumber(String),
}

/// Constellation figure display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstellationMode {
    Off,
    #[default]
    Lines,
    LinesNames,
}

impl ConstellationMode {
    pub fn next(self) -> Self {
        match self {
            ConstellationMode::Off => ConstellationMode::Lines,
            ConstellationMode::Lines => ConstellationMode::LinesNames,
            ConstellationMode::LinesNames => ConstellationMode::Off,
        }
    }

    pub fn shows_lines(self) -> bool {
        self != ConstellationMode::Off
    }

    pub fn shows_names(self) -> bool {
        self == ConstellationMode::LinesNames
    }

    pub fn label(self) -> &'static str {
        match self {
            ConstellationMode::Off => "OFF",
            ConstellationMode::Lines => "LINES",
            ConstellationMode::LinesNames => "LINES+NAMES",
        }
    }
}

/// Star label display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarNameMode {
    #[default]
    Off,
    Bright,
    All,
}

impl StarNameMode {
    pub fn next(self) -> Self {
        match self {
            StarNameMode::Off => StarNameMode::Bright,
            StarNameMode::Bright => StarNameMode::All,
            StarNameMode::All => StarNameMode::Off,
        }
    }

    /// Stars strictly brighter than this magnitude get a label
    pub fn label_limit(self) -> Option<f64> {
        match self {
            StarNameMode::Off => None,
            StarNameMode::Bright => Some(1.5),
            StarNameMode::All => Some(3.0),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StarNameMode::Off => "OFF",
            StarNameMode::Bright => "BRIGHT",
            StarNameMode::All => "ALL",
        }
    }
}

/// Where the sky is seen from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observer {
    latitude: f64,
    longitude: f64,
    name: String,
}

impl Observer {
    /// Validated observer; degrees, east-positive longitude
    pub fn new(
        latitude: f64,
        longitude: f64,
        name: impl Into<String>,
    ) -> Result<Self, LocationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
            name: name.into(),
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude.to_radians()
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Default for Observer {
    fn default() -> Self {
        Self {
            latitude: 38.7,
            longitude: -9.1,
            name: "Lisbon".to_string(),
        }
    }
}

/// Zoom range and pan rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewLimits {
    pub min_fov: f64,
    pub max_fov: f64,
    /// Radians per pixel of drag
    pub pan_sensitivity: f64,
}

impl Default for ViewLimits {
    fn default() -> Self {
        Self {
            min_fov: 0.3,
            max_fov: 2.5,
            pan_sensitivity: 0.005,
        }
    }
}

/// Everything a host can ask the sky to do
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Move the observer; degrees
    SetLocation {
        latitude: f64,
        longitude: f64,
        name: String,
    },
    /// Point the view; radians
    SetViewDirection { azimuth: f64, altitude: f64 },
    SetTimeSpeed(f64),
    /// Jump to the wall clock at real-time speed
    ResetTime,
    /// Drag by a pixel delta
    Pan { dx: f64, dy: f64 },
    /// Pinch; factors above 1 zoom in
    Zoom(f64),
    CycleConstellationMode,
    CycleStarNameMode,
    ToggleGrid,
    TogglePause,
    Rewind,
    FastForward,
    SwipeSpeedUp,
    SwipeSpeedDown,
}

/// View direction, zoom, time rate and display toggles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    /// Radians, [0, 2π), 0 = North
    pub view_azimuth: f64,
    /// Radians, [-π/2, π/2]
    pub view_altitude: f64,
    pub fov_scale: f64,
    pub paused: bool,
    /// Simulated milliseconds per real millisecond; negative runs backwards
    pub time_speed: f64,
    pub constellation_mode: ConstellationMode,
    pub star_name_mode: StarNameMode,
    pub grid_visible: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            view_azimuth: PI,
            view_altitude: PI / 6.0,
            fov_scale: 1.0,
            paused: false,
            time_speed: 1.0,
            constellation_mode: ConstellationMode::Lines,
            star_name_mode: StarNameMode::Off,
            grid_visible: false,
        }
    }
}

impl ViewState {
    /// The state after `command`. Location and clock commands other than the
    /// speed changes leave the view untouched; the owner of the observer and
    /// clock handles those.
    pub fn apply(self, command: &Command, limits: &ViewLimits) -> ViewState {
        let mut next = self;
        match *command {
            Command::SetLocation { .. } => {}
            Command::SetViewDirection { azimuth, altitude } => {
                if azimuth.is_finite() && altitude.is_finite() {
                    next.view_azimuth = azimuth;
                    next.view_altitude = altitude;
                }
            }
            Command::SetTimeSpeed(speed) => {
                if speed.is_finite() {
                    next.time_speed = speed;
                }
            }
            Command::ResetTime => next.time_speed = 1.0,
            Command::Pan { dx, dy } => {
                if dx.is_finite() && dy.is_finite() {
                    next.view_azimuth -= dx * limits.pan_sensitivity;
                    next.view_altitude += dy * limits.pan_sensitivity;
                }
            }
            Command::Zoom(factor) => {
                if factor.is_finite() && factor > 0.0 {
                    next.fov_scale /= factor;
                }
            }
            Command::CycleConstellationMode => {
                next.constellation_mode = next.constellation_mode.next()
            }
            Command::CycleStarNameMode => next.star_name_mode = next.star_name_mode.next(),
            Command::ToggleGrid => next.grid_visible = !next.grid_visible,
            Command::TogglePause => next.paused = !next.paused,
            Command::Rewind => next.time_speed = rewind_speed(next.time_speed),
            Command::FastForward => next.time_speed = fast_forward_speed(next.time_speed),
            Command::SwipeSpeedUp => next.time_speed = swipe_up_speed(next.time_speed),
            Command::SwipeSpeedDown => next.time_speed = swipe_down_speed(next.time_speed),
        }
        next.clamped(limits)
    }

    /// Bring the view back inside its ranges
    pub fn clamped(mut self, limits: &ViewLimits) -> ViewState {
        self.view_azimuth = normalize_radians(self.view_azimuth);
        self.view_altitude = self.view_altitude.clamp(-FRAC_PI_2, FRAC_PI_2);
        self.fov_scale = self.fov_scale.clamp(limits.min_fov, limits.max_fov);
        self
    }

    /// View azimuth in degrees, [0, 360)
    pub fn azimuth_degrees(&self) -> f64 {
        normalize_degrees(self.view_azimuth.to_degrees())
    }
}

/// Commands waiting for the next tick, applied in arrival order
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<Command>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(16),
        }
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Take every pending command, leaving the queue empty
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
