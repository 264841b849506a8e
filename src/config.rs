//! Startup configuration
//!
//! Every field has a built-in default, so a config file only needs the values
//! it changes:
//!
//! ```json
//! { "observer": { "latitude": 64.1466, "longitude": -21.9426, "name": "Reykjavik" },
//!   "limits": { "max_fov": 3.0 } }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::view::{Observer, ViewLimits, ViewState};
use crate::{Result, SkydomeError};

/// Observer as written in a config file; validated on use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        let observer = Observer::default();
        Self {
            latitude: observer.latitude(),
            longitude: observer.longitude(),
            name: observer.name().to_string(),
        }
    }
}

/// Sky settings loaded once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    pub observer: ObserverConfig,
    /// Initial view direction, zoom, speed and display modes
    pub view: ViewState,
    pub limits: ViewLimits,
    /// Frame cadence in Hz
    pub tick_hz: f64,
    /// Status line cadence in Hz
    pub status_hz: f64,
    pub screen_width: f64,
    pub screen_height: f64,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            observer: ObserverConfig::default(),
            view: ViewState::default(),
            limits: ViewLimits::default(),
            tick_hz: 60.0,
            status_hz: 10.0,
            screen_width: 1080.0,
            screen_height: 1920.0,
        }
    }
}

impl SkyConfig {
    /// Parse and validate a JSON config
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: SkyConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded sky config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Write as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Reject settings the sky cannot run with
    pub fn validate(&self) -> Result<()> {
        let limits = &self.limits;
        if !(limits.min_fov.is_finite() && limits.min_fov > 0.0) {
            return Err(config_error(format!("min_fov must be positive, got {}", limits.min_fov)));
        }
        if !(limits.max_fov.is_finite() && limits.min_fov <= limits.max_fov) {
            return Err(config_error(format!(
                "min_fov {} exceeds max_fov {}",
                limits.min_fov, limits.max_fov
            )));
        }
        if !limits.pan_sensitivity.is_finite() {
            return Err(config_error("pan_sensitivity must be finite".to_string()));
        }
        for (name, rate) in [("tick_hz", self.tick_hz), ("status_hz", self.status_hz)] {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(config_error(format!("{} must be positive, got {}", name, rate)));
            }
        }
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(config_error(format!(
                "screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        let view = &self.view;
        if ![view.view_azimuth, view.view_altitude, view.fov_scale, view.time_speed]
            .iter()
            .all(|v| v.is_finite())
        {
            return Err(config_error("initial view values must be finite".to_string()));
        }
        self.observer()?;
        Ok(())
    }

    /// The configured observer
    pub fn observer(&self) -> Result<Observer> {
        let o = &self.observer;
        Observer::new(o.latitude, o.longitude, o.name.clone())
            .map_err(|e| config_error(format!("observer: {}", e)))
    }

    /// The initial view, pulled inside the configured limits
    pub fn initial_view(&self) -> ViewState {
        self.view.clamped(&self.limits)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.tick_hz)
    }

    pub fn status_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.status_hz)
    }
}

fn config_error(message: String) -> SkydomeError {
    SkydomeError::ConfigError(message)
}
