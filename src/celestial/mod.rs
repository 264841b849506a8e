//! Celestial body definitions shared by the catalogs and the astronomy engine

use crate::coordinates::Equatorial;
use crate::time::SimTime;
use serde::Serialize;

pub mod color;

pub use color::{star_color_by_magnitude, Color};

/// A trait for objects that have a position in the sky
pub trait CelestialObject {
    /// Get the position of the object at a specific time
    fn position_at(&self, time: &SimTime) -> Equatorial;
}

/// What kind of object a body is; drives sizing and labeling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BodyKind {
    Star,
    Sun,
    Moon,
    Planet,
}

/// A drawable point on the celestial sphere
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CelestialBody {
    /// Display name, empty for anonymous stars
    pub name: String,
    pub kind: BodyKind,
    /// Apparent position (geocentric, equinox of date ignored)
    pub position: Equatorial,
    /// Apparent magnitude (lower is brighter)
    pub magnitude: f64,
    pub color: Color,
    /// Illuminated fraction in [0, 1], Moon only
    pub phase: Option<f64>,
}

impl CelestialBody {
    /// Create a body without phase information
    pub fn new(
        name: impl Into<String>,
        kind: BodyKind,
        position: Equatorial,
        magnitude: f64,
        color: Color,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            position,
            magnitude,
            color,
            phase: None,
        }
    }

    /// Attach an illuminated fraction
    pub fn with_phase(mut self, phase: f64) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Create a star from catalog values in degrees
    pub fn star(
        name: impl Into<String>,
        ra_deg: f64,
        dec_deg: f64,
        magnitude: f64,
        color: Color,
    ) -> Self {
        Self::new(
            name,
            BodyKind::Star,
            Equatorial::from_degrees(ra_deg, dec_deg),
            magnitude,
            color,
        )
    }

    /// Right ascension in radians, [0, 2π)
    pub fn ra(&self) -> f64 {
        self.position.ra
    }

    /// Declination in radians
    pub fn dec(&self) -> f64 {
        self.position.dec
    }

    /// Phase, or -1 for bodies that have none
    pub fn phase_or_sentinel(&self) -> f64 {
        self.phase.unwrap_or(-1.0)
    }

    /// On-screen radius in pixels
    pub fn render_radius(&self) -> f64 {
        match self.kind {
            BodyKind::Sun => 12.0,
            BodyKind::Moon => 10.0,
            BodyKind::Planet => 6.0,
            BodyKind::Star => (6.5 - self.magnitude).clamp(2.5, 12.0),
        }
    }
}

impl CelestialObject for CelestialBody {
    /// Catalog bodies are fixed on the sphere; solar-system bodies carry the
    /// position they were computed for
    fn position_at(&self, _time: &SimTime) -> Equatorial {
        self.position
    }
}
