//! Horizontal (altitude/azimuth) frame and the equatorial to horizontal transform

use crate::constants::TAU;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::equatorial::SphericalFrame;
use super::normalize_radians;

/// Horizontal coordinates relative to the observer's horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Horizontal {
    /// Altitude above the horizon in radians, [-π/2, π/2]
    pub altitude: f64,
    /// Azimuth in radians, [0, 2π), 0 = North, π/2 = East
    pub azimuth: f64,
}

impl Horizontal {
    pub fn new(altitude: f64, azimuth: f64) -> Self {
        Self { altitude, azimuth }
    }

    /// Create from altitude and azimuth in degrees
    pub fn from_degrees(altitude_deg: f64, azimuth_deg: f64) -> Self {
        Self::new(altitude_deg.to_radians(), azimuth_deg.to_radians())
    }

    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }
}

impl SphericalFrame for Horizontal {
    /// North, East, Up
    fn to_unit_vector(&self) -> Vector3<f64> {
        let cos_alt = self.altitude.cos();
        Vector3::new(
            cos_alt * self.azimuth.cos(),
            cos_alt * self.azimuth.sin(),
            self.altitude.sin(),
        )
    }
}

/// Convert equatorial coordinates to horizontal coordinates.
///
/// * `ra` - Right ascension in radians
/// * `dec` - Declination in radians
/// * `lst` - Local sidereal time in radians
/// * `lat` - Observer latitude in radians
///
/// Inverse-trig arguments are clamped to [-1, 1]. At the exact pole, where the
/// azimuth formula degenerates to 0/0, the azimuth falls back to 0 (North).
pub fn equatorial_to_horizontal(ra: f64, dec: f64, lst: f64, lat: f64) -> Horizontal {
    let ha = lst - ra;

    let (sin_dec, cos_dec) = (dec.sin(), dec.cos());
    let (sin_lat, cos_lat) = (lat.sin(), lat.cos());
    let cos_ha = ha.cos();

    let sin_alt = sin_dec * sin_lat + cos_dec * cos_lat * cos_ha;
    let alt = sin_alt.clamp(-1.0, 1.0).asin();

    let cos_az = (sin_dec - sin_alt * sin_lat) / (alt.cos() * cos_lat);
    let cos_az = if cos_az.is_nan() {
        1.0
    } else {
        cos_az.clamp(-1.0, 1.0)
    };
    let mut az = cos_az.acos();

    // Azimuth grows eastward while hour angle grows westward
    if ha.sin() > 0.0 {
        az = TAU - az;
    }

    Horizontal::new(alt, normalize_radians(az))
}
