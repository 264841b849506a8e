//! Equatorial and ecliptic frames on the celestial sphere

use super::normalize_radians;
use crate::constants::OBLIQUITY_DEG;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Spherical frames that can be expressed as unit vectors
pub trait SphericalFrame {
    fn to_unit_vector(&self) -> Vector3<f64>;
}

// Equatorial coordinates (RA/Dec)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equatorial {
    pub ra: f64,  // Right ascension in radians, [0, 2π)
    pub dec: f64, // Declination in radians
}

impl Equatorial {
    pub fn new(ra: f64, dec: f64) -> Self {
        Equatorial {
            ra: normalize_radians(ra),
            dec,
        }
    }

    /// Create a new Equatorial coordinate with values in degrees
    pub fn from_degrees(ra_deg: f64, dec_deg: f64) -> Self {
        Self::new(ra_deg.to_radians(), dec_deg.to_radians())
    }

    /// Get right ascension in degrees
    pub fn ra_degrees(&self) -> f64 {
        self.ra.to_degrees()
    }

    /// Get declination in degrees
    pub fn dec_degrees(&self) -> f64 {
        self.dec.to_degrees()
    }
}

impl SphericalFrame for Equatorial {
    fn to_unit_vector(&self) -> Vector3<f64> {
        let cos_dec = self.dec.cos();
        Vector3::new(
            cos_dec * self.ra.cos(),
            cos_dec * self.ra.sin(),
            self.dec.sin(),
        )
    }
}

// Ecliptic coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ecliptic {
    pub lon: f64, // Ecliptic longitude in radians
    pub lat: f64, // Ecliptic latitude in radians
}

impl Ecliptic {
    pub fn new(lon: f64, lat: f64) -> Self {
        Ecliptic { lon, lat }
    }

    /// Rotate into the equatorial frame about the equinox axis by `obliquity` radians
    pub fn to_equatorial_with(&self, obliquity: f64) -> Equatorial {
        let (sin_eps, cos_eps) = obliquity.sin_cos();
        let ra = (self.lon.sin() * cos_eps - self.lat.tan() * sin_eps).atan2(self.lon.cos());
        let dec = (self.lat.sin() * cos_eps + self.lat.cos() * sin_eps * self.lon.sin()).asin();
        Equatorial::new(ra, dec)
    }
}

impl SphericalFrame for Ecliptic {
    fn to_unit_vector(&self) -> Vector3<f64> {
        let cos_lat = self.lat.cos();
        Vector3::new(
            cos_lat * self.lon.cos(),
            cos_lat * self.lon.sin(),
            self.lat.sin(),
        )
    }
}

// Conversions FROM Ecliptic, using the fixed obliquity of the sky model
impl From<Ecliptic> for Equatorial {
    fn from(ecliptic: Ecliptic) -> Self {
        ecliptic.to_equatorial_with(OBLIQUITY_DEG.to_radians())
    }
}
