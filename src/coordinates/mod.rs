//! Coordinate systems and conversions
//!
//! Equatorial and ecliptic frames, sidereal time, and the equatorial to
//! horizontal transform used to place objects on the observer's sky.

pub mod equatorial;
pub mod horizontal;
pub mod sidereal;

pub use equatorial::{Ecliptic, Equatorial, SphericalFrame};
pub use horizontal::{equatorial_to_horizontal, Horizontal};
pub use sidereal::{local_sidereal_time, sidereal_time};

use crate::constants::TAU;

/// Normalize an angle in radians to [0, 2π)
pub fn normalize_radians(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// Normalize an angle in degrees to [0, 360)
pub fn normalize_degrees(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

/// Wrap an angle difference into (-π, π] by whole turns
pub fn wrap_pi(mut angle: f64) -> f64 {
    use std::f64::consts::PI;
    while angle > PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}
