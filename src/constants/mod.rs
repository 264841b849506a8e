//! Constants module for the low-precision sky model

use std::f64::consts::PI;

// Time constants
/// Milliseconds in a day
pub const DAY_MS: f64 = 86_400_000.0;
/// Julian date of the Unix epoch (1970-01-01T00:00:00Z)
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Unix milliseconds of the J2000.0 epoch (2000-01-01T12:00:00Z)
pub const J2000_UNIX_MS: i64 = 946_728_000_000;

// Sidereal time (linear model)
/// GMST in hours at J2000.0
pub const GMST_AT_J2000_HOURS: f64 = 18.697_374_558;
/// GMST rate in sidereal hours per day
pub const GMST_HOURS_PER_DAY: f64 = 24.065_709_824_419_08;

// Angles
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;

/// Fixed obliquity of the ecliptic in degrees
pub const OBLIQUITY_DEG: f64 = 23.439;

// Projection
/// Altitude below which a point is never drawn (radians)
pub const HORIZON_TOLERANCE: f64 = -0.01;
/// Margin keeping the view altitude off the zenith/nadir singularity (radians)
pub const VIEW_POLE_MARGIN: f64 = 0.02;
/// Minimum depth along the view axis for a point to count as in front
pub const MIN_VIEW_DEPTH: f64 = 0.02;
/// Floor for the stereographic denominator
pub const MIN_PROJECTION_DENOM: f64 = 0.1;
/// Fraction of the disk radius beyond which points are clipped
pub const DISK_CLIP_RADIUS: f64 = 0.95;
/// Globe radius as a fraction of the smaller screen dimension
pub const GLOBE_RADIUS_FRACTION: f64 = 0.48;
/// Globe radius used before the screen size is known
pub const DEFAULT_GLOBE_RADIUS: f64 = 400.0;
