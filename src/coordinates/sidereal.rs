//! Greenwich Mean and Local Sidereal Time
//!
//! Linear model in days from J2000.0, good to a few seconds over the
//! decades around the epoch, which is all a planetarium view needs.

use crate::constants::{GMST_AT_J2000_HOURS, GMST_HOURS_PER_DAY};
use crate::time::SimTime;

/// Greenwich Mean Sidereal Time in hours, [0, 24)
pub fn sidereal_time(time: SimTime) -> f64 {
    let d = time.days_since_j2000();
    let gmst = GMST_AT_J2000_HOURS + GMST_HOURS_PER_DAY * d;
    gmst.rem_euclid(24.0)
}

/// Local Sidereal Time in radians for an east-positive longitude in degrees
pub fn local_sidereal_time(time: SimTime, longitude_deg: f64) -> f64 {
    let lst_hours = (sidereal_time(time) + longitude_deg / 15.0).rem_euclid(24.0);
    (lst_hours * 15.0).to_radians()
}
