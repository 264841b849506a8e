//! Time module for simulated sky time
//!
//! The sky runs on a simulated instant that may be accelerated, reversed or
//! paused relative to the wall clock. Instants are kept as signed Unix
//! milliseconds, which is all the low-precision model needs, and converted to
//! Julian dates on demand.

use crate::constants::{DAY_MS, J2000, J2000_UNIX_MS, UNIX_EPOCH_JD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod clock;

pub use clock::{
    fast_forward_speed, rewind_speed, swipe_down_speed, swipe_up_speed, SimulationClock,
};

/// An absolute instant on the simulated timeline (UTC, millisecond resolution)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTime {
    millis: i64,
}

impl SimTime {
    /// Create a time from Unix milliseconds
    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    /// The J2000.0 epoch, 2000-01-01T12:00:00Z
    pub const fn j2000() -> Self {
        Self::from_millis(J2000_UNIX_MS)
    }

    /// Current wall-clock time
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    /// Create a time from a UTC datetime
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self::from_millis(dt.timestamp_millis())
    }

    /// Unix milliseconds
    pub fn millis(&self) -> i64 {
        self.millis
    }

    /// UTC datetime, if the instant is within chrono's range
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.millis)
    }

    /// Julian date (UT)
    pub fn julian_date(&self) -> f64 {
        (self.millis as f64 / DAY_MS) + UNIX_EPOCH_JD
    }

    /// Days elapsed since J2000.0, the common input of the low-precision formulas
    pub fn days_since_j2000(&self) -> f64 {
        self.julian_date() - J2000
    }

    /// Shift by a signed number of milliseconds, saturating at the ends of the range
    pub fn offset_millis(&self, delta: i64) -> Self {
        Self::from_millis(self.millis.saturating_add(delta))
    }
}

impl From<DateTime<Utc>> for SimTime {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::from_datetime(dt)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S UTC")),
            None => write!(f, "<SimTime ms={}>", self.millis),
        }
    }
}
