//! Status line: simulated date and time, location, view direction and speed

use serde::Serialize;
use std::fmt;

use crate::coordinates::normalize_degrees;
use crate::time::SimTime;
use crate::view::{Observer, ViewState};

/// Cardinal direction for an azimuth in degrees (0 = North, 90 = East)
pub fn cardinal_direction(azimuth_deg: f64) -> &'static str {
    let az = normalize_degrees(azimuth_deg);
    if !(45.0..315.0).contains(&az) {
        "N"
    } else if az < 135.0 {
        "E"
    } else if az < 225.0 {
        "S"
    } else {
        "W"
    }
}

/// Speed shown on the status line
///
/// Only the pause flag reads as paused. An unpaused speed in `[0, 1)` has no
/// label of its own and shows as real time.
pub fn time_speed_label(speed: f64, paused: bool) -> String {
    if paused {
        "⏸ PAUSED".to_string()
    } else if speed > 1.0 {
        format!("▶▶ {:.0}×", speed)
    } else if speed < 0.0 {
        format!("◀◀ {:.0}×", speed.abs())
    } else {
        "▶ Real Time".to_string()
    }
}

/// Short notice shown when the speed changes
pub fn speed_change_label(speed: f64) -> String {
    if speed == 0.0 {
        "⏸ Paused".to_string()
    } else if speed == 1.0 {
        "▶ Real Time".to_string()
    } else if speed < 0.0 {
        format!("⏪ {}×", speed.abs())
    } else {
        format!("⏩ {}×", speed)
    }
}

/// Text fields of the status line, refreshed at the status cadence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    /// `YYYY-MM-DD`, UTC
    pub date: String,
    /// `UTC HH:MM:SS`
    pub utc_time: String,
    pub location: String,
    /// e.g. `S (180°)`
    pub direction: String,
    pub speed: String,
}

impl StatusLine {
    pub fn new(time: SimTime, observer: &Observer, view: &ViewState) -> Self {
        let (date, utc_time) = match time.to_datetime() {
            Some(dt) => (
                dt.format("%Y-%m-%d").to_string(),
                dt.format("UTC %H:%M:%S").to_string(),
            ),
            None => ("----------".to_string(), "UTC --:--:--".to_string()),
        };
        let az = view.azimuth_degrees();
        Self {
            date,
            utc_time,
            location: observer.name().to_string(),
            direction: format!("{} ({:.0}°)", cardinal_direction(az), az),
            speed: time_speed_label(view.time_speed, view.paused),
        }
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} | {} | {} | {}",
            self.date, self.utc_time, self.location, self.direction, self.speed
        )
    }
}
