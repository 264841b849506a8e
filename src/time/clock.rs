//! Simulation clock and time-speed ladder
//!
//! Real wall-clock progression drives the tick cadence; the signed time-speed
//! multiplier scales how far simulated time moves per tick.

use super::SimTime;

/// Largest magnitude reachable with the rewind/fast-forward buttons
pub const MAX_LADDER_SPEED: f64 = 1000.0;
/// Largest magnitude reachable with three-finger swipes
pub const MAX_SWIPE_SPEED: f64 = 10_000.0;

/// Simulated timestamp plus the wall-clock instant of the previous tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationClock {
    current: SimTime,
    last_tick_wall: SimTime,
}

impl SimulationClock {
    /// Create a clock showing `start`, with `wall_now` as the reference for the first tick
    pub fn new(start: SimTime, wall_now: SimTime) -> Self {
        Self {
            current: start,
            last_tick_wall: wall_now,
        }
    }

    /// Clock showing the current wall time
    pub fn starting_now() -> Self {
        let now = SimTime::now();
        Self::new(now, now)
    }

    /// Current simulated instant
    pub fn current(&self) -> SimTime {
        self.current
    }

    /// Wall-clock instant of the last tick
    pub fn last_tick_wall(&self) -> SimTime {
        self.last_tick_wall
    }

    /// Advance by the real time elapsed since the last tick, scaled by `speed`.
    ///
    /// The wall reference always moves forward to `wall_now`, so time spent
    /// paused is never replayed after resuming.
    pub fn tick(&mut self, wall_now: SimTime, speed: f64, paused: bool) -> SimTime {
        let real_delta = wall_now.millis() - self.last_tick_wall.millis();
        self.last_tick_wall = wall_now;

        if !paused {
            let increment = (real_delta as f64 * speed) as i64;
            self.current = self.current.offset_millis(increment);
        }
        self.current
    }

    /// Jump simulated time back to the wall clock
    pub fn reset(&mut self, wall_now: SimTime) {
        self.current = wall_now;
        self.last_tick_wall = wall_now;
    }
}

/// Rewind button: slower, then pause, then backwards, then faster backwards
pub fn rewind_speed(speed: f64) -> f64 {
    if speed > 1.0 {
        speed / 10.0
    } else if speed > 0.1 {
        0.0
    } else if speed >= 0.0 {
        -1.0
    } else if speed > -MAX_LADDER_SPEED {
        speed * 10.0
    } else {
        speed
    }
}

/// Fast-forward button: slower backwards, then pause, then real time, then faster
pub fn fast_forward_speed(speed: f64) -> f64 {
    if speed < 0.0 {
        let slower = speed / 10.0;
        if slower.abs() < 1.0 {
            0.0
        } else {
            slower
        }
    } else if speed < 0.1 {
        1.0
    } else if speed < MAX_LADDER_SPEED {
        speed * 10.0
    } else {
        speed
    }
}

/// Three-finger swipe up: ten times faster, capped
pub fn swipe_up_speed(speed: f64) -> f64 {
    (speed * 10.0).min(MAX_SWIPE_SPEED)
}

/// Three-finger swipe down: ten times slower, snapping sub-real-time speeds to ±1
pub fn swipe_down_speed(speed: f64) -> f64 {
    let slower = (speed / 10.0).max(-MAX_SWIPE_SPEED);
    if slower > -1.0 && slower < 1.0 {
        if slower > 0.0 {
            1.0
        } else {
            -1.0
        }
    } else {
        slower
    }
}
