//! The sky state machine and its tick loop
//!
//! `Sky` owns the observer, view, clock and catalogs. Commands change it only
//! through [`Sky::apply`] or the queue drained at the start of each tick, so a
//! frame never sees a half-applied command.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crate::catalogs::SkyCatalogs;
use crate::config::SkyConfig;
use crate::frame::{Frame, FrameAssembler};
use crate::planetlib::Ephemeris;
use crate::projection::SkyProjector;
use crate::status::StatusLine;
use crate::time::{SimTime, SimulationClock};
use crate::view::{Command, CommandQueue, GeolocationProvider, Observer, ViewLimits, ViewState};
use crate::Result;

/// A sky shared between a tick thread and command sources
pub type SharedSky = Arc<Mutex<Sky>>;

/// Observer, view, clock and catalogs for one sky display
#[derive(Debug)]
pub struct Sky {
    observer: Observer,
    view: ViewState,
    limits: ViewLimits,
    clock: SimulationClock,
    catalogs: SkyCatalogs,
    projector: SkyProjector,
    ephemeris: Ephemeris,
    queue: CommandQueue,
}

impl Sky {
    /// Sky showing the current wall time
    pub fn new(config: &SkyConfig, catalogs: SkyCatalogs) -> Result<Self> {
        Self::with_clock(config, catalogs, SimulationClock::starting_now())
    }

    /// Sky driven by an explicit clock
    pub fn with_clock(
        config: &SkyConfig,
        catalogs: SkyCatalogs,
        clock: SimulationClock,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            observer: config.observer()?,
            view: config.initial_view(),
            limits: config.limits,
            clock,
            catalogs,
            projector: SkyProjector::new(config.screen_width, config.screen_height),
            ephemeris: Ephemeris::new(),
            queue: CommandQueue::new(),
        })
    }

    pub fn into_shared(self) -> SharedSky {
        Arc::new(Mutex::new(self))
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn limits(&self) -> &ViewLimits {
        &self.limits
    }

    pub fn catalogs(&self) -> &SkyCatalogs {
        &self.catalogs
    }

    pub fn projector(&self) -> &SkyProjector {
        &self.projector
    }

    /// Current simulated instant
    pub fn time(&self) -> SimTime {
        self.clock.current()
    }

    /// Apply a command now. A rejected location leaves every field untouched.
    pub fn apply(&mut self, command: Command) -> Result<()> {
        self.apply_at(command, SimTime::now())
    }

    /// Apply a command, using `wall_now` if it resets the clock
    pub fn apply_at(&mut self, command: Command, wall_now: SimTime) -> Result<()> {
        match &command {
            Command::SetLocation {
                latitude,
                longitude,
                name,
            } => {
                let observer = Observer::new(*latitude, *longitude, name.clone())?;
                self.set_observer(observer);
            }
            Command::ResetTime => {
                self.clock.reset(wall_now);
                log::debug!("Simulated time reset to {}", wall_now);
            }
            _ => {}
        }
        self.view = self.view.apply(&command, &self.limits);
        Ok(())
    }

    /// Hold a command until the next tick
    pub fn enqueue(&mut self, command: Command) {
        self.queue.push(command);
    }

    pub fn pending_commands(&self) -> usize {
        self.queue.len()
    }

    pub fn set_observer(&mut self, observer: Observer) {
        log::info!(
            "Observer moved to {} ({:.4}, {:.4})",
            observer.name(),
            observer.latitude(),
            observer.longitude()
        );
        self.observer = observer;
    }

    /// Move the observer to the provider's current position
    pub fn set_observer_from<G: GeolocationProvider + ?Sized>(
        &mut self,
        provider: &G,
    ) -> Result<()> {
        let observer = provider.current_observer()?;
        self.set_observer(observer);
        Ok(())
    }

    /// Apply queued commands, then advance the clock to `wall_now`
    pub fn tick_at(&mut self, wall_now: SimTime) -> SimTime {
        for command in self.queue.drain() {
            if let Err(e) = self.apply_at(command, wall_now) {
                log::warn!("Rejected queued command: {}", e);
            }
        }
        self.clock.tick(wall_now, self.view.time_speed, self.view.paused)
    }

    pub fn tick(&mut self) -> SimTime {
        self.tick_at(SimTime::now())
    }

    /// Drawable snapshot of the current instant
    pub fn frame(&self) -> Frame {
        FrameAssembler::new(&self.catalogs, &self.ephemeris, &self.projector).assemble(
            self.clock.current(),
            &self.observer,
            &self.view,
        )
    }

    pub fn status(&self) -> StatusLine {
        StatusLine::new(self.clock.current(), &self.observer, &self.view)
    }

    /// Follow a new screen size
    pub fn resize(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.projector.resize(width, height);
        } else {
            log::warn!("Ignoring screen size {}x{}", width, height);
        }
    }
}

/// Background thread ticking a shared sky at the frame cadence
///
/// Each tick holds the lock only long enough to advance the clock and build
/// the frame; the callbacks run after it is released.
pub struct TickLoop {
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl TickLoop {
    pub fn spawn<F, S>(
        sky: SharedSky,
        tick_interval: Duration,
        status_interval: Duration,
        mut on_frame: F,
        mut on_status: S,
    ) -> Self
    where
        F: FnMut(Frame) + Send + 'static,
        S: FnMut(StatusLine) + Send + 'static,
    {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        let handle = std::thread::spawn(move || {
            let mut last_status: Option<Instant> = None;
            while !shutdown_clone.load(Ordering::SeqCst) {
                let started = Instant::now();
                let status_due = last_status.map_or(true, |t| t.elapsed() >= status_interval);

                let (frame, status) = {
                    let mut guard = match sky.lock() {
                        Ok(guard) => guard,
                        Err(poisoned) => {
                            log::warn!("Sky lock poisoned, continuing with last state");
                            poisoned.into_inner()
                        }
                    };
                    guard.tick();
                    let status = status_due.then(|| guard.status());
                    (guard.frame(), status)
                };

                on_frame(frame);
                if let Some(status) = status {
                    on_status(status);
                    last_status = Some(started);
                }

                if let Some(remaining) = tick_interval.checked_sub(started.elapsed()) {
                    std::thread::sleep(remaining);
                }
            }
            log::debug!("Tick loop stopped");
        });

        Self {
            shutdown,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        !self.shutdown.load(Ordering::SeqCst)
    }

    /// Stop ticking and wait for the thread; cannot be restarted
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Tick loop thread panicked");
            }
        }
    }
}

impl Drop for TickLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::{FixedPosition, GeolocationError, LocationError};
    use crate::SkydomeError;
    use approx::assert_relative_eq;
    use std::sync::mpsc;

    fn wall() -> SimTime {
        SimTime::from_millis(1_000_000)
    }

    fn sky() -> Sky {
        let clock = SimulationClock::new(SimTime::j2000(), wall());
        Sky::with_clock(&SkyConfig::default(), SkyCatalogs::default(), clock).unwrap()
    }

    #[test]
    fn test_initial_state_follows_config() {
        let sky = sky();
        assert_eq!(sky.observer().name(), "Lisbon");
        assert_eq!(*sky.view(), ViewState::default());
        assert_eq!(sky.time(), SimTime::j2000());
        assert_relative_eq!(sky.projector().globe_radius, 518.4, epsilon = 1e-9);
    }

    #[test]
    fn test_set_location() {
        let mut sky = sky();
        sky.apply(Command::SetLocation {
            latitude: 64.1466,
            longitude: -21.9426,
            name: "Reykjavik".to_string(),
        })
        .unwrap();
        assert_eq!(sky.observer().name(), "Reykjavik");
        assert_eq!(sky.observer().latitude(), 64.1466);
    }

    #[test]
    fn test_rejected_location_changes_nothing() {
        let mut sky = sky();
        let before_view = *sky.view();
        let result = sky.apply(Command::SetLocation {
            latitude: 0.0,
            longitude: 200.0,
            name: "Nowhere".to_string(),
        });
        assert!(matches!(
            result,
            Err(SkydomeError::Location(LocationError::LongitudeOutOfRange(_)))
        ));
        assert_eq!(*sky.observer(), Observer::default());
        assert_eq!(*sky.view(), before_view);
    }

    #[test]
    fn test_tick_applies_queue_before_advancing() {
        let mut sky = sky();
        sky.enqueue(Command::SwipeSpeedUp);
        sky.enqueue(Command::Zoom(2.0));
        assert_eq!(sky.pending_commands(), 2);

        let t = sky.tick_at(wall().offset_millis(100));
        assert_eq!(sky.pending_commands(), 0);
        assert_eq!(sky.view().time_speed, 10.0);
        assert_eq!(sky.view().fov_scale, 0.5);
        // The new speed already applies to this tick
        assert_eq!(t.millis(), SimTime::j2000().millis() + 1000);
    }

    #[test]
    fn test_paused_tick_holds_time() {
        let mut sky = sky();
        sky.apply(Command::TogglePause).unwrap();
        sky.tick_at(wall().offset_millis(5000));
        assert_eq!(sky.time(), SimTime::j2000());
        sky.apply(Command::TogglePause).unwrap();
        sky.tick_at(wall().offset_millis(5250));
        assert_eq!(sky.time().millis(), SimTime::j2000().millis() + 250);
    }

    #[test]
    fn test_reset_time() {
        let mut sky = sky();
        sky.apply(Command::SetTimeSpeed(-100.0)).unwrap();
        let now = SimTime::from_millis(1_700_000_000_000);
        sky.apply_at(Command::ResetTime, now).unwrap();
        assert_eq!(sky.time(), now);
        assert_eq!(sky.view().time_speed, 1.0);
    }

    #[test]
    fn test_bad_queued_location_is_skipped() {
        let mut sky = sky();
        sky.enqueue(Command::SetLocation {
            latitude: 100.0,
            longitude: 0.0,
            name: "Bad".to_string(),
        });
        sky.enqueue(Command::ToggleGrid);
        sky.tick_at(wall().offset_millis(16));
        assert_eq!(sky.observer().name(), "Lisbon");
        assert!(sky.view().grid_visible);
    }

    struct NoFix;

    impl GeolocationProvider for NoFix {
        fn current_position(&self) -> std::result::Result<(f64, f64), GeolocationError> {
            Err(GeolocationError::NoFix)
        }
    }

    #[test]
    fn test_set_observer_from_provider() {
        let mut sky = sky();
        let result = sky.set_observer_from(&NoFix);
        assert!(matches!(
            result,
            Err(SkydomeError::Geolocation(GeolocationError::NoFix))
        ));
        assert_eq!(sky.observer().name(), "Lisbon");

        sky.set_observer_from(&FixedPosition {
            latitude: 35.6762,
            longitude: 139.6503,
        })
        .unwrap();
        assert_eq!(sky.observer().name(), "GPS (35.68, 139.65)");
    }

    #[test]
    fn test_frame_and_status_follow_state() {
        let mut sky = sky();
        sky.apply(Command::SetViewDirection {
            azimuth: 0.0,
            altitude: 0.5,
        })
        .unwrap();
        let frame = sky.frame();
        assert_eq!(frame.time, SimTime::j2000());
        assert_eq!(frame.bodies.len(), 7);
        assert!(frame.stars.is_empty());
        assert_eq!(sky.status().direction, "N (0°)");
    }

    #[test]
    fn test_resize() {
        let mut sky = sky();
        sky.resize(800.0, 600.0);
        assert_relative_eq!(sky.projector().globe_radius, 288.0, epsilon = 1e-9);
        sky.resize(0.0, 600.0);
        assert_relative_eq!(sky.projector().globe_radius, 288.0, epsilon = 1e-9);
    }

    #[test]
    fn test_tick_loop_runs_and_stops() {
        let shared = sky().into_shared();
        let (frames_tx, frames_rx) = mpsc::channel();
        let (status_tx, status_rx) = mpsc::channel();

        let mut tick_loop = TickLoop::spawn(
            shared.clone(),
            Duration::from_millis(5),
            Duration::from_millis(20),
            move |frame| {
                let _ = frames_tx.send(frame.view.grid_visible);
            },
            move |status| {
                let _ = status_tx.send(status.location);
            },
        );

        let location = status_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(location, "Lisbon");

        shared.lock().unwrap().enqueue(Command::ToggleGrid);
        while !frames_rx.recv_timeout(Duration::from_secs(5)).unwrap() {}

        tick_loop.stop();
        assert!(!tick_loop.is_running());
        assert_eq!(shared.lock().unwrap().pending_commands(), 0);
    }
}
