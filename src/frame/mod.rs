//! Per-tick frame assembly
//!
//! A frame is everything a renderer needs for one tick: solar-system bodies
//! and stars with their screen positions, constellation line runs and labels,
//! and the horizon grid. Nothing here draws pixels.

use serde::Serialize;

use crate::catalogs::{Constellation, SkyCatalogs, StarCatalog};
use crate::celestial::{BodyKind, CelestialBody, Color};
use crate::coordinates::{equatorial_to_horizontal, local_sidereal_time, Horizontal};
use crate::planetlib::Ephemeris;
use crate::projection::{ScreenPoint, SkyProjector};
use crate::time::SimTime;
use crate::view::{Observer, ViewState};

pub mod grid;

pub use grid::{split_runs, HorizonGrid, ScreenLabel};

/// One body as the renderer sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawItem {
    pub name: String,
    pub kind: BodyKind,
    pub horizontal: Horizontal,
    /// Screen position, `None` when below the horizon or off the disk
    pub point: Option<ScreenPoint>,
    pub radius: f64,
    pub color: Color,
    pub magnitude: f64,
    /// Whether the name should be drawn next to the point
    pub label: bool,
    pub phase: Option<f64>,
}

impl DrawItem {
    pub fn is_visible(&self) -> bool {
        self.point.is_some()
    }
}

/// Everything drawable at one instant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub time: SimTime,
    /// Local sidereal time, radians
    pub lst: f64,
    pub view: ViewState,
    /// Sun, Moon, then the planets; present even when not visible
    pub bodies: Vec<DrawItem>,
    /// Visible stars only
    pub stars: Vec<DrawItem>,
    pub constellation_lines: Vec<Vec<ScreenPoint>>,
    pub constellation_labels: Vec<ScreenLabel>,
    pub grid: HorizonGrid,
}

impl Frame {
    /// Solar-system bodies that made it onto the disk
    pub fn visible_bodies(&self) -> impl Iterator<Item = &DrawItem> {
        self.bodies.iter().filter(|b| b.is_visible())
    }

    /// Look up a body or star by name
    pub fn find(&self, name: &str) -> Option<&DrawItem> {
        self.bodies
            .iter()
            .chain(self.stars.iter())
            .find(|item| item.name == name)
    }
}

/// Pulls catalogs and ephemeris through the coordinate transforms and the projector
pub struct FrameAssembler<'a> {
    catalogs: &'a SkyCatalogs,
    ephemeris: &'a Ephemeris,
    projector: &'a SkyProjector,
}

impl<'a> FrameAssembler<'a> {
    pub fn new(
        catalogs: &'a SkyCatalogs,
        ephemeris: &'a Ephemeris,
        projector: &'a SkyProjector,
    ) -> Self {
        Self {
            catalogs,
            ephemeris,
            projector,
        }
    }

    pub fn assemble(&self, time: SimTime, observer: &Observer, view: &ViewState) -> Frame {
        let sky = SkyAt {
            lst: local_sidereal_time(time, observer.longitude()),
            lat: observer.latitude_rad(),
            projector: self.projector,
            view,
        };

        let bodies = self
            .ephemeris
            .bodies_at(&time)
            .iter()
            .map(|body| sky.body_item(body))
            .collect();

        let label_limit = view.star_name_mode.label_limit();
        let stars = self
            .catalogs
            .stars
            .stars()
            .iter()
            .filter_map(|star| sky.star_item(star, label_limit))
            .collect();

        let mut constellation_lines = Vec::new();
        let mut constellation_labels = Vec::new();
        if view.constellation_mode.shows_lines() {
            for constellation in self.catalogs.constellations.constellations() {
                constellation_lines.extend(sky.constellation_runs(constellation));
                if view.constellation_mode.shows_names() {
                    constellation_labels.extend(sky.constellation_label(constellation));
                }
            }
        }

        let frame = Frame {
            time,
            lst: sky.lst,
            view: *view,
            bodies,
            stars,
            constellation_lines,
            constellation_labels,
            grid: HorizonGrid::build(self.projector, view),
        };
        log::debug!(
            "Frame at {}: {} stars, {} bodies visible, {} constellation runs",
            frame.time,
            frame.stars.len(),
            frame.visible_bodies().count(),
            frame.constellation_lines.len()
        );
        frame
    }
}

/// Observer-and-view context shared by every object in one frame
struct SkyAt<'a> {
    lst: f64,
    lat: f64,
    projector: &'a SkyProjector,
    view: &'a ViewState,
}

impl SkyAt<'_> {
    fn horizontal(&self, ra: f64, dec: f64) -> Horizontal {
        equatorial_to_horizontal(ra, dec, self.lst, self.lat)
    }

    /// Screen point for objects drawn only above the true horizon
    fn above_horizon(&self, horizontal: &Horizontal) -> Option<ScreenPoint> {
        if horizontal.is_above_horizon() {
            self.projector.project_view(horizontal, self.view)
        } else {
            None
        }
    }

    fn item(
        &self,
        body: &CelestialBody,
        horizontal: Horizontal,
        point: Option<ScreenPoint>,
        label: bool,
    ) -> DrawItem {
        DrawItem {
            name: body.name.clone(),
            kind: body.kind,
            horizontal,
            point,
            radius: body.render_radius(),
            color: body.color,
            magnitude: body.magnitude,
            label,
            phase: body.phase,
        }
    }

    fn body_item(&self, body: &CelestialBody) -> DrawItem {
        let horizontal = self.horizontal(body.ra(), body.dec());
        let point = self.above_horizon(&horizontal);
        self.item(body, horizontal, point, point.is_some())
    }

    fn star_item(&self, star: &CelestialBody, label_limit: Option<f64>) -> Option<DrawItem> {
        let horizontal = self.horizontal(star.ra(), star.dec());
        let point = self.above_horizon(&horizontal)?;
        let label =
            !star.name.is_empty() && label_limit.is_some_and(|limit| star.magnitude < limit);
        Some(self.item(star, horizontal, Some(point), label))
    }

    fn project_degrees(&self, ra_deg: f64, dec_deg: f64) -> Option<ScreenPoint> {
        let horizontal = self.horizontal(ra_deg.to_radians(), dec_deg.to_radians());
        self.projector.project_view(&horizontal, self.view)
    }

    fn constellation_runs(&self, constellation: &Constellation) -> Vec<Vec<ScreenPoint>> {
        constellation
            .lines()
            .iter()
            .flat_map(|line| {
                split_runs(line.iter().map(|v| self.project_degrees(v.ra, v.dec)), None)
            })
            .collect()
    }

    fn constellation_label(&self, constellation: &Constellation) -> Option<ScreenLabel> {
        let centroid = constellation.centroid();
        self.project_degrees(centroid.ra, centroid.dec)
            .map(|point| ScreenLabel {
                text: constellation.name().to_string(),
                point,
            })
    }
}
