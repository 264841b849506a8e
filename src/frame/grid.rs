//! Horizon circle, altitude/azimuth grid and cardinal labels

use serde::Serialize;

use crate::projection::{ScreenPoint, SkyProjector};
use crate::view::ViewState;

/// Sampling step along circles and lines, degrees
const SAMPLE_STEP_DEG: usize = 3;
/// Altitude of the cardinal labels, degrees
const CARDINAL_ALTITUDE_DEG: f64 = 2.0;
/// Altitude circles drawn when the grid is on, degrees
const ALTITUDE_CIRCLES_DEG: [f64; 2] = [30.0, 60.0];
/// Azimuth lines drawn when the grid is on, degrees
const AZIMUTH_LINES_DEG: [f64; 4] = [0.0, 90.0, 180.0, 270.0];
/// Longest screen step inside one circle run, in globe radii
const CIRCLE_MAX_JUMP: f64 = 0.4;
/// Longest screen step inside one azimuth-line run, in globe radii
const LINE_MAX_JUMP: f64 = 0.3;

const CARDINALS: [(&str, f64); 4] = [("N", 0.0), ("E", 90.0), ("S", 180.0), ("W", 270.0)];

/// Text pinned to a screen position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenLabel {
    pub text: String,
    pub point: ScreenPoint,
}

/// Reference lines of the horizontal frame, as screen polylines
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HorizonGrid {
    /// Always present
    pub horizon: Vec<Vec<ScreenPoint>>,
    /// Always present; only the directions that project
    pub cardinals: Vec<ScreenLabel>,
    /// Empty unless the grid is visible
    pub altitude_circles: Vec<Vec<ScreenPoint>>,
    /// Empty unless the grid is visible
    pub azimuth_lines: Vec<Vec<ScreenPoint>>,
}

impl HorizonGrid {
    pub fn build(projector: &SkyProjector, view: &ViewState) -> Self {
        let max_circle_jump = CIRCLE_MAX_JUMP * projector.globe_radius;
        let max_line_jump = LINE_MAX_JUMP * projector.globe_radius;

        let mut grid = HorizonGrid {
            horizon: altitude_circle(projector, view, 0.0, max_circle_jump),
            ..Default::default()
        };

        for (text, az_deg) in CARDINALS {
            let point = projector.project(
                az_deg.to_radians(),
                CARDINAL_ALTITUDE_DEG.to_radians(),
                view.view_azimuth,
                view.view_altitude,
                view.fov_scale,
            );
            if let Some(point) = point {
                grid.cardinals.push(ScreenLabel {
                    text: text.to_string(),
                    point,
                });
            }
        }

        if view.grid_visible {
            for alt_deg in ALTITUDE_CIRCLES_DEG {
                grid.altitude_circles
                    .extend(altitude_circle(projector, view, alt_deg, max_circle_jump));
            }
            for az_deg in AZIMUTH_LINES_DEG {
                let az = az_deg.to_radians();
                let samples = (0..=90).step_by(SAMPLE_STEP_DEG).map(|alt_deg| {
                    projector.project(
                        az,
                        (alt_deg as f64).to_radians(),
                        view.view_azimuth,
                        view.view_altitude,
                        view.fov_scale,
                    )
                });
                grid.azimuth_lines.extend(split_runs(samples, Some(max_line_jump)));
            }
        }
        grid
    }

    /// Number of polylines of every kind
    pub fn polyline_count(&self) -> usize {
        self.horizon.len() + self.altitude_circles.len() + self.azimuth_lines.len()
    }
}

fn altitude_circle(
    projector: &SkyProjector,
    view: &ViewState,
    alt_deg: f64,
    max_jump: f64,
) -> Vec<Vec<ScreenPoint>> {
    let alt = alt_deg.to_radians();
    let samples = (0..=360).step_by(SAMPLE_STEP_DEG).map(|az_deg| {
        projector.project(
            (az_deg as f64).to_radians(),
            alt,
            view.view_azimuth,
            view.view_altitude,
            view.fov_scale,
        )
    });
    split_runs(samples, Some(max_jump))
}

/// Cut a sampled curve into drawable runs.
///
/// A run ends at every sample that did not project and, when `max_jump` is
/// set, wherever two consecutive points are further apart than it. Runs of a
/// single point are dropped.
pub fn split_runs<I>(samples: I, max_jump: Option<f64>) -> Vec<Vec<ScreenPoint>>
where
    I: IntoIterator<Item = Option<ScreenPoint>>,
{
    let mut runs = Vec::new();
    let mut current: Vec<ScreenPoint> = Vec::new();

    for sample in samples {
        match sample {
            Some(point) => {
                let jumped = match (current.last(), max_jump) {
                    (Some(last), Some(limit)) => last.distance_to(&point) > limit,
                    _ => false,
                };
                if jumped {
                    flush(&mut runs, &mut current);
                }
                current.push(point);
            }
            None => flush(&mut runs, &mut current),
        }
    }
    flush(&mut runs, &mut current);
    runs
}

fn flush(runs: &mut Vec<Vec<ScreenPoint>>, current: &mut Vec<ScreenPoint>) {
    if current.len() >= 2 {
        runs.push(std::mem::take(current));
    } else {
        current.clear();
    }
}
