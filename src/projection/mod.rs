//! Stereographic projection of the sky dome onto a screen disk
//!
//! A horizontal direction is rotated into a frame centred on the view
//! direction, projected stereographically, scaled by the field-of-view factor
//! and mapped onto a circle of `globe_radius` pixels around the screen centre.
//! Points below the horizon, behind the viewer or outside 95% of the disk
//! are not drawn.

use serde::Serialize;

use crate::constants::{
    DEFAULT_GLOBE_RADIUS, DISK_CLIP_RADIUS, GLOBE_RADIUS_FRACTION, HORIZON_TOLERANCE,
    MIN_PROJECTION_DENOM, MIN_VIEW_DEPTH, VIEW_POLE_MARGIN,
};
use crate::coordinates::{wrap_pi, Horizontal};
use crate::view::ViewState;
use std::f64::consts::FRAC_PI_2;

/// A position in screen pixels, y growing downward
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &ScreenPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Project a horizontal direction onto the unit view disk.
///
/// All angles in radians. Returns disk coordinates with +y toward the zenith
/// side of the view, or `None` when the point is not drawable. The checks run
/// in a fixed order: below the horizon tolerance, behind the view plane, then
/// outside the clip radius.
pub fn project_to_disk(
    azimuth: f64,
    altitude: f64,
    view_azimuth: f64,
    view_altitude: f64,
    fov_scale: f64,
) -> Option<(f64, f64)> {
    if altitude < HORIZON_TOLERANCE {
        return None;
    }

    let d_az = wrap_pi(azimuth - view_azimuth);
    let v_alt = view_altitude.clamp(-FRAC_PI_2 + VIEW_POLE_MARGIN, FRAC_PI_2 - VIEW_POLE_MARGIN);

    let (sin_alt, cos_alt) = altitude.sin_cos();
    let (sin_v, cos_v) = v_alt.sin_cos();
    let (sin_d, cos_d) = d_az.sin_cos();

    let x1 = cos_alt * sin_d;
    let y1 = sin_alt * cos_v - cos_alt * sin_v * cos_d;
    let z1 = sin_alt * sin_v + cos_alt * cos_v * cos_d;

    if z1 < MIN_VIEW_DEPTH {
        return None;
    }

    let denom = (1.0 + z1).max(MIN_PROJECTION_DENOM);
    let px = x1 / (denom * fov_scale);
    let py = y1 / (denom * fov_scale);

    if px.hypot(py) > DISK_CLIP_RADIUS {
        return None;
    }
    Some((px, py))
}

/// Screen geometry of the sky disk
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkyProjector {
    pub center_x: f64,
    pub center_y: f64,
    pub globe_radius: f64,
}

impl Default for SkyProjector {
    fn default() -> Self {
        Self {
            center_x: 0.0,
            center_y: 0.0,
            globe_radius: DEFAULT_GLOBE_RADIUS,
        }
    }
}

impl SkyProjector {
    /// Projector for a screen of `width` x `height` pixels
    pub fn new(width: f64, height: f64) -> Self {
        let mut projector = Self::default();
        projector.resize(width, height);
        projector
    }

    /// Recentre on a new screen size; the disk fills 96% of the shorter side
    pub fn resize(&mut self, width: f64, height: f64) {
        self.center_x = width / 2.0;
        self.center_y = height / 2.0;
        self.globe_radius = width.min(height) * GLOBE_RADIUS_FRACTION;
    }

    /// Project a horizontal direction to screen pixels, or `None` if not drawable
    pub fn project(
        &self,
        azimuth: f64,
        altitude: f64,
        view_azimuth: f64,
        view_altitude: f64,
        fov_scale: f64,
    ) -> Option<ScreenPoint> {
        let (px, py) = project_to_disk(azimuth, altitude, view_azimuth, view_altitude, fov_scale)?;
        Some(ScreenPoint::new(
            self.center_x + px * self.globe_radius,
            self.center_y - py * self.globe_radius,
        ))
    }

    /// Project using the view direction and zoom of `view`
    pub fn project_view(&self, horizontal: &Horizontal, view: &ViewState) -> Option<ScreenPoint> {
        self.project(
            horizontal.azimuth,
            horizontal.altitude,
            view.view_azimuth,
            view.view_altitude,
            view.fov_scale,
        )
    }

    /// Whether a screen position lies on the sky disk; touches outside it belong to the host
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (x - self.center_x).hypot(y - self.center_y) <= self.globe_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::TAU;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;
    use std::f64::consts::PI;

    fn projector() -> SkyProjector {
        SkyProjector::new(1000.0, 1000.0)
    }

    #[test]
    fn test_resize() {
        let p = SkyProjector::new(1080.0, 1920.0);
        assert_relative_eq!(p.center_x, 540.0);
        assert_relative_eq!(p.center_y, 960.0);
        assert_relative_eq!(p.globe_radius, 518.4, epsilon = 1e-9);

        let d = SkyProjector::default();
        assert_relative_eq!(d.globe_radius, 400.0);
    }

    #[test]
    fn test_view_direction_maps_to_centre() {
        let p = projector();
        let pt = p.project(1.0, 0.5, 1.0, 0.5, 1.0).unwrap();
        assert_relative_eq!(pt.x, 500.0, epsilon = 1e-9);
        assert_relative_eq!(pt.y, 500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zenith_lands_at_disk_centre_for_every_azimuth() {
        // The view altitude is held 0.02 rad off the pole, so the zenith sits
        // about 0.01 disk radii from the exact centre
        let p = projector();
        for step in 0..72 {
            let az = step as f64 * 5f64.to_radians();
            let pt = p.project(az, PI / 2.0, 0.3, PI / 2.0, 1.0).unwrap();
            assert!(pt.distance_to(&ScreenPoint::new(500.0, 500.0)) < 0.011 * p.globe_radius);
        }
    }

    #[test]
    fn test_below_horizon_tolerance_never_projects() {
        let p = projector();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let alt = -0.0100001 - rng.gen::<f64>() * (PI / 2.0 - 0.0100001);
            let az = rng.gen::<f64>() * TAU;
            let view_az = rng.gen::<f64>() * TAU;
            let view_alt = rng.gen::<f64>() * PI - PI / 2.0;
            let fov = rng.gen_range(0.3..2.5);
            assert_eq!(p.project(az, alt, view_az, view_alt, fov), None);
        }
    }

    #[test]
    fn test_horizon_tolerance_admits_slightly_negative() {
        let p = projector();
        assert!(p.project(0.0, -0.005, 0.0, 0.0, 1.0).is_some());
    }

    #[test]
    fn test_behind_viewer_rejected() {
        let p = projector();
        assert_eq!(p.project(PI, 0.0, 0.0, 0.0, 1.0), None);
    }

    #[test]
    fn test_azimuth_seam() {
        let p = projector();
        let across = p.project(359f64.to_radians(), 0.3, 1f64.to_radians(), 0.2, 1.0).unwrap();
        let direct = p.project(-1f64.to_radians(), 0.3, 1f64.to_radians(), 0.2, 1.0).unwrap();
        assert_relative_eq!(across.x, direct.x, epsilon = 1e-9);
        assert_relative_eq!(across.y, direct.y, epsilon = 1e-9);
        // West of the view direction is left of centre
        assert!(across.x < 500.0);
    }

    #[test]
    fn test_east_of_view_is_right_and_up_is_up() {
        let p = projector();
        let east = p.project(0.3, 0.2, 0.0, 0.2, 1.0).unwrap();
        assert!(east.x > 500.0);
        let higher = p.project(0.0, 0.6, 0.0, 0.2, 1.0).unwrap();
        assert!(higher.y < 500.0);
    }

    #[rstest]
    #[case(1.0, true)]
    #[case(2.5, true)]
    #[case(0.5, false)]
    #[case(0.3, false)]
    fn test_clip_depends_on_zoom(#[case] fov: f64, #[case] visible: bool) {
        // 80° off axis sits at r = sin80 / (1 + cos80) ~ 0.84 before zooming
        let p = projector();
        let pt = p.project(80f64.to_radians(), 0.0, 0.0, 0.0, fov);
        assert_eq!(pt.is_some(), visible);
    }

    #[test]
    fn test_zoom_scales_radius() {
        let (px1, py1) = project_to_disk(0.4, 0.3, 0.0, 0.1, 1.0).unwrap();
        let (px2, py2) = project_to_disk(0.4, 0.3, 0.0, 0.1, 2.0).unwrap();
        assert_relative_eq!(px2, px1 / 2.0, epsilon = 1e-12);
        assert_relative_eq!(py2, py1 / 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_projected_points_stay_on_disk() {
        let p = projector();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..2000 {
            let az = rng.gen::<f64>() * TAU;
            let alt = rng.gen::<f64>() * PI - PI / 2.0;
            let view_az = rng.gen::<f64>() * TAU;
            let view_alt = rng.gen::<f64>() * PI - PI / 2.0;
            let fov = rng.gen_range(0.3..2.5);
            if let Some(pt) = p.project(az, alt, view_az, view_alt, fov) {
                let r = pt.distance_to(&ScreenPoint::new(p.center_x, p.center_y));
                assert!(r <= DISK_CLIP_RADIUS * p.globe_radius + 1e-9);
                assert!(p.contains(pt.x, pt.y));
            }
        }
    }

    #[test]
    fn test_project_view_uses_state() {
        let p = projector();
        let view = ViewState::default();
        let hor = Horizontal::new(view.view_altitude, view.view_azimuth);
        let pt = p.project_view(&hor, &view).unwrap();
        assert_relative_eq!(pt.x, 500.0, epsilon = 1e-9);
        assert_relative_eq!(pt.y, 500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_contains() {
        let p = projector();
        assert!(p.contains(500.0, 500.0));
        assert!(p.contains(500.0 + 470.0, 500.0));
        assert!(!p.contains(0.0, 0.0));
    }
}
