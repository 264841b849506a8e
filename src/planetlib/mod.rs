//! Low-precision positions of the Sun, Moon and naked-eye planets
//!
//! Mean-element formulas in days from J2000.0. The Sun and Moon are good to a
//! fraction of a degree over a few decades; the planets are coarse placeholders
//! that advance uniformly along the celestial equator.

use crate::celestial::{BodyKind, CelestialBody, CelestialObject, Color};
use crate::coordinates::{normalize_degrees, Ecliptic, Equatorial};
use crate::time::SimTime;

/// Enum representing the solar system bodies the sky shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
}

impl Body {
    /// The five naked-eye planets, inner to outer
    pub const PLANETS: [Body; 5] = [
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
    ];

    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
        }
    }

    pub fn kind(&self) -> BodyKind {
        match self {
            Body::Sun => BodyKind::Sun,
            Body::Moon => BodyKind::Moon,
            _ => BodyKind::Planet,
        }
    }

    /// Compute the body's apparent state at `time`
    pub fn state_at(&self, time: &SimTime) -> CelestialBody {
        match self {
            Body::Sun => sun_position(time),
            Body::Moon => moon_position(time),
            planet => planet_position(planet.name(), time),
        }
    }
}

impl CelestialObject for Body {
    fn position_at(&self, time: &SimTime) -> Equatorial {
        self.state_at(time).position
    }
}

/// Mean longitude model for one planet
#[derive(Debug, Clone, Copy)]
struct PlanetElements {
    body: Body,
    /// Mean longitude at J2000.0, degrees
    l0: f64,
    /// Degrees per day
    rate: f64,
    magnitude: f64,
    color: Color,
}

const PLANET_ELEMENTS: [PlanetElements; 5] = [
    PlanetElements {
        body: Body::Mercury,
        l0: 252.25,
        rate: 4.092385,
        magnitude: -0.4,
        color: Color::rgb(180, 180, 180),
    },
    PlanetElements {
        body: Body::Venus,
        l0: 181.98,
        rate: 1.602130,
        magnitude: -4.4,
        color: Color::rgb(255, 230, 200),
    },
    PlanetElements {
        body: Body::Mars,
        l0: 355.43,
        rate: 0.524071,
        magnitude: -2.0,
        color: Color::rgb(255, 100, 50),
    },
    PlanetElements {
        body: Body::Jupiter,
        l0: 34.35,
        rate: 0.083056,
        magnitude: -2.7,
        color: Color::rgb(255, 200, 150),
    },
    PlanetElements {
        body: Body::Saturn,
        l0: 50.08,
        rate: 0.033371,
        magnitude: 0.0,
        color: Color::rgb(255, 220, 150),
    },
];

const SUN_MAGNITUDE: f64 = -26.7;
const SUN_COLOR: Color = Color::rgb(255, 255, 0);
const MOON_MAGNITUDE: f64 = -12.6;
const MOON_COLOR: Color = Color::rgb(200, 200, 200);

/// Apparent ecliptic longitude of the Sun in degrees
fn sun_longitude(d: f64) -> f64 {
    let m = normalize_degrees(357.529 + 0.98560028 * d).to_radians();
    normalize_degrees(280.459 + 0.98564736 * d + 1.915 * m.sin() + 0.020 * (2.0 * m).sin())
}

/// The Sun at `time`
pub fn sun_position(time: &SimTime) -> CelestialBody {
    let lambda = sun_longitude(time.days_since_j2000()).to_radians();
    let position: Equatorial = Ecliptic::new(lambda, 0.0).into();
    CelestialBody::new("Sun", BodyKind::Sun, position, SUN_MAGNITUDE, SUN_COLOR)
}

/// The Moon at `time`, with its phase
///
/// The phase uses the right-ascension difference from the Sun in place of the
/// true elongation; close enough for the drawn crescent.
pub fn moon_position(time: &SimTime) -> CelestialBody {
    let d = time.days_since_j2000();
    let l = normalize_degrees(218.316 + 13.176396 * d);
    let m = normalize_degrees(134.963 + 13.064993 * d).to_radians();
    let f = normalize_degrees(93.272 + 13.229350 * d).to_radians();

    let lambda = (l + 6.289 * m.sin()).to_radians();
    let beta = (5.128 * f.sin()).to_radians();
    let position: Equatorial = Ecliptic::new(lambda, beta).into();

    let sun = sun_position(time);
    let phase = (1.0 - (position.ra - sun.position.ra).cos()) / 2.0;

    CelestialBody::new("Moon", BodyKind::Moon, position, MOON_MAGNITUDE, MOON_COLOR)
        .with_phase(phase)
}

/// A planet by name at `time`
///
/// Unknown names are not an error: they sit at RA 0 with magnitude 0 in white.
pub fn planet_position(name: &str, time: &SimTime) -> CelestialBody {
    let d = time.days_since_j2000();
    let elements = PLANET_ELEMENTS.iter().find(|p| p.body.name() == name);
    let (longitude, magnitude, color) = match elements {
        Some(p) => (normalize_degrees(p.l0 + p.rate * d), p.magnitude, p.color),
        None => {
            log::debug!("No elements for planet {:?}, using defaults", name);
            (0.0, 0.0, Color::WHITE)
        }
    };

    CelestialBody::new(
        name,
        BodyKind::Planet,
        Equatorial::new(longitude.to_radians(), 0.0),
        magnitude,
        color,
    )
}

/// Source of solar-system body positions for a frame
#[derive(Debug, Default, Clone, Copy)]
pub struct Ephemeris;

impl Ephemeris {
    /// Create a new ephemeris
    pub fn new() -> Self {
        Self
    }

    /// Sun, Moon and the five planets, in that order
    pub fn bodies_at(&self, time: &SimTime) -> Vec<CelestialBody> {
        let mut bodies = Vec::with_capacity(7);
        bodies.push(sun_position(time));
        bodies.push(moon_position(time));
        bodies.extend(Body::PLANETS.iter().map(|p| planet_position(p.name(), time)));
        bodies
    }
}
