//! End-to-end checks: feeds in, frames out

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::{FRAC_PI_2, PI};
use tempfile::tempdir;

use skydome::catalogs::{ConstellationCatalog, JsonStarCatalog, SkyCatalogs, StarCatalog};
use skydome::config::ObserverConfig;
use skydome::constants::TAU;
use skydome::coordinates::{equatorial_to_horizontal, sidereal_time};
use skydome::planetlib::sun_position;
use skydome::projection::project_to_disk;
use skydome::view::Command;
use skydome::{Color, Loader, SimTime, SimulationClock, Sky, SkyConfig};

fn null_island_config() -> SkyConfig {
    SkyConfig {
        observer: ObserverConfig {
            latitude: 0.0,
            longitude: 0.0,
            name: "Null Island".to_string(),
        },
        ..SkyConfig::default()
    }
}

fn sky_at_j2000(config: &SkyConfig, catalogs: SkyCatalogs) -> Sky {
    let clock = SimulationClock::new(SimTime::j2000(), SimTime::from_millis(0));
    Sky::with_clock(config, catalogs, clock).unwrap()
}

#[test]
fn test_star_feed_brightness_threshold() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stars.json");
    std::fs::write(
        &path,
        r##"[{"ra": 0, "dec": 0, "mag": 1, "name": "Test", "color": "#FF0000"}]"##,
    )
    .unwrap();

    let catalog = JsonStarCatalog::from_file(&path).unwrap();
    let bright = catalog.brighter_than(2.0);
    assert_eq!(bright.len(), 1);
    assert_eq!(bright[0].name, "Test");
    assert_eq!(bright[0].ra(), 0.0);
    assert_eq!(bright[0].dec(), 0.0);
    assert_eq!(bright[0].magnitude, 1.0);
    assert_eq!(bright[0].color, Color::rgb(255, 0, 0));
    assert!(catalog.brighter_than(0.5).is_empty());
}

#[test]
fn test_sun_at_j2000_from_null_island() {
    // Low-precision solar longitude worked by hand for d = 0
    let m = 357.529f64.to_radians();
    let lambda = (280.459 + 1.915 * m.sin() + 0.020 * (2.0 * m).sin()).to_radians();
    let eps = 23.439f64.to_radians();
    let ra = (eps.cos() * lambda.sin()).atan2(lambda.cos()).rem_euclid(TAU);
    let dec = (eps.sin() * lambda.sin()).asin();

    let sun = sun_position(&SimTime::j2000());
    assert_relative_eq!(sun.ra(), ra, epsilon = 1e-4);
    assert_relative_eq!(sun.dec(), dec, epsilon = 1e-4);

    // Facing north the Sun is up but behind the viewer: it transits the
    // meridian at altitude ~67° due south, so it has no screen point.
    let mut sky = sky_at_j2000(&null_island_config(), SkyCatalogs::default());
    sky.apply(Command::SetViewDirection {
        azimuth: 0.0,
        altitude: 0.0,
    })
    .unwrap();
    let frame = sky.frame();
    let behind = frame.find("Sun").unwrap();
    assert!(behind.horizontal.altitude > 0.0);
    assert!(behind.point.is_none());
    assert!(!behind.label);

    // Turning to face south brings it onto the disk
    sky.apply(Command::SetViewDirection {
        azimuth: PI,
        altitude: 0.0,
    })
    .unwrap();
    let frame = sky.frame();
    let item = frame.find("Sun").unwrap();
    assert!(item.horizontal.altitude > 0.0);
    let point = item.point.unwrap();

    let projector = sky.projector();
    let r = (point.x - projector.center_x).hypot(point.y - projector.center_y);
    assert!(r <= projector.globe_radius);
    assert!(item.label);
}

#[test]
fn test_sun_on_disk_whenever_up() {
    let config = null_island_config();
    let mut rng = StdRng::seed_from_u64(17);
    for _ in 0..200 {
        let offset = rng.gen_range(0..365 * 86_400_000i64);
        let time = SimTime::j2000().offset_millis(offset);
        let sun = sun_position(&time);
        let lst = skydome::coordinates::local_sidereal_time(time, 0.0);
        let hor = equatorial_to_horizontal(sun.ra(), sun.dec(), lst, 0.0);
        if hor.altitude > 0.0 {
            if let Some((px, py)) = project_to_disk(hor.azimuth, hor.altitude, PI, 0.0, 1.0) {
                assert!(px.hypot(py) <= 1.0);
            }
        }
    }
    // The config itself is fine to build a sky from
    assert!(Sky::new(&config, SkyCatalogs::default()).is_ok());
}

#[test]
fn test_zenith_and_sidereal_properties() {
    let mut rng = StdRng::seed_from_u64(23);
    for _ in 0..500 {
        let lat = rng.gen_range(-1.5..1.5);
        let ra = rng.gen_range(0.0..TAU);
        let hor = equatorial_to_horizontal(ra, lat, ra, lat);
        assert_relative_eq!(hor.altitude, FRAC_PI_2, epsilon = 1e-6);

        let t = SimTime::from_millis(rng.gen_range(-1_000_000_000_000i64..4_000_000_000_000));
        let gmst = sidereal_time(t);
        assert!((0.0..24.0).contains(&gmst));
    }
}

#[test]
fn test_constellation_centroids_from_feed() {
    let catalog = ConstellationCatalog::from_json_str(
        r#"{"features": [
            {"id": "Abc", "geometry": {"type": "MultiLineString", "coordinates": [[[10, 20], [30, 40]]]}},
            {"id": "Emp", "geometry": {"type": "MultiLineString", "coordinates": []}}
        ]}"#,
    )
    .unwrap();
    let centroid = catalog.get("Abc").unwrap().centroid();
    assert_relative_eq!(centroid.ra, 20.0);
    assert_relative_eq!(centroid.dec, 30.0);
    let empty = catalog.get("Emp").unwrap().centroid();
    assert_eq!((empty.ra, empty.dec), (0.0, 0.0));
}

#[test]
fn test_missing_feeds_keep_the_sky_running() {
    let dir = tempdir().unwrap();
    let catalogs = Loader::new()
        .with_data_dir(dir.path().join("nowhere"))
        .load_sky_catalogs();
    assert!(catalogs.stars.is_empty());
    assert!(catalogs.constellations.is_empty());

    let sky = sky_at_j2000(&SkyConfig::default(), catalogs);
    let frame = sky.frame();
    assert!(frame.stars.is_empty());
    assert!(frame.constellation_lines.is_empty());
    assert_eq!(frame.bodies.len(), 7);
    assert!(!frame.grid.horizon.is_empty());
}

#[test]
fn test_bundled_feeds_load() {
    let data = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let loader = Loader::new().with_data_dir(&data);
    let stars = loader.load_star_catalog().unwrap();
    let constellations = loader.load_constellations().unwrap();
    assert!(stars.len() > 50);
    assert_eq!(constellations.get("Ori").unwrap().name(), "Orion");
    assert!(constellations.get("UMa").unwrap().vertex_count() >= 8);
}

#[test]
fn test_speed_ladder_through_commands() {
    let mut sky = sky_at_j2000(&SkyConfig::default(), SkyCatalogs::default());
    let mut speeds = Vec::new();
    for _ in 0..3 {
        sky.apply(Command::Rewind).unwrap();
        speeds.push(sky.view().time_speed);
    }
    assert_eq!(speeds, vec![0.0, -1.0, -10.0]);

    sky.apply(Command::SetTimeSpeed(-1.0)).unwrap();
    sky.apply(Command::FastForward).unwrap();
    assert_eq!(sky.view().time_speed, 0.0);
    sky.apply(Command::FastForward).unwrap();
    assert_eq!(sky.view().time_speed, 1.0);
}

#[test]
fn test_time_runs_backwards_and_status_follows() {
    let mut sky = sky_at_j2000(&null_island_config(), SkyCatalogs::default());
    sky.enqueue(Command::SetTimeSpeed(-3600.0));
    sky.tick_at(SimTime::from_millis(1000));
    assert_eq!(sky.time().millis(), SimTime::j2000().millis() - 3_600_000);

    let status = sky.status();
    assert_eq!(status.date, "2000-01-01");
    assert_eq!(status.utc_time, "UTC 11:00:00");
    assert_eq!(status.location, "Null Island");
    assert_eq!(status.speed, "◀◀ 3600×");
}
