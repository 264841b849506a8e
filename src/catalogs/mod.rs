//! Star and constellation catalogs
//!
//! Both catalogs are read once from JSON feeds (optionally gzip-compressed)
//! and never change afterwards. A feed that fails to load leaves an empty
//! catalog behind so the sky keeps running with whatever did load.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::celestial::CelestialBody;
use crate::Result;

pub mod constellations;
pub mod stars;

pub use constellations::{Constellation, ConstellationCatalog, LinePoint};
pub use stars::JsonStarCatalog;

/// Generic trait for all star catalogs
pub trait StarCatalog {
    /// All stars in the catalog
    fn stars(&self) -> &[CelestialBody];

    /// Get the number of stars in the catalog
    fn len(&self) -> usize {
        self.stars().len()
    }

    /// Check if the catalog is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Filter stars based on a predicate
    fn filter<F>(&self, predicate: F) -> Vec<&CelestialBody>
    where
        F: Fn(&CelestialBody) -> bool,
    {
        self.stars().iter().filter(|s| predicate(*s)).collect()
    }

    /// Stars at or brighter than a magnitude
    fn brighter_than(&self, magnitude: f64) -> Vec<&CelestialBody> {
        self.filter(|star| star.magnitude <= magnitude)
    }
}

/// Read a feed file to a string, inflating it when the name ends in `.gz`
pub fn read_feed<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let is_gzipped = path.extension().is_some_and(|ext| ext == "gz");

    let mut text = String::new();
    if is_gzipped {
        log::debug!("Inflating feed {}", path.display());
        flate2::read::GzDecoder::new(BufReader::new(file)).read_to_string(&mut text)?;
    } else {
        BufReader::new(file).read_to_string(&mut text)?;
    }
    Ok(text)
}

/// Everything loaded from the feeds
#[derive(Debug, Clone, Default)]
pub struct SkyCatalogs {
    pub stars: JsonStarCatalog,
    pub constellations: ConstellationCatalog,
}

impl SkyCatalogs {
    pub fn new(stars: JsonStarCatalog, constellations: ConstellationCatalog) -> Self {
        Self {
            stars,
            constellations,
        }
    }
}
