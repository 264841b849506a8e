//! Star catalog loaded from a JSON feed
//!
//! The feed is an array of `{ra, dec, mag, name, color}` records with
//! positions in degrees. Parsing is lenient: records lacking a usable ra, dec
//! or mag are skipped, a missing name becomes empty and an unreadable color
//! becomes white.

use serde_json::Value;
use std::path::Path;

use super::StarCatalog;
use crate::celestial::{CelestialBody, Color};
use crate::{Result, SkydomeError};

/// Stars from a JSON feed, immutable after loading
#[derive(Debug, Clone, Default)]
pub struct JsonStarCatalog {
    stars: Vec<CelestialBody>,
}

impl JsonStarCatalog {
    /// Wrap an already-built list of stars
    pub fn from_stars(stars: Vec<CelestialBody>) -> Self {
        Self { stars }
    }

    /// Parse a feed document
    pub fn from_json_str(text: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(text)?;
        let records = doc
            .as_array()
            .ok_or_else(|| SkydomeError::CatalogError("star feed is not an array".to_string()))?;

        let mut stars = Vec::with_capacity(records.len());
        let mut skipped = 0usize;

        for (index, record) in records.iter().enumerate() {
            match parse_star(record) {
                Some(star) => stars.push(star),
                None => {
                    log::debug!("Skipping star record {}: {}", index, record);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            log::warn!("Skipped {} malformed star records", skipped);
        }
        log::info!("Loaded {} stars", stars.len());

        Ok(Self { stars })
    }

    /// Load from a `.json` or `.json.gz` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = super::read_feed(path)?;
        Self::from_json_str(&text)
    }
}

impl StarCatalog for JsonStarCatalog {
    fn stars(&self) -> &[CelestialBody] {
        &self.stars
    }
}

/// A number, or a string holding one
fn numeric_field(record: &Value, key: &str) -> Option<f64> {
    let value = match record.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

fn parse_star(record: &Value) -> Option<CelestialBody> {
    let ra = numeric_field(record, "ra")?;
    let dec = numeric_field(record, "dec")?;
    let mag = numeric_field(record, "mag")?;

    let name = record.get("name").and_then(Value::as_str).unwrap_or("");
    let color = record
        .get("color")
        .and_then(Value::as_str)
        .and_then(Color::parse)
        .unwrap_or(Color::WHITE);

    Some(CelestialBody::star(name, ra, dec, mag, color))
}
