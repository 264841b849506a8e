//! Constellation line figures
//!
//! Loaded from a GeoJSON-style feature collection where each feature is one
//! constellation: `id` holds the IAU abbreviation and `geometry.coordinates`
//! holds `MultiLineString` rings of `[ra, dec]` pairs in degrees.

use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::coordinates::Equatorial;
use crate::{Result, SkydomeError};

pub mod names;

pub use names::{display_name, full_name};

/// A polyline vertex in degrees, kept exactly as the feed gave it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinePoint {
    pub ra: f64,
    pub dec: f64,
}

impl LinePoint {
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    pub fn to_equatorial(&self) -> Equatorial {
        Equatorial::from_degrees(self.ra, self.dec)
    }
}

/// One constellation figure with its label anchor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constellation {
    id: String,
    name: String,
    lines: Vec<Vec<LinePoint>>,
    centroid: LinePoint,
}

impl Constellation {
    /// Build a constellation; the centroid is the plain mean of every vertex
    pub fn new(id: impl Into<String>, name: impl Into<String>, lines: Vec<Vec<LinePoint>>) -> Self {
        let centroid = centroid_of(&lines);
        Self {
            id: id.into(),
            name: name.into(),
            lines,
            centroid,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[Vec<LinePoint>] {
        &self.lines
    }

    /// Label position in degrees, (0, 0) for a figure without vertices
    pub fn centroid(&self) -> LinePoint {
        self.centroid
    }

    pub fn vertex_count(&self) -> usize {
        self.lines.iter().map(Vec::len).sum()
    }
}

fn centroid_of(lines: &[Vec<LinePoint>]) -> LinePoint {
    let (mut sum_ra, mut sum_dec, mut count) = (0.0, 0.0, 0usize);
    for point in lines.iter().flatten() {
        sum_ra += point.ra;
        sum_dec += point.dec;
        count += 1;
    }
    if count == 0 {
        LinePoint::new(0.0, 0.0)
    } else {
        LinePoint::new(sum_ra / count as f64, sum_dec / count as f64)
    }
}

/// All constellation figures, loaded once
#[derive(Debug, Clone, Default)]
pub struct ConstellationCatalog {
    constellations: Vec<Constellation>,
}

impl ConstellationCatalog {
    pub fn new(constellations: Vec<Constellation>) -> Self {
        Self { constellations }
    }

    /// Parse a feature collection document
    pub fn from_json_str(text: &str) -> Result<Self> {
        let doc: Value = serde_json::from_str(text)?;
        let features = doc
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                SkydomeError::CatalogError("constellation feed has no features array".to_string())
            })?;

        let mut constellations = Vec::with_capacity(features.len());
        let mut dropped_vertices = 0usize;

        for (index, feature) in features.iter().enumerate() {
            let Some(id) = feature.get("id").and_then(Value::as_str) else {
                log::warn!("Skipping constellation feature {} without an id", index);
                continue;
            };

            let mut lines = Vec::new();
            if let Some(geometry) = feature.get("geometry") {
                for ring in rings_of(geometry) {
                    let mut line = Vec::with_capacity(ring.len());
                    for vertex in ring {
                        match parse_vertex(vertex) {
                            Some(point) => line.push(point),
                            None => dropped_vertices += 1,
                        }
                    }
                    if !line.is_empty() {
                        lines.push(line);
                    }
                }
            }

            constellations.push(Constellation::new(id, display_name(id), lines));
        }

        if dropped_vertices > 0 {
            log::warn!("Dropped {} malformed constellation vertices", dropped_vertices);
        }
        log::info!("Loaded {} constellations", constellations.len());

        Ok(Self::new(constellations))
    }

    /// Load from a `.json` or `.json.gz` file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = super::read_feed(path)?;
        Self::from_json_str(&text)
    }

    pub fn constellations(&self) -> &[Constellation] {
        &self.constellations
    }

    /// Find a constellation by its feed id
    pub fn get(&self, id: &str) -> Option<&Constellation> {
        self.constellations.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.constellations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constellations.is_empty()
    }
}

/// Rings of a geometry; a bare `LineString` counts as a single ring
fn rings_of(geometry: &Value) -> Vec<&Vec<Value>> {
    let Some(coordinates) = geometry.get("coordinates").and_then(Value::as_array) else {
        return Vec::new();
    };
    if geometry.get("type").and_then(Value::as_str) == Some("LineString") {
        return vec![coordinates];
    }
    coordinates.iter().filter_map(Value::as_array).collect()
}

fn parse_vertex(vertex: &Value) -> Option<LinePoint> {
    let coords = vertex.as_array()?;
    if coords.len() < 2 {
        return None;
    }
    Some(LinePoint::new(coords[0].as_f64()?, coords[1].as_f64()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "id": "Ori",
                "properties": {"rank": "1"},
                "geometry": {
                    "type": "MultiLineString",
                    "coordinates": [
                        [[88.79, 7.41], [81.28, 6.35], [83.00, -0.30]],
                        [[78.63, -8.20], [83.00, -0.30]]
                    ]
                }
            },
            {
                "type": "Feature",
                "id": "Zzz",
                "geometry": {
                    "type": "MultiLineString",
                    "coordinates": [[[10, 20], [30]], [[1]], [[30, 40, 99]]]
                }
            },
            {
                "type": "Feature",
                "id": "Cru",
                "geometry": null
            }
        ]
    }"#;

    #[test]
    fn test_centroid_is_vertex_mean() {
        let c = Constellation::new(
            "T",
            "Test",
            vec![vec![LinePoint::new(10.0, 20.0), LinePoint::new(30.0, 40.0)]],
        );
        assert_relative_eq!(c.centroid().ra, 20.0);
        assert_relative_eq!(c.centroid().dec, 30.0);
    }

    #[test]
    fn test_centroid_of_empty_figure() {
        let c = Constellation::new("T", "Test", vec![]);
        assert_eq!(c.centroid(), LinePoint::new(0.0, 0.0));
        assert_eq!(c.vertex_count(), 0);
    }

    #[test]
    fn test_centroid_is_not_wrapped() {
        // Raw degree mean across the RA seam lands near 180, not 0
        let c = Constellation::new(
            "Seam",
            "Seam",
            vec![vec![LinePoint::new(350.0, 0.0), LinePoint::new(10.0, 0.0)]],
        );
        assert_relative_eq!(c.centroid().ra, 180.0);
    }

    #[test]
    fn test_parse_feature_collection() {
        let catalog = ConstellationCatalog::from_json_str(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 3);

        let orion = catalog.get("Ori").unwrap();
        assert_eq!(orion.name(), "Orion");
        assert_eq!(orion.lines().len(), 2);
        assert_eq!(orion.lines()[0].len(), 3);
        assert_eq!(orion.vertex_count(), 5);
        assert_relative_eq!(orion.lines()[1][0].ra, 78.63);
    }

    #[test]
    fn test_malformed_vertices_dropped() {
        let catalog = ConstellationCatalog::from_json_str(SAMPLE).unwrap();
        let zzz = catalog.get("Zzz").unwrap();

        // Unmapped id is used as the display name
        assert_eq!(zzz.name(), "Zzz");
        // [30] and the lone [1] ring vanish; the three-component vertex keeps its first two
        assert_eq!(zzz.lines().len(), 2);
        assert_eq!(zzz.lines()[0], vec![LinePoint::new(10.0, 20.0)]);
        assert_eq!(zzz.lines()[1], vec![LinePoint::new(30.0, 40.0)]);
        assert_relative_eq!(zzz.centroid().ra, 20.0);
        assert_relative_eq!(zzz.centroid().dec, 30.0);
    }

    #[test]
    fn test_missing_geometry_is_empty_figure() {
        let catalog = ConstellationCatalog::from_json_str(SAMPLE).unwrap();
        let crux = catalog.get("Cru").unwrap();
        assert_eq!(crux.name(), "Crux");
        assert!(crux.lines().is_empty());
        assert_eq!(crux.centroid(), LinePoint::new(0.0, 0.0));
    }

    #[test]
    fn test_line_string_geometry() {
        let doc = r#"{"features": [{"id": "Tri", "geometry": {"type": "LineString",
            "coordinates": [[28.27, 29.58], [32.39, 34.99]]}}]}"#;
        let catalog = ConstellationCatalog::from_json_str(doc).unwrap();
        let tri = catalog.get("Tri").unwrap();
        assert_eq!(tri.lines().len(), 1);
        assert_eq!(tri.vertex_count(), 2);
    }

    #[test]
    fn test_unparsable_document() {
        assert!(matches!(
            ConstellationCatalog::from_json_str("{not json"),
            Err(SkydomeError::ParseError(_))
        ));
        assert!(matches!(
            ConstellationCatalog::from_json_str(r#"{"type": "FeatureCollection"}"#),
            Err(SkydomeError::CatalogError(_))
        ));
    }

    #[test]
    fn test_feature_without_id_skipped() {
        let doc = r#"{"features": [{"geometry": {"coordinates": [[[1, 2]]]}}, {"id": "Lyr"}]}"#;
        let catalog = ConstellationCatalog::from_json_str(doc).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.constellations()[0].name(), "Lyra");
    }
}
