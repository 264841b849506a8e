//! Location directory: named presets, manual entry and device geolocation

use thiserror::Error;

use super::{LocationError, Observer};

/// A named place on the preset list
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationPreset {
    pub name: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

impl LocationPreset {
    const fn new(name: &'static str, latitude: f64, longitude: f64) -> Self {
        Self {
            name,
            latitude,
            longitude,
        }
    }

    pub fn observer(&self) -> Observer {
        // Preset coordinates are all in range
        Observer::new(self.latitude, self.longitude, self.name).unwrap_or_default()
    }
}

/// Thirty geographically spread observing sites
pub const LOCATION_PRESETS: [LocationPreset; 30] = [
    LocationPreset::new("Lisbon, Portugal", 38.7223, -9.1393),
    LocationPreset::new("London, UK", 51.5074, -0.1278),
    LocationPreset::new("Paris, France", 48.8566, 2.3522),
    LocationPreset::new("Berlin, Germany", 52.5200, 13.4050),
    LocationPreset::new("Rome, Italy", 41.9028, 12.4964),
    LocationPreset::new("Moscow, Russia", 55.7558, 37.6173),
    LocationPreset::new("Cairo, Egypt", 30.0444, 31.2357),
    LocationPreset::new("Cape Town, South Africa", -33.9249, 18.4241),
    LocationPreset::new("Nairobi, Kenya", -1.2921, 36.8219),
    LocationPreset::new("Dubai, UAE", 25.2048, 55.2708),
    LocationPreset::new("Mumbai, India", 19.0760, 72.8777),
    LocationPreset::new("Beijing, China", 39.9042, 116.4074),
    LocationPreset::new("Tokyo, Japan", 35.6762, 139.6503),
    LocationPreset::new("Seoul, South Korea", 37.5665, 126.9780),
    LocationPreset::new("Singapore", 1.3521, 103.8198),
    LocationPreset::new("Sydney, Australia", -33.8688, 151.2093),
    LocationPreset::new("Auckland, New Zealand", -36.8509, 174.7645),
    LocationPreset::new("Honolulu, Hawaii", 21.3069, -157.8583),
    LocationPreset::new("Los Angeles, USA", 34.0522, -118.2437),
    LocationPreset::new("Denver, USA", 39.7392, -104.9903),
    LocationPreset::new("New York, USA", 40.7128, -74.0060),
    LocationPreset::new("Toronto, Canada", 43.6532, -79.3832),
    LocationPreset::new("Mexico City, Mexico", 19.4326, -99.1332),
    LocationPreset::new("São Paulo, Brazil", -23.5505, -46.6333),
    LocationPreset::new("Buenos Aires, Argentina", -34.6037, -58.3816),
    LocationPreset::new("Santiago, Chile", -33.4489, -70.6693),
    LocationPreset::new("Reykjavik, Iceland", 64.1466, -21.9426),
    LocationPreset::new("Tromsø, Norway", 69.6492, 18.9560),
    LocationPreset::new("McMurdo Station, Antarctica", -77.8419, 166.6863),
    LocationPreset::new("Mauna Kea Observatory, Hawaii", 19.8207, -155.4680),
];

/// Find a preset by case-insensitive prefix of its name, e.g. `"tokyo"`
pub fn preset(query: &str) -> Option<&'static LocationPreset> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return None;
    }
    LOCATION_PRESETS
        .iter()
        .find(|p| p.name.to_lowercase().starts_with(&query))
}

/// Validate typed-in coordinates into an observer named `Custom (lat, lon)`
pub fn manual_location(latitude: &str, longitude: &str) -> Result<Observer, LocationError> {
    let parse = |text: &str| {
        text.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| LocationError::InvalidNumber(text.to_string()))
    };
    let lat = parse(latitude)?;
    let lon = parse(longitude)?;
    Observer::new(lat, lon, format!("Custom ({:.2}, {:.2})", lat, lon))
}

/// Errors from a device position lookup
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeolocationError {
    #[error("Location permission denied")]
    NoPermission,

    #[error("Could not get location")]
    NoFix,

    #[error("Location error: {0}")]
    Provider(String),
}

/// Source of the device's current position
pub trait GeolocationProvider {
    /// Latitude and longitude in degrees
    fn current_position(&self) -> Result<(f64, f64), GeolocationError>;

    /// Current position as an observer named `GPS (lat, lon)`
    fn current_observer(&self) -> Result<Observer, GeolocationError> {
        let (lat, lon) = self.current_position()?;
        Observer::new(lat, lon, format!("GPS ({:.2}, {:.2})", lat, lon))
            .map_err(|e| GeolocationError::Provider(e.to_string()))
    }
}

/// A provider pinned to one position, for hosts without a location service
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeolocationProvider for FixedPosition {
    fn current_position(&self) -> Result<(f64, f64), GeolocationError> {
        Ok((self.latitude, self.longitude))
    }
}
