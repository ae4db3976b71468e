//! Geographic coordinate primitives.
//!
//! Provides the `LatLon` value type with degree validation, great-circle
//! distance, and the coordinate display / map-link formatting shared by the
//! UI and share actions.

use thiserror::Error;

/// Minimum valid latitude in degrees.
pub const MIN_LAT: f64 = -90.0;

/// Maximum valid latitude in degrees.
pub const MAX_LAT: f64 = 90.0;

/// Minimum valid longitude in degrees.
pub const MIN_LON: f64 = -180.0;

/// Maximum valid longitude in degrees.
pub const MAX_LON: f64 = 180.0;

/// Mean Earth radius in kilometers, used by the haversine formula.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Errors for invalid geographic input.
#[derive(Debug, Error, PartialEq)]
pub enum GeoError {
    /// Latitude outside [-90, 90].
    #[error("invalid latitude: {0}")]
    InvalidLatitude(f64),

    /// Longitude outside [-180, 180].
    #[error("invalid longitude: {0}")]
    InvalidLongitude(f64),
}

/// A geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    /// Latitude in degrees, positive north.
    pub lat: f64,
    /// Longitude in degrees, positive east.
    pub lon: f64,
}

impl LatLon {
    /// Create a validated position.
    pub fn new(lat: f64, lon: f64) -> Result<Self, GeoError> {
        if !(MIN_LAT..=MAX_LAT).contains(&lat) || !lat.is_finite() {
            return Err(GeoError::InvalidLatitude(lat));
        }
        if !(MIN_LON..=MAX_LON).contains(&lon) || !lon.is_finite() {
            return Err(GeoError::InvalidLongitude(lon));
        }
        Ok(Self { lat, lon })
    }

    /// Create a position without validation.
    ///
    /// Used for values that already passed sensor or persistence validation.
    pub fn new_unchecked(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Great-circle distance between two positions via the haversine formula.
///
/// Returns kilometers. Currently unused by any UI action; kept as a public
/// helper for trail analytics.
pub fn haversine_km(a: LatLon, b: LatLon) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

/// Format a position for display: six decimal places, comma separated.
pub fn format_coords(pos: LatLon) -> String {
    format!("{:.6}, {:.6}", pos.lat, pos.lon)
}

/// Build a shareable map link for a position.
pub fn map_link(pos: LatLon) -> String {
    format!("https://maps.google.com/?q={},{}", pos.lat, pos.lon)
}
