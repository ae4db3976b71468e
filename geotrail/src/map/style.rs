//! Tile style presets.
//!
//! Three fixed presets, each with its own XYZ url template, attribution,
//! and maximum zoom. Tile servers are external collaborators; nothing here
//! performs network I/O.

use serde::{Deserialize, Serialize};

/// OpenStreetMap raster tiles (the standard street map).
const OSM_URL_TEMPLATE: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
const OSM_ATTRIBUTION: &str = "(c) OpenStreetMap contributors";
const OSM_MAX_ZOOM: u8 = 19;

/// Esri World Imagery (satellite).
const ESRI_URL_TEMPLATE: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";
const ESRI_ATTRIBUTION: &str = "Tiles (c) Esri, Maxar, Earthstar Geographics";
const ESRI_MAX_ZOOM: u8 = 19;

/// OpenTopoMap (terrain).
const OPENTOPO_URL_TEMPLATE: &str = "https://tile.opentopomap.org/{z}/{x}/{y}.png";
const OPENTOPO_ATTRIBUTION: &str = "(c) OpenTopoMap (CC-BY-SA)";
const OPENTOPO_MAX_ZOOM: u8 = 17;

/// One of the three fixed tile providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileStyle {
    #[default]
    Standard,
    Satellite,
    Terrain,
}

impl TileStyle {
    /// All styles in display order.
    pub fn all() -> [TileStyle; 3] {
        [TileStyle::Standard, TileStyle::Satellite, TileStyle::Terrain]
    }

    /// XYZ url template for this provider.
    pub fn url_template(&self) -> &'static str {
        match self {
            TileStyle::Standard => OSM_URL_TEMPLATE,
            TileStyle::Satellite => ESRI_URL_TEMPLATE,
            TileStyle::Terrain => OPENTOPO_URL_TEMPLATE,
        }
    }

    /// Attribution string for this provider.
    pub fn attribution(&self) -> &'static str {
        match self {
            TileStyle::Standard => OSM_ATTRIBUTION,
            TileStyle::Satellite => ESRI_ATTRIBUTION,
            TileStyle::Terrain => OPENTOPO_ATTRIBUTION,
        }
    }

    /// Maximum zoom level this provider serves.
    pub fn max_zoom(&self) -> u8 {
        match self {
            TileStyle::Standard => OSM_MAX_ZOOM,
            TileStyle::Satellite => ESRI_MAX_ZOOM,
            TileStyle::Terrain => OPENTOPO_MAX_ZOOM,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            TileStyle::Standard => "Standard",
            TileStyle::Satellite => "Satellite",
            TileStyle::Terrain => "Terrain",
        }
    }

    /// Parse a persisted style name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "standard" => Some(TileStyle::Standard),
            "satellite" => Some(TileStyle::Satellite),
            "terrain" => Some(TileStyle::Terrain),
            _ => None,
        }
    }
}
