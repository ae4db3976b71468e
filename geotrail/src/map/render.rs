//! PNG snapshot rendering.
//!
//! Composites the `MapView` layers (accuracy circle, trail, marker) over
//! tiles from the active provider using the `staticmap` crate. This is the
//! only code path that downloads tiles; everything else in the map module is
//! pure bookkeeping.

use std::path::Path;

use staticmap::tools::{CircleBuilder, Color, LineBuilder};
use staticmap::StaticMapBuilder;
use thiserror::Error;
use tracing::debug;

use super::view::MapView;

/// Ground resolution at the equator for 256 px tiles, meters per pixel.
const EQUATOR_METERS_PER_PIXEL: f64 = 156_543.033_92;

/// Web Mercator latitude limit; beyond it `cos(lat)` collapses to zero and
/// the providers serve no tiles anyway.
const MERCATOR_MAX_LAT: f64 = 85.051_128_78;

/// Trail line width in pixels.
const TRAIL_WIDTH_PX: f32 = 3.0;

/// Marker dot radii in pixels (white ring around a blue dot).
const MARKER_OUTER_PX: f32 = 8.0;
const MARKER_INNER_PX: f32 = 5.0;

/// Snapshot rendering failures.
#[derive(Debug, Error)]
pub enum MapError {
    /// Tile download or compositing failed.
    #[error("map rendering failed: {0}")]
    Render(#[from] staticmap::Error),

    /// The output file could not be prepared.
    #[error("snapshot output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Snapshot dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotConfig {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl SnapshotConfig {
    /// Set the snapshot dimensions.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

/// Render the map state to a PNG file.
pub fn render_to_file(
    view: &MapView,
    config: &SnapshotConfig,
    path: &Path,
) -> Result<(), MapError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let center = view.center();
    let mut map = StaticMapBuilder::default()
        .width(config.width)
        .height(config.height)
        .url_template(view.style().url_template())
        .zoom(view.zoom())
        .lat_center(center.lat)
        .lon_center(center.lon)
        .build()?;

    // Layer order: accuracy circle below the trail, marker on top.
    if let Some(accuracy) = view.accuracy() {
        let radius_px = meters_to_pixels(accuracy.radius_m, accuracy.center.lat, view.zoom());
        let circle = CircleBuilder::default()
            .lat_coordinate(accuracy.center.lat)
            .lon_coordinate(accuracy.center.lon)
            .radius(radius_px)
            .color(Color::new(true, 90, 200, 250, 70))
            .build()?;
        map.add_tool(circle);
    }

    if let Some(trail) = view.trail() {
        let line = LineBuilder::default()
            .lat_coordinates(trail.points.iter().map(|p| p.lat).collect::<Vec<f64>>())
            .lon_coordinates(trail.points.iter().map(|p| p.lon).collect::<Vec<f64>>())
            .width(TRAIL_WIDTH_PX)
            .simplify(true)
            .color(Color::new(true, 0, 122, 255, 255))
            .build()?;
        map.add_tool(line);
    }

    if let Some(marker) = view.marker() {
        let ring = CircleBuilder::default()
            .lat_coordinate(marker.position.lat)
            .lon_coordinate(marker.position.lon)
            .radius(MARKER_OUTER_PX)
            .color(Color::new(true, 255, 255, 255, 255))
            .build()?;
        let dot = CircleBuilder::default()
            .lat_coordinate(marker.position.lat)
            .lon_coordinate(marker.position.lon)
            .radius(MARKER_INNER_PX)
            .color(Color::new(true, 0, 122, 255, 255))
            .build()?;
        map.add_tool(ring);
        map.add_tool(dot);
    }

    debug!(
        path = %path.display(),
        style = view.style().name(),
        zoom = view.zoom(),
        "rendering map snapshot"
    );
    map.save_png(path)?;
    Ok(())
}

/// Convert a ground distance to pixels at the given latitude and zoom.
fn meters_to_pixels(meters: f64, lat: f64, zoom: u8) -> f32 {
    let lat = lat.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT);
    let resolution = EQUATOR_METERS_PER_PIXEL * lat.to_radians().cos() / f64::from(1u32 << zoom);
    (meters / resolution) as f32
}
