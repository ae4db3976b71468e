//! Toolkit-independent map state.
//!
//! Tracks what the map shows: one position marker with an accuracy circle,
//! one trail polyline, the active tile style, and the viewport. Replacing a
//! layer always removes the previous one first, so markers and trails never
//! duplicate across updates.

use crate::geo::{self, LatLon};
use crate::history::TrailHistory;
use crate::location::LocationReading;

use super::style::TileStyle;

/// Zoom used when centering on a fix or a bookmark.
pub const FIX_ZOOM: u8 = 16;

/// Initial zoom before the first fix (world view).
pub const DEFAULT_ZOOM: u8 = 2;

/// Accuracy circle radius when the sensor reports no estimate.
const DEFAULT_ACCURACY_RADIUS_M: f64 = 100.0;

/// Initial center before the first fix.
const DEFAULT_CENTER: LatLon = LatLon { lat: 20.0, lon: 0.0 };

/// The position marker with its info popup text.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLon,
    pub popup: String,
}

/// Circle visualizing the fix accuracy estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyCircle {
    pub center: LatLon,
    pub radius_m: f64,
}

/// Polyline through the trail history, oldest point first.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    pub points: Vec<LatLon>,
}

/// The map model front-ends render from.
#[derive(Debug, Clone)]
pub struct MapView {
    style: TileStyle,
    center: LatLon,
    zoom: u8,
    marker: Option<Marker>,
    accuracy: Option<AccuracyCircle>,
    trail: Option<Trail>,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(TileStyle::default())
    }
}

impl MapView {
    /// Create a map at the world view with the given style.
    pub fn new(style: TileStyle) -> Self {
        Self {
            style,
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            marker: None,
            accuracy: None,
            trail: None,
        }
    }

    /// Show a fix: recenter at zoom 16 and replace the marker and accuracy
    /// circle. The previous marker and circle are dropped first.
    pub fn set_reading(&mut self, reading: &LocationReading) {
        let position = reading.position();
        let accuracy_text = match reading.accuracy {
            Some(m) => format!("{:.2} m", m),
            None => "N/A".to_string(),
        };

        self.marker = Some(Marker {
            position,
            popup: format!(
                "Your Location\nLat: {:.6}\nLng: {:.6}\nAccuracy: {}",
                position.lat, position.lon, accuracy_text
            ),
        });
        self.accuracy = Some(AccuracyCircle {
            center: position,
            radius_m: reading.accuracy.unwrap_or(DEFAULT_ACCURACY_RADIUS_M),
        });
        self.center = position;
        self.zoom = FIX_ZOOM.min(self.style.max_zoom());
    }

    /// Redraw the trail from the history, oldest point first.
    ///
    /// Fewer than two points clears the trail: a single fix has nothing to
    /// connect.
    pub fn set_trail(&mut self, history: &TrailHistory) {
        if history.len() < 2 {
            self.trail = None;
            return;
        }
        self.trail = Some(Trail {
            points: history
                .entries()
                .map(|e| e.reading.position())
                .collect(),
        });
    }

    /// Swap the tile provider, clamping the zoom to what it serves.
    pub fn set_tile_style(&mut self, style: TileStyle) {
        self.style = style;
        self.zoom = self.zoom.min(style.max_zoom());
    }

    /// Jump to a position, e.g. a bookmark.
    pub fn pan_to(&mut self, position: LatLon, zoom: u8) {
        self.center = position;
        self.zoom = zoom.min(self.style.max_zoom());
    }

    pub fn style(&self) -> TileStyle {
        self.style
    }

    pub fn center(&self) -> LatLon {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    pub fn accuracy(&self) -> Option<&AccuracyCircle> {
        self.accuracy.as_ref()
    }

    pub fn trail(&self) -> Option<&Trail> {
        self.trail.as_ref()
    }

    /// Attribution line for the active provider.
    pub fn attribution(&self) -> &'static str {
        self.style.attribution()
    }

    /// Coordinates of the current marker, formatted for display.
    pub fn marker_coords(&self) -> Option<String> {
        self.marker.as_ref().map(|m| geo::format_coords(m.position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(lat: f64, lon: f64, accuracy: Option<f64>) -> LocationReading {
        let mut reading = LocationReading::new(lat, lon, 0);
        if let Some(m) = accuracy {
            reading = reading.with_accuracy(m);
        }
        reading
    }

    fn history_of(n: usize) -> TrailHistory {
        let mut history = TrailHistory::new();
        for i in 0..n {
            history.record(fix(i as f64 * 0.01, 10.0, None));
        }
        history
    }

    #[test]
    fn test_starts_at_world_view() {
        let view = MapView::default();
        assert_eq!(view.zoom(), DEFAULT_ZOOM);
        assert!(view.marker().is_none());
        assert!(view.trail().is_none());
    }

    #[test]
    fn test_set_reading_centers_at_fix_zoom() {
        let mut view = MapView::default();
        view.set_reading(&fix(37.0, -122.0, Some(15.0)));

        assert_eq!(view.zoom(), FIX_ZOOM);
        assert!((view.center().lat - 37.0).abs() < f64::EPSILON);
        assert!((view.center().lon - (-122.0)).abs() < f64::EPSILON);

        let marker = view.marker().unwrap();
        assert!(marker.popup.contains("Lat: 37.000000"));
        assert!(marker.popup.contains("Lng: -122.000000"));
        assert!(marker.popup.contains("Accuracy: 15.00 m"));

        assert!((view.accuracy().unwrap().radius_m - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_reading_replaces_previous_marker() {
        let mut view = MapView::default();
        view.set_reading(&fix(1.0, 1.0, Some(5.0)));
        view.set_reading(&fix(2.0, 2.0, Some(8.0)));

        // Exactly one marker and one circle, at the latest position.
        let marker = view.marker().unwrap();
        assert!((marker.position.lat - 2.0).abs() < f64::EPSILON);
        assert!((view.accuracy().unwrap().radius_m - 8.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_accuracy_uses_default_radius() {
        let mut view = MapView::default();
        view.set_reading(&fix(1.0, 1.0, None));

        assert!((view.accuracy().unwrap().radius_m - 100.0).abs() < f64::EPSILON);
        assert!(view.marker().unwrap().popup.contains("Accuracy: N/A"));
    }

    #[test]
    fn test_trail_cleared_below_two_points() {
        let mut view = MapView::default();
        view.set_trail(&history_of(5));
        assert!(view.trail().is_some());

        view.set_trail(&history_of(1));
        assert!(view.trail().is_none());

        view.set_trail(&history_of(0));
        assert!(view.trail().is_none());
    }

    #[test]
    fn test_trail_points_chronological() {
        let mut view = MapView::default();
        view.set_trail(&history_of(4));

        let points = &view.trail().unwrap().points;
        assert_eq!(points.len(), 4);
        assert!(points.windows(2).all(|w| w[0].lat < w[1].lat));
    }

    #[test]
    fn test_style_swap_clamps_zoom() {
        let mut view = MapView::default();
        view.pan_to(LatLon::new_unchecked(0.0, 0.0), 19);
        assert_eq!(view.zoom(), 19);

        view.set_tile_style(TileStyle::Terrain);
        assert_eq!(view.zoom(), 17);
    }

    #[test]
    fn test_pan_to_clamps_to_style_max() {
        let mut view = MapView::new(TileStyle::Terrain);
        view.pan_to(LatLon::new_unchecked(47.0, 11.0), 19);
        assert_eq!(view.zoom(), 17);
    }
}
