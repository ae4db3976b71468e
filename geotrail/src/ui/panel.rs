//! Display view-models.
//!
//! Formatting rules for the location-info panel: coordinates to six decimal
//! places, meters to two, speed converted to km/h, and `N/A` for anything
//! the sensor did not report.

use chrono::{Local, TimeZone};

use crate::bookmarks::Bookmark;
use crate::location::LocationReading;

/// Conversion factor from m/s to km/h.
const MPS_TO_KMH: f64 = 3.6;

/// Placeholder for fields the sensor did not report.
const NOT_AVAILABLE: &str = "N/A";

/// Display format for the fix timestamp.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The location-info panel, fully formatted.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoPanel {
    pub latitude: String,
    pub longitude: String,
    pub coordinates: String,
    pub accuracy: String,
    pub altitude: String,
    pub speed: String,
    pub heading: String,
    pub timestamp: String,
}

impl InfoPanel {
    /// Format a reading for display.
    pub fn from_reading(reading: &LocationReading) -> Self {
        Self {
            latitude: format!("{:.6}", reading.latitude),
            longitude: format!("{:.6}", reading.longitude),
            coordinates: crate::geo::format_coords(reading.position()),
            accuracy: format_meters(reading.accuracy),
            altitude: format_meters(reading.altitude),
            speed: reading
                .speed
                .map(|mps| format!("{:.2} km/h", mps * MPS_TO_KMH))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            heading: reading
                .heading
                .map(|deg| format!("{:.2}\u{00b0}", deg))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            timestamp: format_timestamp(reading.timestamp),
        }
    }

    /// Field rows in display order, as (label, value) pairs.
    pub fn rows(&self) -> [(&'static str, &str); 7] {
        [
            ("Latitude", self.latitude.as_str()),
            ("Longitude", self.longitude.as_str()),
            ("Accuracy", self.accuracy.as_str()),
            ("Altitude", self.altitude.as_str()),
            ("Speed", self.speed.as_str()),
            ("Heading", self.heading.as_str()),
            ("Time", self.timestamp.as_str()),
        ]
    }
}

/// One row of the bookmark list view.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkRow {
    pub id: i64,
    pub label: String,
}

impl BookmarkRow {
    /// Build the full bookmark list view, in creation order.
    ///
    /// The list is rebuilt from scratch on every bookmark mutation; there is
    /// no incremental diffing.
    pub fn build_list<'a>(bookmarks: impl Iterator<Item = &'a Bookmark>) -> Vec<BookmarkRow> {
        bookmarks
            .map(|b| BookmarkRow {
                id: b.id,
                label: format!(
                    "{} ({:.6}, {:.6}) saved {}",
                    b.name, b.latitude, b.longitude, b.saved_at
                ),
            })
            .collect()
    }
}

fn format_meters(value: Option<f64>) -> String {
    value
        .map(|m| format!("{:.2} m", m))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn format_timestamp(epoch_ms: i64) -> String {
    match Local.timestamp_millis_opt(epoch_ms).single() {
        Some(t) => t.format(TIMESTAMP_FORMAT).to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_formats_fix_fields() {
        let reading = LocationReading::new(37.0, -122.0, 1_700_000_000_000)
            .with_accuracy(15.0)
            .with_altitude(12.345)
            .with_speed(2.5)
            .with_heading(271.5);
        let panel = InfoPanel::from_reading(&reading);

        assert_eq!(panel.latitude, "37.000000");
        assert_eq!(panel.longitude, "-122.000000");
        assert_eq!(panel.coordinates, "37.000000, -122.000000");
        assert_eq!(panel.accuracy, "15.00 m");
        assert_eq!(panel.altitude, "12.35 m");
        assert_eq!(panel.speed, "9.00 km/h");
        assert_eq!(panel.heading, "271.50\u{00b0}");
    }

    #[test]
    fn test_panel_missing_fields_show_na() {
        let panel = InfoPanel::from_reading(&LocationReading::new(1.0, 2.0, 0));

        assert_eq!(panel.accuracy, "N/A");
        assert_eq!(panel.altitude, "N/A");
        assert_eq!(panel.speed, "N/A");
        assert_eq!(panel.heading, "N/A");
    }

    #[test]
    fn test_rows_in_display_order() {
        let panel = InfoPanel::from_reading(&LocationReading::new(1.0, 2.0, 0));
        let rows = panel.rows();
        assert_eq!(rows[0].0, "Latitude");
        assert_eq!(rows[6].0, "Time");
    }

    #[test]
    fn test_bookmark_rows_rebuilt_in_creation_order() {
        let bookmarks = vec![
            Bookmark {
                id: 10,
                name: "Bookmark 1".to_string(),
                latitude: 1.0,
                longitude: 2.0,
                saved_at: "2024-05-01 12:00:00".to_string(),
                note: None,
            },
            Bookmark {
                id: 20,
                name: "Bookmark 2".to_string(),
                latitude: 3.0,
                longitude: 4.0,
                saved_at: "2024-05-01 13:00:00".to_string(),
                note: None,
            },
        ];

        let rows = BookmarkRow::build_list(bookmarks.iter());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 10);
        assert!(rows[0].label.starts_with("Bookmark 1 (1.000000, 2.000000)"));
        assert_eq!(rows[1].id, 20);
    }
}
