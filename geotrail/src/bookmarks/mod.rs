//! User-saved points of interest.
//!
//! Bookmarks are created from the current fix, auto-named sequentially, and
//! deleted by id. Ids are unique within a session; coordinates are not
//! required to be unique.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::geo::LatLon;
use crate::location::LocationReading;

/// Display format for a bookmark's creation time.
const SAVED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A saved point of interest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    /// Session-unique id (creation epoch-ms, bumped on collision).
    pub id: i64,
    /// User-facing name.
    pub name: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Creation time as a display string.
    #[serde(rename = "timestamp")]
    pub saved_at: String,
    /// Optional free-form note.
    #[serde(default)]
    pub note: Option<String>,
}

impl Bookmark {
    /// The bookmarked position.
    pub fn position(&self) -> LatLon {
        LatLon::new_unchecked(self.latitude, self.longitude)
    }
}

/// Owned collection of bookmarks with session-unique ids.
#[derive(Debug, Clone, Default)]
pub struct BookmarkList {
    bookmarks: Vec<Bookmark>,
    next_seq: u32,
    last_id: i64,
}

impl BookmarkList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            bookmarks: Vec::new(),
            next_seq: 1,
            last_id: 0,
        }
    }

    /// Rebuild a list from persisted bookmarks.
    ///
    /// The auto-name counter resumes after the loaded entries so new names
    /// keep the sequence going.
    pub fn from_bookmarks(bookmarks: Vec<Bookmark>) -> Self {
        let last_id = bookmarks.iter().map(|b| b.id).max().unwrap_or(0);
        let next_seq = bookmarks.len() as u32 + 1;
        Self {
            bookmarks,
            next_seq,
            last_id,
        }
    }

    /// Save the position of `reading` as a new bookmark named
    /// "Bookmark N".
    pub fn add_from_reading(&mut self, reading: &LocationReading) -> &Bookmark {
        let id = self.next_id();
        let name = format!("Bookmark {}", self.next_seq);
        self.next_seq += 1;

        self.bookmarks.push(Bookmark {
            id,
            name,
            latitude: reading.latitude,
            longitude: reading.longitude,
            saved_at: Local::now().format(SAVED_AT_FORMAT).to_string(),
            note: None,
        });
        self.bookmarks.last().expect("bookmark was just pushed")
    }

    /// Delete a bookmark by id. Absent ids are a no-op.
    ///
    /// Returns whether a bookmark was removed.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.bookmarks.len();
        self.bookmarks.retain(|b| b.id != id);
        self.bookmarks.len() != before
    }

    /// Look up a bookmark by id.
    pub fn get(&self, id: i64) -> Option<&Bookmark> {
        self.bookmarks.iter().find(|b| b.id == id)
    }

    /// Iterate bookmarks in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Bookmark> {
        self.bookmarks.iter()
    }

    /// Number of bookmarks.
    pub fn len(&self) -> usize {
        self.bookmarks.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.bookmarks.is_empty()
    }

    /// Snapshot for persistence.
    pub fn to_vec(&self) -> Vec<Bookmark> {
        self.bookmarks.clone()
    }

    fn next_id(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        let id = if now > self.last_id { now } else { self.last_id + 1 };
        self.last_id = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(lat: f64, lon: f64) -> LocationReading {
        LocationReading::new(lat, lon, 1_700_000_000_000)
    }

    #[test]
    fn test_sequential_auto_names() {
        let mut list = BookmarkList::new();
        let first = list.add_from_reading(&fix(1.0, 2.0)).name.clone();
        let second = list.add_from_reading(&fix(3.0, 4.0)).name.clone();

        assert_eq!(first, "Bookmark 1");
        assert_eq!(second, "Bookmark 2");
    }

    #[test]
    fn test_name_sequence_survives_deletion() {
        let mut list = BookmarkList::new();
        let id = list.add_from_reading(&fix(1.0, 2.0)).id;
        list.add_from_reading(&fix(3.0, 4.0));
        list.remove(id);

        // The counter keeps running; names are not reused.
        let name = list.add_from_reading(&fix(5.0, 6.0)).name.clone();
        assert_eq!(name, "Bookmark 3");
    }

    #[test]
    fn test_ids_unique() {
        let mut list = BookmarkList::new();
        let ids: Vec<i64> = (0..20)
            .map(|_| list.add_from_reading(&fix(1.0, 2.0)).id)
            .collect();

        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut list = BookmarkList::new();
        list.add_from_reading(&fix(1.0, 2.0));

        assert!(!list.remove(-1));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_duplicate_coordinates_allowed() {
        let mut list = BookmarkList::new();
        list.add_from_reading(&fix(1.0, 2.0));
        list.add_from_reading(&fix(1.0, 2.0));
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_from_bookmarks_resumes_sequence() {
        let mut list = BookmarkList::from_bookmarks(vec![Bookmark {
            id: 7,
            name: "Bookmark 1".to_string(),
            latitude: 1.0,
            longitude: 2.0,
            saved_at: "2024-05-01 12:00:00".to_string(),
            note: None,
        }]);

        let name = list.add_from_reading(&fix(3.0, 4.0)).name.clone();
        assert_eq!(name, "Bookmark 2");
    }

    #[test]
    fn test_serde_uses_timestamp_key_for_display_string() {
        let bookmark = Bookmark {
            id: 1,
            name: "Bookmark 1".to_string(),
            latitude: 1.0,
            longitude: 2.0,
            saved_at: "2024-05-01 12:00:00".to_string(),
            note: Some("pier".to_string()),
        };
        let json = serde_json::to_value(&bookmark).unwrap();
        assert_eq!(json["timestamp"], "2024-05-01 12:00:00");
        assert_eq!(json["note"], "pier");
    }
}
