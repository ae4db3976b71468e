//! In-memory application state.
//!
//! `AppState` owns the current fix, the bounded trail history, the bookmark
//! list, and display preferences. All mutations are synchronous and leave
//! the state consistent regardless of what happens to persistence, which
//! is deliberately NOT wired in here: the controller saves explicitly after
//! each state-changing command, keeping this type unit-testable without a
//! storage backend.

use crate::bookmarks::BookmarkList;
use crate::history::TrailHistory;
use crate::location::LocationReading;
use crate::map::TileStyle;
use crate::store::PersistedRecord;

/// Display preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    /// Dark color scheme toggle. Defaults to light mode.
    pub dark_mode: bool,
    /// Active tile style. Defaults to the standard map.
    pub map_style: TileStyle,
}

/// The viewer's in-memory state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    current: Option<LocationReading>,
    history: TrailHistory,
    bookmarks: BookmarkList,
    prefs: Preferences,
}

impl AppState {
    /// Create an empty state with default preferences.
    pub fn new() -> Self {
        Self {
            current: None,
            history: TrailHistory::new(),
            bookmarks: BookmarkList::new(),
            prefs: Preferences::default(),
        }
    }

    /// Reconstruct state from the persisted record.
    ///
    /// Legacy records stored waypoints separately from bookmarks; both are
    /// merged into the bookmark list, waypoints first.
    pub fn from_record(record: PersistedRecord) -> Self {
        let mut saved = record.waypoints;
        saved.extend(record.bookmarks);

        Self {
            current: None,
            history: TrailHistory::from_entries(record.location_history),
            bookmarks: BookmarkList::from_bookmarks(saved),
            prefs: Preferences {
                dark_mode: record.dark_mode,
                map_style: record.map_style,
            },
        }
    }

    /// Snapshot the durable subset for persistence.
    pub fn to_record(&self) -> PersistedRecord {
        PersistedRecord {
            location_history: self.history.to_vec(),
            waypoints: Vec::new(),
            bookmarks: self.bookmarks.to_vec(),
            dark_mode: self.prefs.dark_mode,
            map_style: self.prefs.map_style,
        }
    }

    /// Accept a new fix: becomes the current reading and joins the history.
    pub fn apply_reading(&mut self, reading: LocationReading) {
        self.history.record(reading.clone());
        self.current = Some(reading);
    }

    /// Bookmark the current fix.
    ///
    /// Without a current reading this is a no-op and returns `None`;
    /// otherwise the new bookmark's id.
    pub fn add_bookmark(&mut self) -> Option<i64> {
        let reading = self.current.as_ref()?;
        Some(self.bookmarks.add_from_reading(reading).id)
    }

    /// Delete a bookmark by id; absent ids are a no-op.
    pub fn delete_bookmark(&mut self, id: i64) -> bool {
        self.bookmarks.remove(id)
    }

    /// Empty the trail history. Confirmation is the caller's concern.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Toggle the dark mode preference, returning the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.prefs.dark_mode = !self.prefs.dark_mode;
        self.prefs.dark_mode
    }

    /// Set the map style preference.
    pub fn set_map_style(&mut self, style: TileStyle) {
        self.prefs.map_style = style;
    }

    pub fn current(&self) -> Option<&LocationReading> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &TrailHistory {
        &self.history
    }

    pub fn bookmarks(&self) -> &BookmarkList {
        &self.bookmarks
    }

    pub fn prefs(&self) -> Preferences {
        self.prefs
    }
}
