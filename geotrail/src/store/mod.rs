//! Durable persistence of the viewer's state.
//!
//! The durable subset of `AppState` is saved as one JSON record with
//! whole-record overwrite semantics: no partial merges, no versioning, no
//! migration path. Loading never fails the caller; a missing, unreadable,
//! or corrupt record yields the default record field by field.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::bookmarks::Bookmark;
use crate::history::HistoryEntry;
use crate::map::TileStyle;

/// File name of the record within the data directory.
const RECORD_FILE_NAME: &str = "state.json";

/// Application directory under the platform data dir.
const APP_DIR_NAME: &str = "geotrail";

/// Failures while writing the record. Load never fails.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot write state record: {0}")]
    Io(#[from] io::Error),

    #[error("cannot serialize state record: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The single durable record.
///
/// Key names are fixed by the historical record shape; unknown keys in
/// stored data are ignored and missing keys default, so older and newer
/// records both load without migration. `waypoints` survives from a legacy
/// shape and is merged into bookmarks at load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedRecord {
    pub location_history: Vec<HistoryEntry>,
    pub waypoints: Vec<Bookmark>,
    pub bookmarks: Vec<Bookmark>,
    pub dark_mode: bool,
    pub map_style: TileStyle,
}

/// Loads and saves the persisted record at a fixed path.
#[derive(Debug, Clone)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Create a store backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default record path under the platform data directory, e.g.
    /// `~/.local/share/geotrail/state.json` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
            .join(RECORD_FILE_NAME)
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record, defaulting every field on missing or corrupt input.
    ///
    /// This never fails the caller: persistence problems degrade to a fresh
    /// default state, not an error.
    pub fn load(&self) -> PersistedRecord {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no persisted record, starting fresh");
                return PersistedRecord::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "cannot read persisted record");
                return PersistedRecord::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(record) => record,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt persisted record, using defaults");
                PersistedRecord::default()
            }
        }
    }

    /// Overwrite the whole record.
    ///
    /// Writes to a temporary file first and renames it into place so a crash
    /// mid-write cannot corrupt the previous record. Best-effort: callers
    /// log failures and continue.
    pub fn save(&self, record: &PersistedRecord) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(record)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
