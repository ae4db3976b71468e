//! Replay sensor backend.
//!
//! Plays back a JSON-lines track file, one reading per `acquire` call,
//! wrapping around at the end. Makes the viewer usable without a GPS
//! receiver and gives tests and demos a deterministic position source.
//!
//! # File format
//!
//! One JSON object per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! {"latitude":53.5511,"longitude":9.9937,"accuracy":12.0}
//! {"latitude":53.5513,"longitude":9.9941,"accuracy":9.5,"speed":1.4}
//! ```
//!
//! Timestamps in the file are ignored; each played reading is stamped with
//! the current time so it always counts as a fresh fix.

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;
use tracing::{debug, warn};

use super::reading::{FixOptions, LocationError, LocationReading};
use super::source::PositionSensor;

/// Sensor backend that replays a recorded track.
pub struct ReplaySensor {
    track: Vec<LocationReading>,
    cursor: Mutex<usize>,
}

impl ReplaySensor {
    /// Load a track file.
    ///
    /// Unreadable files and files without a single valid reading map to
    /// `Unavailable`; individual malformed lines are skipped.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LocationError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "cannot read replay track");
            LocationError::Unavailable
        })?;

        let mut track = Vec::new();
        for (number, line) in contents.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match serde_json::from_str::<LocationReading>(line) {
                Ok(reading) => track.push(reading),
                Err(e) => debug!(line = number + 1, error = %e, "skipping malformed track line"),
            }
        }

        if track.is_empty() {
            warn!(path = %path.display(), "replay track contains no readings");
            return Err(LocationError::Unavailable);
        }

        Ok(Self {
            track,
            cursor: Mutex::new(0),
        })
    }

    /// Number of readings in the track.
    pub fn len(&self) -> usize {
        self.track.len()
    }

    /// Whether the track is empty. Never true for an opened sensor.
    pub fn is_empty(&self) -> bool {
        self.track.is_empty()
    }
}

impl PositionSensor for ReplaySensor {
    async fn acquire(&self, _options: FixOptions) -> Result<LocationReading, LocationError> {
        let index = {
            let mut cursor = self.cursor.lock().unwrap();
            let index = *cursor;
            *cursor = (index + 1) % self.track.len();
            index
        };

        let mut reading = self.track[index].clone();
        reading.timestamp = Utc::now().timestamp_millis();
        Ok(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn track_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_replay_cycles_through_track() {
        let file = track_file(
            "{\"latitude\":1.0,\"longitude\":10.0,\"timestamp\":0}\n\
             {\"latitude\":2.0,\"longitude\":20.0,\"timestamp\":0}\n",
        );
        let sensor = ReplaySensor::open(file.path()).unwrap();
        assert_eq!(sensor.len(), 2);

        let opts = FixOptions::one_shot();
        let first = sensor.acquire(opts).await.unwrap();
        let second = sensor.acquire(opts).await.unwrap();
        let third = sensor.acquire(opts).await.unwrap();

        assert!((first.latitude - 1.0).abs() < f64::EPSILON);
        assert!((second.latitude - 2.0).abs() < f64::EPSILON);
        // Wrapped around.
        assert!((third.latitude - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_replay_stamps_fresh_timestamps() {
        let file = track_file("{\"latitude\":1.0,\"longitude\":2.0,\"timestamp\":1}\n");
        let sensor = ReplaySensor::open(file.path()).unwrap();

        let before = Utc::now().timestamp_millis();
        let reading = sensor.acquire(FixOptions::one_shot()).await.unwrap();
        assert!(reading.timestamp >= before);
    }

    #[test]
    fn test_skips_comments_and_malformed_lines() {
        let file = track_file(
            "# recorded 2024-05-01\n\
             \n\
             not json at all\n\
             {\"latitude\":1.0,\"longitude\":2.0,\"timestamp\":0}\n",
        );
        let sensor = ReplaySensor::open(file.path()).unwrap();
        assert_eq!(sensor.len(), 1);
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let result = ReplaySensor::open("/nonexistent/track.jsonl");
        assert!(matches!(result, Err(LocationError::Unavailable)));
    }

    #[test]
    fn test_empty_track_is_unavailable() {
        let file = track_file("# only comments\n");
        let result = ReplaySensor::open(file.path());
        assert!(matches!(result, Err(LocationError::Unavailable)));
    }
}
