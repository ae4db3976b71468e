//! Top-level application configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::location::{FixOptions, SensorConfig};
use crate::map::SnapshotConfig;
use crate::store::Store;

/// Configuration for bootstrapping the viewer.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path of the persisted state record.
    pub data_file: PathBuf,

    /// Which sensor backend to use.
    pub sensor: SensorConfig,

    /// Fix options for one-shot requests (refresh/retry).
    pub one_shot: FixOptions,

    /// Fix options for the continuous watch.
    pub watch: FixOptions,

    /// Interval between watch deliveries.
    pub watch_interval: Duration,

    /// Snapshot rendering dimensions.
    pub snapshot: SnapshotConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: Store::default_path(),
            sensor: SensorConfig::default(),
            one_shot: FixOptions::one_shot(),
            watch: FixOptions::watch(),
            watch_interval: Duration::from_secs(1),
            snapshot: SnapshotConfig::default(),
        }
    }
}

impl AppConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the persisted record path.
    pub fn with_data_file(mut self, path: PathBuf) -> Self {
        self.data_file = path;
        self
    }

    /// Set the sensor backend.
    pub fn with_sensor(mut self, sensor: SensorConfig) -> Self {
        self.sensor = sensor;
        self
    }

    /// Set the watch delivery interval.
    pub fn with_watch_interval(mut self, interval: Duration) -> Self {
        self.watch_interval = interval;
        self
    }

    /// Set the snapshot dimensions.
    pub fn with_snapshot(mut self, snapshot: SnapshotConfig) -> Self {
        self.snapshot = snapshot;
        self
    }

    /// The store described by this config.
    pub fn store(&self) -> Store {
        Store::new(self.data_file.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::DEFAULT_GPSD_ADDR;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(
            config.sensor,
            SensorConfig::Gpsd {
                addr: DEFAULT_GPSD_ADDR.to_string()
            }
        );
        assert_eq!(config.one_shot.max_cached_age, Duration::ZERO);
        assert_eq!(config.watch.max_cached_age, Duration::from_secs(5));
        assert_eq!(config.watch_interval, Duration::from_secs(1));
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::new()
            .with_data_file(PathBuf::from("/tmp/geotrail.json"))
            .with_sensor(SensorConfig::Unsupported)
            .with_watch_interval(Duration::from_millis(250));

        assert_eq!(config.data_file, PathBuf::from("/tmp/geotrail.json"));
        assert_eq!(config.sensor, SensorConfig::Unsupported);
        assert_eq!(config.watch_interval, Duration::from_millis(250));
    }
}
