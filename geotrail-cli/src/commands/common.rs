//! Shared command plumbing: flag resolution and service construction.

use std::path::PathBuf;

use geotrail::app::{AppConfig, AppError};
use geotrail::location::{AnySensor, LocationService, SensorConfig};

use crate::error::CliError;

/// Resolve the global flags into an `AppConfig`.
///
/// `--replay` wins over `--gpsd`; clap already rejects passing both.
pub fn resolve_config(
    gpsd: Option<String>,
    replay: Option<PathBuf>,
    data_file: Option<PathBuf>,
) -> AppConfig {
    let mut config = AppConfig::new();
    if let Some(addr) = gpsd {
        config = config.with_sensor(SensorConfig::Gpsd { addr });
    }
    if let Some(path) = replay {
        config = config.with_sensor(SensorConfig::Replay { path });
    }
    if let Some(path) = data_file {
        config = config.with_data_file(path);
    }
    config
}

/// Build the location service described by the config.
pub fn build_service(config: &AppConfig) -> Result<LocationService<AnySensor>, CliError> {
    let sensor = AnySensor::from_config(&config.sensor).map_err(AppError::Sensor)?;
    Ok(LocationService::new(sensor)
        .with_one_shot_options(config.one_shot)
        .with_watch_options(config.watch)
        .with_watch_interval(config.watch_interval))
}

/// Build the multi-threaded runtime commands block on.
pub fn build_runtime() -> Result<tokio::runtime::Runtime, CliError> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}
