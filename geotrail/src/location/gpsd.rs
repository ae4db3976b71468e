//! gpsd sensor backend.
//!
//! Connects to a gpsd daemon over TCP and reads its JSON stream. One
//! `acquire` call opens a connection, enables watch mode, and waits for the
//! first TPV (time-position-velocity) report carrying a usable fix.
//!
//! # Protocol
//!
//! gpsd speaks newline-delimited JSON on port 2947. After
//! `?WATCH={"enable":true,"json":true};` the daemon streams reports:
//!
//! - `{"class":"TPV","mode":3,"lat":53.55,"lon":9.99,...}` - a fix
//! - `{"class":"DEVICES","devices":[]}` - attached receivers
//! - `{"class":"ERROR","message":"..."}` - protocol errors
//!
//! `mode` < 2 means no fix yet; such reports are skipped.

use std::io;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, trace};

use super::reading::{FixOptions, LocationError, LocationReading};
use super::source::PositionSensor;

/// Default gpsd address.
pub const DEFAULT_GPSD_ADDR: &str = "127.0.0.1:2947";

/// Command enabling the JSON watch stream.
const WATCH_ENABLE: &str = "?WATCH={\"enable\":true,\"json\":true};\n";

/// Slack added to the cache-age check to absorb clock skew between the
/// receiver and this host.
const CACHE_AGE_SLACK: Duration = Duration::from_secs(1);

/// Sensor backend reading fixes from a gpsd daemon.
#[derive(Debug, Clone)]
pub struct GpsdSensor {
    addr: String,
}

impl Default for GpsdSensor {
    fn default() -> Self {
        Self::new(DEFAULT_GPSD_ADDR)
    }
}

impl GpsdSensor {
    /// Create a sensor for the daemon at `addr` (host:port).
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    /// The configured daemon address.
    pub fn addr(&self) -> &str {
        &self.addr
    }
}

impl PositionSensor for GpsdSensor {
    async fn acquire(&self, options: FixOptions) -> Result<LocationReading, LocationError> {
        let stream = TcpStream::connect(&self.addr)
            .await
            .map_err(map_io_error)?;
        let (read_half, mut write_half) = stream.into_split();

        write_half
            .write_all(WATCH_ENABLE.as_bytes())
            .await
            .map_err(map_io_error)?;

        let mut lines = BufReader::new(read_half).lines();
        loop {
            let line = match lines.next_line().await.map_err(map_io_error)? {
                Some(line) => line,
                // Daemon closed the stream before delivering a fix.
                None => return Err(LocationError::Unavailable),
            };
            trace!(line = %line, "gpsd report");

            let report: Value = match serde_json::from_str(&line) {
                Ok(v) => v,
                Err(e) => {
                    debug!(error = %e, "skipping unparseable gpsd line");
                    continue;
                }
            };

            match report["class"].as_str() {
                Some("TPV") => {
                    if let Some(reading) = parse_tpv(&report) {
                        if reading_is_fresh(&reading, options.max_cached_age) {
                            return Ok(reading);
                        }
                        debug!("skipping cached fix older than the accepted window");
                    }
                }
                Some("ERROR") => {
                    debug!(report = %report, "gpsd error report");
                    return Err(LocationError::Unavailable);
                }
                _ => {}
            }
        }
    }
}

/// Map socket errors into the sensor error taxonomy.
fn map_io_error(e: io::Error) -> LocationError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => LocationError::PermissionDenied,
        _ => LocationError::Unavailable,
    }
}

/// Check a fix against the caller's cache window.
///
/// Readings without a usable timestamp are treated as live data.
fn reading_is_fresh(reading: &LocationReading, max_cached_age: Duration) -> bool {
    if reading.timestamp <= 0 {
        return true;
    }
    let age_ms = Utc::now().timestamp_millis() - reading.timestamp;
    age_ms <= (max_cached_age + CACHE_AGE_SLACK).as_millis() as i64
}

/// Parse a TPV report into a reading.
///
/// Returns `None` when the report has no fix (`mode` < 2) or is missing
/// coordinates.
fn parse_tpv(report: &Value) -> Option<LocationReading> {
    let mode = report["mode"].as_i64().unwrap_or(0);
    if mode < 2 {
        return None;
    }

    let lat = report["lat"].as_f64()?;
    let lon = report["lon"].as_f64()?;

    let timestamp = report["time"]
        .as_str()
        .and_then(|t| DateTime::parse_from_rfc3339(t).ok())
        .map(|t| t.timestamp_millis())
        .unwrap_or_else(|| Utc::now().timestamp_millis());

    let mut reading = LocationReading::new(lat, lon, timestamp);

    // eph is the 2D position error estimate; fall back to the worse of the
    // per-axis estimates when it is absent.
    let accuracy = report["eph"].as_f64().or_else(|| {
        match (report["epx"].as_f64(), report["epy"].as_f64()) {
            (Some(x), Some(y)) => Some(x.max(y)),
            (Some(x), None) => Some(x),
            (None, Some(y)) => Some(y),
            (None, None) => None,
        }
    });
    if let Some(meters) = accuracy {
        reading = reading.with_accuracy(meters);
    }
    if let Some(alt) = report["altHAE"].as_f64().or_else(|| report["alt"].as_f64()) {
        reading = reading.with_altitude(alt);
    }
    if let Some(track) = report["track"].as_f64() {
        reading = reading.with_heading(track);
    }
    if let Some(speed) = report["speed"].as_f64() {
        reading = reading.with_speed(speed);
    }

    Some(reading)
}
