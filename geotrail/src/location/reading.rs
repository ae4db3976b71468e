//! Position fix types and the sensor error taxonomy.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geo::LatLon;

/// Timeout for a one-shot fix request.
const ONE_SHOT_TIMEOUT: Duration = Duration::from_secs(10);

/// Cache window tolerated by the continuous watch.
const WATCH_MAX_CACHED_AGE: Duration = Duration::from_secs(5);

/// One sensor-reported position fix.
///
/// Immutable once created. Optional fields are reported only when the
/// sensor provides them; the UI renders `N/A` for absent values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationReading {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Estimated position error in meters.
    #[serde(default)]
    pub accuracy: Option<f64>,
    /// Altitude in meters.
    #[serde(default)]
    pub altitude: Option<f64>,
    /// Heading in degrees [0, 360), 0 = north.
    #[serde(default)]
    pub heading: Option<f64>,
    /// Ground speed in meters per second.
    #[serde(default)]
    pub speed: Option<f64>,
    /// Fix time as epoch milliseconds.
    pub timestamp: i64,
}

impl LocationReading {
    /// Create a reading with only the mandatory fields set.
    pub fn new(latitude: f64, longitude: f64, timestamp: i64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy: None,
            altitude: None,
            heading: None,
            speed: None,
            timestamp,
        }
    }

    /// Set the estimated accuracy in meters.
    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.accuracy = Some(meters);
        self
    }

    /// Set the altitude in meters.
    pub fn with_altitude(mut self, meters: f64) -> Self {
        self.altitude = Some(meters);
        self
    }

    /// Set the heading in degrees, normalized to [0, 360).
    pub fn with_heading(mut self, degrees: f64) -> Self {
        self.heading = Some(degrees.rem_euclid(360.0));
        self
    }

    /// Set the ground speed in meters per second.
    pub fn with_speed(mut self, mps: f64) -> Self {
        self.speed = Some(mps);
        self
    }

    /// The position of this fix.
    pub fn position(&self) -> LatLon {
        LatLon::new_unchecked(self.latitude, self.longitude)
    }
}

/// Why a fix could not be acquired.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    /// The user or system denied access to the position source.
    #[error("location permission denied")]
    PermissionDenied,

    /// The position source exists but cannot produce a fix right now.
    #[error("location unavailable")]
    Unavailable,

    /// No fix arrived within the configured timeout.
    #[error("location request timed out")]
    Timeout,

    /// No position source exists on this system.
    #[error("location sensing unsupported")]
    Unsupported,
}

impl LocationError {
    /// Human-readable message for the error panel, keyed by error kind.
    pub fn user_message(&self) -> &'static str {
        match self {
            LocationError::PermissionDenied => {
                "Location permission denied. Please enable location access in your settings."
            }
            LocationError::Unavailable => {
                "Location information is unavailable. Please try again."
            }
            LocationError::Timeout => "Location request timed out. Please try again.",
            LocationError::Unsupported => "Location sensing is not supported on this system.",
        }
    }
}

/// Options for acquiring a fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixOptions {
    /// Request the highest accuracy the sensor offers.
    pub high_accuracy: bool,
    /// Hard deadline for the request.
    pub timeout: Duration,
    /// Maximum age of a cached fix the caller will accept.
    pub max_cached_age: Duration,
}

impl FixOptions {
    /// Options for a one-shot request: high accuracy, 10 s timeout, and a
    /// zero cache window so the sensor must produce a fresh fix.
    pub fn one_shot() -> Self {
        Self {
            high_accuracy: true,
            timeout: ONE_SHOT_TIMEOUT,
            max_cached_age: Duration::ZERO,
        }
    }

    /// Options for the continuous watch: tolerates a small cache window.
    pub fn watch() -> Self {
        Self {
            high_accuracy: true,
            timeout: ONE_SHOT_TIMEOUT,
            max_cached_age: WATCH_MAX_CACHED_AGE,
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
