//! Position sensor abstraction.
//!
//! This module provides the seam between the application and whatever
//! delivers position fixes: a gpsd daemon, a replay file, or a mock in
//! tests. The `LocationService` wraps a backend with the one-shot and
//! continuous-watch semantics the UI expects.
//!
//! # Design
//!
//! - `PositionSensor` is the backend trait; one `acquire` call yields one fix
//! - `LocationService::request_once` forces a fresh, high-accuracy fix with a
//!   hard timeout
//! - `LocationService::watch` delivers fixes over a channel until cancelled;
//!   transient errors are reported but never end the subscription
//!
//! # Example
//!
//! ```ignore
//! use geotrail::location::{GpsdSensor, LocationService};
//!
//! let service = LocationService::new(GpsdSensor::default());
//! let reading = service.request_once().await?;
//! println!("{:.6}, {:.6}", reading.latitude, reading.longitude);
//! ```

mod gpsd;
mod reading;
mod replay;
mod source;

pub use gpsd::{GpsdSensor, DEFAULT_GPSD_ADDR};
pub use reading::{FixOptions, LocationError, LocationReading};
pub use replay::ReplaySensor;
pub use source::{
    AnySensor, LocationService, PositionSensor, SensorConfig, UnsupportedSensor, WatchEvent,
    WatchSubscription,
};

#[cfg(test)]
pub use source::tests::MockSensor;
