//! The sensor trait seam and the location service built on it.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::gpsd::{GpsdSensor, DEFAULT_GPSD_ADDR};
use super::reading::{FixOptions, LocationError, LocationReading};
use super::replay::ReplaySensor;

/// Default interval between watch deliveries.
const DEFAULT_WATCH_INTERVAL: Duration = Duration::from_secs(1);

/// Capacity of the watch event channel.
///
/// Fixes arrive at ~1 Hz; a small buffer absorbs a slow consumer without
/// growing unbounded.
const WATCH_CHANNEL_CAPACITY: usize = 16;

/// A backend that can produce position fixes.
///
/// One `acquire` call yields one fix (or an error). Backends must respect
/// `FixOptions::max_cached_age`: with a zero window only a fresh fix may be
/// returned.
pub trait PositionSensor: Send + Sync + 'static {
    /// Acquire a single fix.
    fn acquire(
        &self,
        options: FixOptions,
    ) -> impl Future<Output = Result<LocationReading, LocationError>> + Send;
}

/// A sensor that always reports `Unsupported`.
///
/// Stands in when no position source is configured, so the rest of the
/// application can run and show the unsupported-sensor error panel.
#[derive(Debug, Default)]
pub struct UnsupportedSensor;

impl PositionSensor for UnsupportedSensor {
    async fn acquire(&self, _options: FixOptions) -> Result<LocationReading, LocationError> {
        Err(LocationError::Unsupported)
    }
}

/// Which backend to construct.
#[derive(Debug, Clone, PartialEq)]
pub enum SensorConfig {
    /// Connect to a gpsd daemon at the given address.
    Gpsd { addr: String },
    /// Play back a JSON-lines track file.
    Replay { path: PathBuf },
    /// No position source available.
    Unsupported,
}

impl Default for SensorConfig {
    fn default() -> Self {
        SensorConfig::Gpsd {
            addr: DEFAULT_GPSD_ADDR.to_string(),
        }
    }
}

/// Runtime-selected sensor backend.
pub enum AnySensor {
    Gpsd(GpsdSensor),
    Replay(ReplaySensor),
    Unsupported(UnsupportedSensor),
}

impl AnySensor {
    /// Construct the backend described by `config`.
    ///
    /// A replay file that cannot be read maps to `Unavailable`.
    pub fn from_config(config: &SensorConfig) -> Result<Self, LocationError> {
        match config {
            SensorConfig::Gpsd { addr } => Ok(AnySensor::Gpsd(GpsdSensor::new(addr.clone()))),
            SensorConfig::Replay { path } => Ok(AnySensor::Replay(ReplaySensor::open(path)?)),
            SensorConfig::Unsupported => Ok(AnySensor::Unsupported(UnsupportedSensor)),
        }
    }
}

impl PositionSensor for AnySensor {
    async fn acquire(&self, options: FixOptions) -> Result<LocationReading, LocationError> {
        match self {
            AnySensor::Gpsd(s) => s.acquire(options).await,
            AnySensor::Replay(s) => s.acquire(options).await,
            AnySensor::Unsupported(s) => s.acquire(options).await,
        }
    }
}

/// An event delivered by a watch subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum WatchEvent {
    /// A new fix.
    Reading(LocationReading),
    /// A transient acquisition failure. The subscription keeps running.
    Error(LocationError),
}

/// A standing subscription delivering fixes until cancelled.
pub struct WatchSubscription {
    events: mpsc::Receiver<WatchEvent>,
    cancel: CancellationToken,
}

impl WatchSubscription {
    /// Receive the next event. Returns `None` after cancellation.
    pub async fn recv(&mut self) -> Option<WatchEvent> {
        self.events.recv().await
    }

    /// Receive without waiting. For front-ends polling from a sync loop.
    pub fn try_recv(&mut self) -> Option<WatchEvent> {
        self.events.try_recv().ok()
    }

    /// Cancel the subscription. The background task stops at the next tick.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }
}

impl Drop for WatchSubscription {
    fn drop(&mut self) {
        // Scoped release: dropping the handle tears down the watch task.
        self.cancel.cancel();
    }
}

/// Wraps a sensor backend with one-shot and continuous-watch semantics.
pub struct LocationService<S> {
    sensor: Arc<S>,
    one_shot: FixOptions,
    watch: FixOptions,
    watch_interval: Duration,
}

impl<S: PositionSensor> LocationService<S> {
    /// Create a service with the default fix options.
    pub fn new(sensor: S) -> Self {
        Self {
            sensor: Arc::new(sensor),
            one_shot: FixOptions::one_shot(),
            watch: FixOptions::watch(),
            watch_interval: DEFAULT_WATCH_INTERVAL,
        }
    }

    /// Override the one-shot fix options.
    pub fn with_one_shot_options(mut self, options: FixOptions) -> Self {
        self.one_shot = options;
        self
    }

    /// Override the watch fix options.
    pub fn with_watch_options(mut self, options: FixOptions) -> Self {
        self.watch = options;
        self
    }

    /// Override the interval between watch deliveries.
    pub fn with_watch_interval(mut self, interval: Duration) -> Self {
        self.watch_interval = interval;
        self
    }

    /// Acquire one fresh fix, failing with `Timeout` at the deadline.
    ///
    /// A caller issuing a new request while one is outstanding simply gets a
    /// second independent acquisition; the earlier one is not cancelled. The
    /// UI layer decides what to display meanwhile.
    pub async fn request_once(&self) -> Result<LocationReading, LocationError> {
        let options = self.one_shot;
        match tokio::time::timeout(options.timeout, self.sensor.acquire(options)).await {
            Ok(result) => result,
            Err(_) => Err(LocationError::Timeout),
        }
    }

    /// Start a continuous watch.
    ///
    /// Fixes and transient errors are delivered as `WatchEvent`s. Errors do
    /// not end the subscription; only `cancel` (or dropping the handle) does.
    pub fn watch(&self) -> WatchSubscription {
        let (tx, rx) = mpsc::channel(WATCH_CHANNEL_CAPACITY);
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();
        let sensor = Arc::clone(&self.sensor);
        let options = self.watch;
        let interval = self.watch_interval;

        tokio::spawn(async move {
            loop {
                let acquisition = tokio::time::timeout(options.timeout, sensor.acquire(options));
                let event = tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    result = acquisition => match result {
                        Ok(Ok(reading)) => WatchEvent::Reading(reading),
                        Ok(Err(e)) => WatchEvent::Error(e),
                        Err(_) => WatchEvent::Error(LocationError::Timeout),
                    },
                };

                if let WatchEvent::Error(ref e) = event {
                    // Keep watching even when a fix fails.
                    warn!(error = %e, "watch fix failed, subscription continues");
                }

                if tx.send(event).await.is_err() {
                    debug!("watch channel closed, stopping subscription");
                    break;
                }

                tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
        });

        WatchSubscription { events: rx, cancel }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Scripted sensor for tests: pops pre-planned results in order,
    /// repeating the last one when the script runs out.
    pub struct MockSensor {
        script: Mutex<Vec<Result<LocationReading, LocationError>>>,
        delay: Duration,
    }

    impl MockSensor {
        pub fn new(script: Vec<Result<LocationReading, LocationError>>) -> Self {
            Self {
                script: Mutex::new(script),
                delay: Duration::ZERO,
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    impl PositionSensor for MockSensor {
        async fn acquire(&self, _options: FixOptions) -> Result<LocationReading, LocationError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let mut script = self.script.lock().unwrap();
            if script.len() > 1 {
                script.remove(0)
            } else {
                script
                    .first()
                    .cloned()
                    .unwrap_or(Err(LocationError::Unavailable))
            }
        }
    }

    fn fix(lat: f64, lon: f64) -> LocationReading {
        LocationReading::new(lat, lon, 1_700_000_000_000).with_accuracy(15.0)
    }

    #[tokio::test]
    async fn test_request_once_success() {
        let service = LocationService::new(MockSensor::new(vec![Ok(fix(37.0, -122.0))]));
        let reading = service.request_once().await.unwrap();
        assert!((reading.latitude - 37.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_request_once_propagates_error_kind() {
        let service =
            LocationService::new(MockSensor::new(vec![Err(LocationError::PermissionDenied)]));
        assert_eq!(
            service.request_once().await,
            Err(LocationError::PermissionDenied)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_request_once_times_out() {
        let sensor = MockSensor::new(vec![Ok(fix(0.0, 0.0))]).with_delay(Duration::from_secs(60));
        let service = LocationService::new(sensor)
            .with_one_shot_options(FixOptions::one_shot().with_timeout(Duration::from_secs(10)));

        assert_eq!(service.request_once().await, Err(LocationError::Timeout));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_survives_transient_errors() {
        let sensor = MockSensor::new(vec![
            Ok(fix(1.0, 1.0)),
            Err(LocationError::Unavailable),
            Ok(fix(2.0, 2.0)),
        ]);
        let service =
            LocationService::new(sensor).with_watch_interval(Duration::from_millis(10));

        let mut sub = service.watch();
        assert!(matches!(sub.recv().await, Some(WatchEvent::Reading(_))));
        assert_eq!(
            sub.recv().await,
            Some(WatchEvent::Error(LocationError::Unavailable))
        );
        // The error did not cancel the subscription.
        assert!(matches!(sub.recv().await, Some(WatchEvent::Reading(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watch_cancel_stops_delivery() {
        let service = LocationService::new(MockSensor::new(vec![Ok(fix(1.0, 1.0))]))
            .with_watch_interval(Duration::from_millis(10));

        let mut sub = service.watch();
        assert!(sub.recv().await.is_some());
        sub.cancel();
        // After cancellation the channel drains and closes.
        while let Some(_event) = sub.recv().await {}
    }

    #[tokio::test]
    async fn test_unsupported_sensor() {
        let service = LocationService::new(UnsupportedSensor);
        assert_eq!(service.request_once().await, Err(LocationError::Unsupported));
    }
}
