//! Integration tests for the command-dispatch flow.
//!
//! These tests verify the complete viewer flow including:
//! - sensor fetch -> controller -> state, map, and UI mode
//! - continuous watch with transient errors
//! - persistence across controller restarts
//!
//! Run with: `cargo test --test controller_integration`

use std::time::Duration;

use tempfile::TempDir;

use geotrail::controller::{AppController, Effect};
use geotrail::location::{
    FixOptions, LocationError, LocationReading, LocationService, PositionSensor, WatchEvent,
};
use geotrail::map::TileStyle;
use geotrail::share::ShareSurface;
use geotrail::store::Store;
use geotrail::ui::Command;

// ============================================================================
// Helpers
// ============================================================================

/// Sensor that plays a fixed script of results, repeating the last.
struct ScriptedSensor {
    script: std::sync::Mutex<Vec<Result<LocationReading, LocationError>>>,
}

impl ScriptedSensor {
    fn new(script: Vec<Result<LocationReading, LocationError>>) -> Self {
        Self {
            script: std::sync::Mutex::new(script),
        }
    }
}

impl PositionSensor for ScriptedSensor {
    async fn acquire(&self, _options: FixOptions) -> Result<LocationReading, LocationError> {
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

/// Share surface where everything works.
struct AlwaysShare;

impl ShareSurface for AlwaysShare {
    fn copy_text(&self, _text: &str) -> bool {
        true
    }
    fn open_share(&self, _url: &str) -> bool {
        true
    }
}

fn fix(lat: f64, lon: f64, accuracy: f64) -> LocationReading {
    LocationReading::new(lat, lon, 1_700_000_000_000).with_accuracy(accuracy)
}

fn controller(dir: &TempDir) -> AppController<AlwaysShare> {
    AppController::bootstrap(Store::new(dir.path().join("state.json")), AlwaysShare)
}

// ============================================================================
// Scenarios
// ============================================================================

/// A successful fix flows through to the displayed values: coordinates to
/// six decimals, accuracy to two, marker centered at zoom 16.
#[tokio::test]
async fn test_successful_fix_renders_expected_values() {
    let dir = TempDir::new().unwrap();
    let mut ctl = controller(&dir);
    let service = LocationService::new(ScriptedSensor::new(vec![Ok(fix(37.0, -122.0, 15.0))]));

    assert_eq!(ctl.dispatch(Command::Refresh), Effect::StartFetch);
    assert!(ctl.mode().is_loading());

    match service.request_once().await {
        Ok(reading) => ctl.on_reading(reading),
        Err(e) => ctl.on_fetch_error(&e),
    }

    let panel = ctl.info_panel().expect("info panel visible after a fix");
    assert_eq!(panel.coordinates, "37.000000, -122.000000");
    assert_eq!(panel.accuracy, "15.00 m");

    assert_eq!(ctl.map().zoom(), 16);
    let marker = ctl.map().marker().expect("marker placed");
    assert!((marker.position.lat - 37.0).abs() < f64::EPSILON);
    assert!((marker.position.lon - (-122.0)).abs() < f64::EPSILON);
}

/// A permission-denied fetch shows the error panel and hides the info panel.
#[tokio::test]
async fn test_permission_denied_shows_error_panel() {
    let dir = TempDir::new().unwrap();
    let mut ctl = controller(&dir);
    let service =
        LocationService::new(ScriptedSensor::new(vec![Err(LocationError::PermissionDenied)]));

    ctl.dispatch(Command::Refresh);
    match service.request_once().await {
        Ok(reading) => ctl.on_reading(reading),
        Err(e) => ctl.on_fetch_error(&e),
    }

    let message = ctl.mode().error_message().expect("error panel visible");
    assert!(message.contains("permission denied"));
    assert!(ctl.info_panel().is_none());
}

/// Bookmarking with no current reading is a no-op: no bookmark, no panic.
#[tokio::test]
async fn test_bookmark_without_fix_is_noop() {
    let dir = TempDir::new().unwrap();
    let mut ctl = controller(&dir);

    assert_eq!(ctl.dispatch(Command::AddBookmark), Effect::None);
    assert!(ctl.state().bookmarks().is_empty());
    assert!(ctl.bookmark_rows().is_empty());
}

/// The watch keeps delivering after a transient error, and the controller
/// keeps the last fix on screen through watch errors.
#[tokio::test]
async fn test_watch_flow_survives_errors() {
    let dir = TempDir::new().unwrap();
    let mut ctl = controller(&dir);
    let service = LocationService::new(ScriptedSensor::new(vec![
        Ok(fix(37.0, -122.0, 15.0)),
        Err(LocationError::Unavailable),
        Ok(fix(37.001, -122.001, 12.0)),
    ]))
    .with_watch_interval(Duration::from_millis(1));

    let mut sub = service.watch();
    for _ in 0..3 {
        match sub.recv().await.expect("watch delivers") {
            WatchEvent::Reading(reading) => ctl.on_reading(reading),
            WatchEvent::Error(e) => ctl.on_watch_error(&e),
        }
        // The info panel never disappears once a fix arrived.
        assert!(ctl.info_panel().is_some());
    }
    sub.cancel();

    assert_eq!(ctl.state().history().len(), 2);
    let panel = ctl.info_panel().unwrap();
    assert_eq!(panel.latitude, "37.001000");
}

/// State round-trips through the store: a fresh controller over the same
/// record restores history, bookmarks, and preferences.
#[tokio::test]
async fn test_state_survives_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut ctl = controller(&dir);
        ctl.on_reading(fix(37.0, -122.0, 15.0));
        ctl.on_reading(fix(37.001, -122.001, 12.0));
        ctl.dispatch(Command::AddBookmark);
        ctl.dispatch(Command::ToggleDarkMode);
        ctl.dispatch(Command::SetMapStyle(TileStyle::Terrain));
    }

    let restored = controller(&dir);
    assert_eq!(restored.state().history().len(), 2);
    assert_eq!(restored.state().bookmarks().len(), 1);
    assert!(restored.state().prefs().dark_mode);
    assert_eq!(restored.state().prefs().map_style, TileStyle::Terrain);
    // The restored trail is drawable right away.
    assert!(restored.map().trail().is_some());
    assert_eq!(restored.map().style(), TileStyle::Terrain);
}

/// History stays bounded at 100 entries across a long watch session.
#[tokio::test]
async fn test_history_bounded_during_long_session() {
    let dir = TempDir::new().unwrap();
    let mut ctl = controller(&dir);

    for n in 0..150 {
        ctl.on_reading(fix(f64::from(n) * 0.0001, 10.0, 5.0));
    }

    assert_eq!(ctl.state().history().len(), 100);
    let first = ctl.state().history().entries().next().unwrap();
    // Entries 50..150 survive.
    assert!((first.reading.latitude - 0.005).abs() < 1e-9);
    assert_eq!(ctl.map().trail().unwrap().points.len(), 100);
}
