//! Watch-mode application logic, separated from argument parsing.
//!
//! # Architecture
//!
//! - `run_tui()` - Interactive dashboard with event loop
//! - `run_headless()` - One line per fix for non-TTY environments
//!
//! The watch command acts as a thin front controller that builds the
//! location service and the app controller, then delegates here.
//!
//! The dashboard runs two fix sources side by side: the standing watch
//! (cached fixes accepted, errors log-only) and one-shot fetches spawned
//! for every refresh (fresh fix forced, errors reach the error panel).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::runtime::{Handle, Runtime};
use tokio::sync::mpsc;

use geotrail::controller::{AppController, Effect};
use geotrail::geo;
use geotrail::location::{
    AnySensor, LocationError, LocationReading, LocationService, WatchEvent,
};
use geotrail::share::{ShareSurface, SystemShare};
use geotrail::ui::Command;

use crate::error::CliError;
use crate::ui::{Dashboard, DashboardEvent, DashboardView};

/// How often a frame is drawn.
const TICK_RATE: Duration = Duration::from_millis(100);

/// How long one input poll blocks.
const INPUT_POLL: Duration = Duration::from_millis(50);

type FetchResult = Result<LocationReading, LocationError>;

/// Run the interactive dashboard until the user quits.
pub fn run_tui(
    runtime: &Runtime,
    service: LocationService<AnySensor>,
    mut controller: AppController<SystemShare>,
) -> Result<(), CliError> {
    let mut dashboard = Dashboard::new()?;
    let service = Arc::new(service);

    // The watch task lives on the runtime; this thread only polls it.
    let _guard = runtime.enter();
    let mut subscription = service.watch();
    let (fetch_tx, mut fetch_rx) = mpsc::unbounded_channel();

    // Initial fetch: the dashboard opens in Loading and resolves to the
    // info or error panel as soon as the one-shot completes.
    controller.dispatch(Command::Refresh);
    spawn_fetch(runtime.handle(), &service, &fetch_tx);

    let mut last_draw: Option<Instant> = None;
    loop {
        match dashboard.poll_event(INPUT_POLL)? {
            Some(DashboardEvent::Quit) => break,
            Some(DashboardEvent::Dispatch(command)) => {
                match controller.dispatch(command) {
                    // A refresh must force a fresh zero-cache fix and must
                    // be able to fail into the error panel; the standing
                    // watch does neither (cached fixes, log-only errors).
                    Effect::StartFetch => spawn_fetch(runtime.handle(), &service, &fetch_tx),
                    Effect::Notify(message) => dashboard.notify(message),
                    Effect::ShowCopyText(text) => {
                        dashboard.notify(format!("Copy manually: {}", text))
                    }
                    Effect::None => {}
                }
                dashboard.clamp_selection(controller.bookmark_rows().len());
            }
            Some(DashboardEvent::SelectNext) => {
                dashboard.select_next(controller.bookmark_rows().len())
            }
            Some(DashboardEvent::SelectPrev) => {
                dashboard.select_prev(controller.bookmark_rows().len())
            }
            Some(DashboardEvent::ActivateSelected) => {
                if let Some(id) = dashboard.selected_id(controller.bookmark_rows()) {
                    controller.dispatch(Command::GoToBookmark(id));
                }
            }
            Some(DashboardEvent::DeleteSelected) => {
                if let Some(id) = dashboard.selected_id(controller.bookmark_rows()) {
                    controller.dispatch(Command::DeleteBookmark(id));
                    dashboard.clamp_selection(controller.bookmark_rows().len());
                }
            }
            None => {}
        }

        // Feed completed one-shot fetches and watch deliveries back in.
        drain_fetch_results(&mut controller, &mut fetch_rx);
        while let Some(event) = subscription.try_recv() {
            match event {
                WatchEvent::Reading(reading) => controller.on_reading(reading),
                WatchEvent::Error(e) => controller.on_watch_error(&e),
            }
        }

        if last_draw.map_or(true, |t| t.elapsed() >= TICK_RATE) {
            let view = DashboardView {
                mode: controller.mode(),
                panel: controller.info_panel(),
                bookmarks: controller.bookmark_rows(),
                history_len: controller.state().history().len(),
                style_name: controller.map().style().name(),
                attribution: controller.map().attribution(),
                center: geo::format_coords(controller.map().center()),
                zoom: controller.map().zoom(),
                dark_mode: controller.state().prefs().dark_mode,
            };
            dashboard.draw(&view)?;
            last_draw = Some(Instant::now());
        }
    }

    subscription.cancel();
    Ok(())
}

/// Run one zero-cache fix in the background, reporting into the channel.
fn spawn_fetch(
    handle: &Handle,
    service: &Arc<LocationService<AnySensor>>,
    tx: &mpsc::UnboundedSender<FetchResult>,
) {
    let service = Arc::clone(service);
    let tx = tx.clone();
    handle.spawn(async move {
        let _ = tx.send(service.request_once().await);
    });
}

/// Feed completed fetches back into the controller.
///
/// Unlike watch errors, a failed one-shot goes through `on_fetch_error`
/// and therefore switches the dashboard to the error panel.
fn drain_fetch_results<S: ShareSurface>(
    controller: &mut AppController<S>,
    rx: &mut mpsc::UnboundedReceiver<FetchResult>,
) {
    while let Ok(result) = rx.try_recv() {
        match result {
            Ok(reading) => controller.on_reading(reading),
            Err(e) => controller.on_fetch_error(&e),
        }
    }
}

/// Run without a terminal UI: print each fix, stop on Ctrl+C.
pub fn run_headless(
    runtime: &Runtime,
    service: LocationService<AnySensor>,
    mut controller: AppController<SystemShare>,
) -> Result<(), CliError> {
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = Arc::clone(&shutdown);
    ctrlc::set_handler(move || shutdown_clone.store(true, Ordering::SeqCst))
        .map_err(|e| CliError::Config(format!("failed to set signal handler: {}", e)))?;

    println!("Watching position. Press Ctrl+C to stop.");

    let _guard = runtime.enter();
    let mut subscription = service.watch();

    while !shutdown.load(Ordering::SeqCst) {
        let event = runtime.block_on(async {
            tokio::time::timeout(Duration::from_millis(200), subscription.recv()).await
        });
        match event {
            Ok(Some(WatchEvent::Reading(reading))) => {
                let stamp = chrono::Local::now().format("%H:%M:%S");
                let coords = geo::format_coords(reading.position());
                match reading.accuracy {
                    Some(acc) => println!("{}  {}  \u{00b1}{:.0} m", stamp, coords, acc),
                    None => println!("{}  {}", stamp, coords),
                }
                controller.on_reading(reading);
            }
            Ok(Some(WatchEvent::Error(e))) => {
                controller.on_watch_error(&e);
                eprintln!("fix failed: {}", e);
            }
            // Channel closed: the watch task is gone, nothing more will come.
            Ok(None) => break,
            // Timed out waiting; loop around and re-check the shutdown flag.
            Err(_) => {}
        }
    }

    subscription.cancel();
    println!("Stopped. {} trail points recorded.", controller.state().history().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geotrail::location::SensorConfig;
    use geotrail::store::Store;
    use tempfile::TempDir;

    fn controller_in(dir: &TempDir) -> AppController<SystemShare> {
        AppController::bootstrap(Store::new(dir.path().join("state.json")), SystemShare::new())
    }

    async fn pump_until<F>(
        controller: &mut AppController<SystemShare>,
        rx: &mut mpsc::UnboundedReceiver<FetchResult>,
        done: F,
    ) where
        F: Fn(&AppController<SystemShare>) -> bool,
    {
        for _ in 0..100 {
            drain_fetch_results(controller, rx);
            if done(controller) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[tokio::test]
    async fn test_failed_refresh_reaches_error_panel_despite_watch_errors() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_in(&dir);
        let service = Arc::new(LocationService::new(
            AnySensor::from_config(&SensorConfig::Unsupported).unwrap(),
        ));
        let (tx, mut rx) = mpsc::unbounded_channel();

        controller.dispatch(Command::Refresh);
        spawn_fetch(&Handle::current(), &service, &tx);

        // Watch failures keep arriving while the one-shot is in flight;
        // on their own they never leave Loading.
        for _ in 0..5 {
            controller.on_watch_error(&LocationError::Unsupported);
        }
        assert!(controller.mode().is_loading());

        pump_until(&mut controller, &mut rx, |c| !c.mode().is_loading()).await;

        let message = controller
            .mode()
            .error_message()
            .expect("failing sensor must end in the error panel");
        assert!(message.contains("not supported"));
        assert!(controller.info_panel().is_none());
    }

    #[tokio::test]
    async fn test_successful_fetch_resolves_loading() {
        let dir = TempDir::new().unwrap();
        let mut controller = controller_in(&dir);

        let track = dir.path().join("track.jsonl");
        std::fs::write(
            &track,
            "{\"latitude\":37.0,\"longitude\":-122.0,\"timestamp\":0}\n",
        )
        .unwrap();
        let service = Arc::new(LocationService::new(
            AnySensor::from_config(&SensorConfig::Replay { path: track }).unwrap(),
        ));
        let (tx, mut rx) = mpsc::unbounded_channel();

        controller.dispatch(Command::Refresh);
        spawn_fetch(&Handle::current(), &service, &tx);

        pump_until(&mut controller, &mut rx, |c| !c.mode().is_loading()).await;

        let panel = controller.info_panel().expect("fix shown");
        assert_eq!(panel.coordinates, "37.000000, -122.000000");
    }
}
