//! Watch command: continuous fixes, interactive when a terminal is attached.

use geotrail::app::AppConfig;
use geotrail::controller::AppController;
use geotrail::share::SystemShare;

use super::common;
use crate::error::CliError;
use crate::tui_app;

/// Run the watch command.
///
/// With a TTY on stdout this is the full dashboard; piped or redirected
/// it degrades to one line per fix.
pub fn run(config: AppConfig) -> Result<(), CliError> {
    tracing::info!(sensor = ?config.sensor, "starting watch");

    let runtime = common::build_runtime()?;
    let service = common::build_service(&config)?;
    let controller = AppController::bootstrap(config.store(), SystemShare::new());

    if atty::is(atty::Stream::Stdout) {
        tui_app::run_tui(&runtime, service, controller)
    } else {
        tui_app::run_headless(&runtime, service, controller)
    }
}
