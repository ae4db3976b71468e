//! Locate command: acquire one fix and print it.

use geotrail::app::AppConfig;
use geotrail::controller::AppController;
use geotrail::geo;
use geotrail::share::SystemShare;
use geotrail::ui::Command;

use super::common;
use crate::error::CliError;

/// Run the locate command.
///
/// The fix lands in the persisted trail like any other, so repeated
/// `locate` invocations build up history visible to `snapshot`.
pub fn run(config: AppConfig) -> Result<(), CliError> {
    let runtime = common::build_runtime()?;
    let service = common::build_service(&config)?;
    let mut controller = AppController::bootstrap(config.store(), SystemShare::new());

    controller.dispatch(Command::Refresh);
    match runtime.block_on(service.request_once()) {
        Ok(reading) => controller.on_reading(reading),
        Err(e) => controller.on_fetch_error(&e),
    }

    let panel = match controller.info_panel() {
        Some(panel) => panel,
        None => {
            let message = controller
                .mode()
                .error_message()
                .unwrap_or("position unavailable")
                .to_string();
            return Err(CliError::NoFix(message));
        }
    };

    for (label, value) in panel.rows() {
        println!("{:<12} {}", label, value);
    }
    if let Some(reading) = controller.mode().reading() {
        println!("{:<12} {}", "Link", geo::map_link(reading.position()));
    }

    Ok(())
}
