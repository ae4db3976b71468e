//! Snapshot command: render the persisted state to a PNG.

use std::path::PathBuf;

use geotrail::app::{AppConfig, AppError};
use geotrail::map::{render_to_file, MapView, TileStyle};
use geotrail::state::AppState;

use crate::error::CliError;

/// Run the snapshot command.
///
/// Renders from the persisted record without touching the sensor: the
/// latest recorded fix becomes the marker, the trail is drawn from
/// history, and with no history at all the image is the world view.
pub fn run(config: AppConfig, output: PathBuf, style: Option<String>) -> Result<(), CliError> {
    let state = AppState::from_record(config.store().load());

    let mut view = MapView::new(state.prefs().map_style);
    if let Some(name) = style {
        let style = TileStyle::from_name(&name)
            .ok_or_else(|| AppError::Config(format!("unknown map style '{}'", name)))?;
        view.set_tile_style(style);
    }

    if let Some(entry) = state.history().latest() {
        let reading = entry.reading.clone();
        view.set_reading(&reading);
    }
    view.set_trail(state.history());

    render_to_file(&view, &config.snapshot, &output).map_err(AppError::Map)?;

    println!(
        "Wrote {} ({}x{}, {} tiles, {} trail points)",
        output.display(),
        config.snapshot.width,
        config.snapshot.height,
        view.style().name(),
        view.trail().map_or(0, |t| t.points.len()),
    );
    println!("Map data: {}", view.attribution());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_unknown_style_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::new().with_data_file(dir.path().join("state.json"));

        let err = run(config, dir.path().join("map.png"), Some("plasma".to_string()))
            .unwrap_err();
        assert!(matches!(err, CliError::App(AppError::Config(_))));
        assert!(err.to_string().contains("plasma"));
    }
}
