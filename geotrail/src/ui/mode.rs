//! The display mode state machine.

use crate::location::{LocationError, LocationReading};

/// What the main panel currently shows.
///
/// Transitions:
/// - any fetch start moves to `Loading`
/// - a successful fix moves to `Info` (loading and error panels hidden)
/// - a failed fetch moves to `Error` (info panel hidden)
/// - the state before the first fetch is `Loading`
///
/// Continuous-watch errors intentionally do NOT transition the mode: the
/// last known fix stays displayed and the error is only logged.
#[derive(Debug, Clone, PartialEq)]
pub enum UiMode {
    /// Waiting for a fix.
    Loading,
    /// A fetch failed; holds the user-facing message.
    Error(String),
    /// Showing a fix.
    Info(LocationReading),
    /// Nothing in flight and nothing to show.
    Idle,
}

impl Default for UiMode {
    fn default() -> Self {
        // The app starts fetching immediately, so the initial mode is
        // Loading rather than Idle.
        UiMode::Loading
    }
}

impl UiMode {
    /// A fetch has started.
    pub fn fetch_started(&mut self) {
        *self = UiMode::Loading;
    }

    /// A fetch delivered a fix.
    pub fn fetch_succeeded(&mut self, reading: LocationReading) {
        *self = UiMode::Info(reading);
    }

    /// A fetch failed with a sensor error.
    pub fn fetch_failed(&mut self, error: &LocationError) {
        *self = UiMode::Error(error.user_message().to_string());
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, UiMode::Loading)
    }

    /// The reading shown by the info panel, when visible.
    pub fn reading(&self) -> Option<&LocationReading> {
        match self {
            UiMode::Info(reading) => Some(reading),
            _ => None,
        }
    }

    /// The error panel message, when visible.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            UiMode::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix() -> LocationReading {
        LocationReading::new(37.0, -122.0, 0)
    }

    #[test]
    fn test_initial_mode_is_loading() {
        assert!(UiMode::default().is_loading());
    }

    #[test]
    fn test_success_hides_loading_and_error() {
        let mut mode = UiMode::Error("boom".to_string());
        mode.fetch_started();
        assert!(mode.is_loading());

        mode.fetch_succeeded(fix());
        assert!(mode.reading().is_some());
        assert!(mode.error_message().is_none());
    }

    #[test]
    fn test_failure_hides_info() {
        let mut mode = UiMode::Info(fix());
        mode.fetch_started();
        mode.fetch_failed(&LocationError::PermissionDenied);

        assert!(mode.reading().is_none());
        assert!(mode
            .error_message()
            .unwrap()
            .contains("permission denied"));
    }

    #[test]
    fn test_error_message_keyed_by_kind() {
        let mut mode = UiMode::default();
        mode.fetch_failed(&LocationError::Timeout);
        assert!(mode.error_message().unwrap().contains("timed out"));

        mode.fetch_failed(&LocationError::Unavailable);
        assert!(mode.error_message().unwrap().contains("unavailable"));
    }
}
