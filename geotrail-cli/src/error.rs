//! CLI error type.

use thiserror::Error;

use geotrail::app::AppError;

/// Errors surfaced to the terminal user.
#[derive(Debug, Error)]
pub enum CliError {
    /// A library-level failure during bootstrap or rendering.
    #[error("{0}")]
    App(#[from] AppError),

    /// Invalid flags or unusable configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// No fix could be acquired for a one-shot command.
    #[error("could not acquire a fix: {0}")]
    NoFix(String),

    /// Terminal or filesystem I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = CliError::Config("unknown map style 'mercator'".to_string());
        assert!(err.to_string().contains("mercator"));

        let err = CliError::NoFix("position unavailable".to_string());
        assert!(err.to_string().starts_with("could not acquire a fix"));
    }
}
