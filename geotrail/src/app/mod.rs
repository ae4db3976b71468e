//! Application configuration and bootstrap helpers.
//!
//! Front-ends build an `AppConfig`, initialize logging through
//! `logging::init`, and wire the controller and location service from it.
//! Keeping this in the library means every front-end boots identically.

mod config;
mod error;
pub mod logging;

pub use config::AppConfig;
pub use error::AppError;
