//! CLI command implementations.

mod common;
pub mod locate;
pub mod snapshot;
pub mod watch;

pub use common::resolve_config;
