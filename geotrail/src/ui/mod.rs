//! UI model shared by front-ends.
//!
//! The UI is a small state machine over four modes (loading, error, info,
//! idle) plus view-models that format readings and bookmarks for display.
//! Front-ends render from these types; they never format sensor data
//! themselves.

mod command;
mod mode;
mod panel;

pub use command::Command;
pub use mode::UiMode;
pub use panel::{BookmarkRow, InfoPanel};
