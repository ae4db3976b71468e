//! Terminal UI for the watch dashboard.
//!
//! # Module Structure
//!
//! - `dashboard` - Terminal lifecycle, layout, and input handling
//! - `widgets` - Reusable UI widget components

pub mod dashboard;
pub mod widgets;

pub use dashboard::{Dashboard, DashboardEvent, DashboardView};
