//! GeoTrail - personal location viewer core.
//!
//! This library provides the domain logic for a live location viewer:
//! acquiring position fixes from a sensor backend, keeping a bounded trail
//! history and user bookmarks, persisting them as a single durable record,
//! and modelling the map and UI state that front-ends render.
//!
//! The `geotrail-cli` crate provides the terminal front-end.

pub mod app;
pub mod bookmarks;
pub mod controller;
pub mod geo;
pub mod history;
pub mod location;
pub mod map;
pub mod share;
pub mod state;
pub mod store;
pub mod ui;

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
