//! Map model and rendering.
//!
//! `MapView` keeps the toolkit-independent map state: active tile style,
//! center and zoom, the position marker with its accuracy circle, and the
//! trail polyline. `render` composites that state into a PNG snapshot with
//! the `staticmap` tile library.
//!
//! Front-ends that cannot draw tiles (the TUI) still read `MapView` for the
//! center, zoom, and layer bookkeeping.

mod render;
mod style;
mod view;

pub use render::{render_to_file, MapError, SnapshotConfig};
pub use style::TileStyle;
pub use view::{AccuracyCircle, MapView, Marker, Trail, DEFAULT_ZOOM, FIX_ZOOM};
