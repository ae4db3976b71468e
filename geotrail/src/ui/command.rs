//! Typed UI commands.
//!
//! Every user action is a `Command` dispatched to the controller, keeping
//! the event flow explicit (UI event, typed action, state update, render)
//! and independent of any particular front-end toolkit.

use crate::map::TileStyle;

/// A user action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Request a fresh fix.
    Refresh,
    /// Retry after an error. Same behavior as `Refresh`; kept separate for
    /// front-ends with a dedicated retry control on the error panel. The
    /// terminal dashboard folds retry into the refresh key.
    Retry,
    /// Copy the current coordinates to the clipboard.
    CopyCoordinates,
    /// Share a map link to the current position.
    ShareLocation,
    /// Bookmark the current position.
    AddBookmark,
    /// Delete a bookmark by id.
    DeleteBookmark(i64),
    /// Center the map on a bookmark.
    GoToBookmark(i64),
    /// Empty the trail history.
    ClearHistory,
    /// Toggle the dark color scheme.
    ToggleDarkMode,
    /// Switch the tile provider.
    SetMapStyle(TileStyle),
}
