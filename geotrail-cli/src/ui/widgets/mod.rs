//! Dashboard widgets.

mod bookmarks;
mod info;

pub use bookmarks::BookmarkListWidget;
pub use info::InfoWidget;
