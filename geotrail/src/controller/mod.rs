//! The application controller.
//!
//! `AppController` is the explicit context object tying the pieces
//! together: it dispatches typed commands to state mutations, persists the
//! durable subset after every state-changing command, and keeps the map and
//! UI models in sync. There is no ambient singleton; front-ends own a
//! controller and hand it events.
//!
//! Persistence is an explicit side effect here, not something `AppState`
//! does internally, and a failed save never breaks the in-memory state:
//! it is logged and the session continues.

use tracing::{info, warn};

use crate::geo;
use crate::location::{LocationError, LocationReading};
use crate::map::{MapView, FIX_ZOOM};
use crate::share::ShareSurface;
use crate::state::AppState;
use crate::store::Store;
use crate::ui::{BookmarkRow, Command, InfoPanel, UiMode};

/// What the front-end must do after a dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Nothing to do.
    None,
    /// Start a sensor fetch and feed the result back through
    /// `on_reading` / `on_fetch_error`.
    StartFetch,
    /// Show a transient notification.
    Notify(String),
    /// Clipboard unavailable: show this text for manual copying.
    ShowCopyText(String),
}

/// Explicit application context: state, map, persistence, share surface.
pub struct AppController<S: ShareSurface> {
    state: AppState,
    map: MapView,
    store: Store,
    share: S,
    mode: UiMode,
    bookmark_rows: Vec<BookmarkRow>,
}

impl<S: ShareSurface> AppController<S> {
    /// Restore a controller from the persisted record.
    ///
    /// The map picks up the persisted style and trail; the UI starts in
    /// Loading since the front-end fetches immediately.
    pub fn bootstrap(store: Store, share: S) -> Self {
        let state = AppState::from_record(store.load());
        let mut map = MapView::new(state.prefs().map_style);
        map.set_trail(state.history());

        let bookmark_rows = BookmarkRow::build_list(state.bookmarks().iter());
        info!(
            history = state.history().len(),
            bookmarks = state.bookmarks().len(),
            "restored persisted state"
        );

        Self {
            state,
            map,
            store,
            share,
            mode: UiMode::default(),
            bookmark_rows,
        }
    }

    /// Dispatch a user command.
    pub fn dispatch(&mut self, command: Command) -> Effect {
        match command {
            Command::Refresh | Command::Retry => {
                // A fetch may already be outstanding; starting another only
                // changes what the UI shows, it cancels nothing.
                self.mode.fetch_started();
                Effect::StartFetch
            }

            Command::CopyCoordinates => match self.state.current() {
                Some(reading) => {
                    let text = geo::format_coords(reading.position());
                    if self.share.copy_text(&text) {
                        Effect::Notify("Coordinates copied!".to_string())
                    } else {
                        // Manual-selection fallback.
                        Effect::ShowCopyText(text)
                    }
                }
                None => Effect::None,
            },

            Command::ShareLocation => match self.state.current() {
                Some(reading) => {
                    let url = geo::map_link(reading.position());
                    if self.share.open_share(&url) {
                        Effect::Notify("Location shared".to_string())
                    } else if self.share.copy_text(&url) {
                        Effect::Notify("Share link copied!".to_string())
                    } else {
                        Effect::ShowCopyText(url)
                    }
                }
                None => Effect::None,
            },

            Command::AddBookmark => match self.state.add_bookmark() {
                Some(_id) => {
                    self.persist();
                    self.rebuild_bookmark_rows();
                    Effect::Notify("Bookmark added".to_string())
                }
                // No current fix: adding a bookmark is a no-op.
                None => Effect::None,
            },

            Command::DeleteBookmark(id) => {
                if self.state.delete_bookmark(id) {
                    self.persist();
                    self.rebuild_bookmark_rows();
                }
                Effect::None
            }

            Command::GoToBookmark(id) => {
                if let Some(bookmark) = self.state.bookmarks().get(id) {
                    self.map.pan_to(bookmark.position(), FIX_ZOOM);
                }
                Effect::None
            }

            Command::ClearHistory => {
                self.state.clear_history();
                // Detach the trail immediately.
                self.map.set_trail(self.state.history());
                self.persist();
                Effect::Notify("History cleared".to_string())
            }

            Command::ToggleDarkMode => {
                let dark = self.state.toggle_dark_mode();
                self.persist();
                Effect::Notify(if dark {
                    "Dark mode on".to_string()
                } else {
                    "Dark mode off".to_string()
                })
            }

            Command::SetMapStyle(style) => {
                self.state.set_map_style(style);
                self.map.set_tile_style(style);
                self.persist();
                Effect::Notify(format!("Map style: {}", style.name()))
            }
        }
    }

    /// A fetch delivered a fix: update state, persist, re-render map and UI.
    pub fn on_reading(&mut self, reading: LocationReading) {
        self.state.apply_reading(reading.clone());
        self.persist();
        self.map.set_reading(&reading);
        self.map.set_trail(self.state.history());
        self.mode.fetch_succeeded(reading);
    }

    /// A one-shot fetch failed: show the error panel.
    pub fn on_fetch_error(&mut self, error: &LocationError) {
        self.mode.fetch_failed(error);
    }

    /// A watch fix failed. Logged only; the UI keeps the last known fix.
    pub fn on_watch_error(&self, error: &LocationError) {
        warn!(error = %error, "continuous watch error");
    }

    /// Persist the durable subset. Failure is non-fatal and logged.
    fn persist(&self) {
        if let Err(e) = self.store.save(&self.state.to_record()) {
            warn!(error = %e, "failed to persist state, continuing");
        }
    }

    /// Rebuild the full bookmark list view. Called on every bookmark
    /// mutation.
    fn rebuild_bookmark_rows(&mut self) {
        self.bookmark_rows = BookmarkRow::build_list(self.state.bookmarks().iter());
    }

    pub fn mode(&self) -> &UiMode {
        &self.mode
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn map(&self) -> &MapView {
        &self.map
    }

    /// The rendered bookmark list rows.
    pub fn bookmark_rows(&self) -> &[BookmarkRow] {
        &self.bookmark_rows
    }

    /// The info panel for the current mode, when a fix is shown.
    pub fn info_panel(&self) -> Option<InfoPanel> {
        self.mode.reading().map(InfoPanel::from_reading)
    }
}
