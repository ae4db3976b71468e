//! Terminal lifecycle, layout, and input handling for the dashboard.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;

use geotrail::map::TileStyle;
use geotrail::ui::{BookmarkRow, Command, InfoPanel, UiMode};

use super::widgets::{BookmarkListWidget, InfoWidget};

/// How long a notification stays in the footer.
const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

const KEY_HELP: &str =
    "r refresh  c copy  s share  b bookmark  \u{2191}\u{2193} select  \u{23ce} go  del remove  x clear trail  d dark  1/2/3 style  q quit";

/// What the event loop should do with an input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DashboardEvent {
    /// Leave the dashboard.
    Quit,
    /// Dispatch this command to the controller.
    Dispatch(Command),
    /// Move the bookmark cursor down.
    SelectNext,
    /// Move the bookmark cursor up.
    SelectPrev,
    /// Center the map on the selected bookmark.
    ActivateSelected,
    /// Delete the selected bookmark.
    DeleteSelected,
}

/// Everything a single frame needs, assembled from the controller.
pub struct DashboardView<'a> {
    pub mode: &'a UiMode,
    pub panel: Option<InfoPanel>,
    pub bookmarks: &'a [BookmarkRow],
    pub history_len: usize,
    pub style_name: &'static str,
    pub attribution: &'static str,
    pub center: String,
    pub zoom: u8,
    pub dark_mode: bool,
}

/// Owns the terminal for the duration of the watch dashboard.
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    notification: Option<(String, Instant)>,
    selected: Option<usize>,
}

impl Dashboard {
    /// Take over the terminal: raw mode plus the alternate screen.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        crossterm::execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self {
            terminal,
            notification: None,
            selected: None,
        })
    }

    /// Show a transient footer notification.
    pub fn notify(&mut self, message: String) {
        self.notification = Some((message, Instant::now()));
    }

    /// Move the bookmark cursor down, clamped to the list.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(match self.selected {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        });
    }

    /// Move the bookmark cursor up, clamped to the list.
    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| i.saturating_sub(1)));
    }

    /// The id of the bookmark under the cursor.
    pub fn selected_id(&self, rows: &[BookmarkRow]) -> Option<i64> {
        self.selected.and_then(|i| rows.get(i)).map(|row| row.id)
    }

    /// Drop the cursor when the list shrank underneath it.
    pub fn clamp_selection(&mut self, len: usize) {
        match self.selected {
            Some(_) if len == 0 => self.selected = None,
            Some(i) if i >= len => self.selected = Some(len - 1),
            _ => {}
        }
    }

    /// Poll for one input event, waiting at most `timeout`.
    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<Option<DashboardEvent>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key(key)),
            _ => Ok(None),
        }
    }

    /// Draw one frame.
    pub fn draw(&mut self, view: &DashboardView) -> io::Result<()> {
        // Expire stale notifications before they hit the frame.
        if let Some((_, shown_at)) = &self.notification {
            if shown_at.elapsed() >= NOTIFICATION_TTL {
                self.notification = None;
            }
        }
        let notification = self.notification.as_ref().map(|(m, _)| m.clone());
        let selected = self.selected;

        self.terminal.draw(|frame| {
            let base = if view.dark_mode {
                Style::default().fg(Color::White).bg(Color::Black)
            } else {
                Style::default()
            };

            let outer = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1),
                    Constraint::Min(0),
                    Constraint::Length(2),
                ])
                .split(frame.area());

            let title = Line::from(vec![
                Span::styled("geotrail", Style::default().fg(Color::Cyan)),
                Span::raw(format!(
                    "  trail: {} points  mode: {}",
                    view.history_len,
                    if view.dark_mode { "dark" } else { "light" },
                )),
            ]);
            frame.render_widget(Paragraph::new(title).style(base), outer[0]);

            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(outer[1]);

            let left = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(9), Constraint::Length(5)])
                .split(body[0]);

            frame.render_widget(InfoWidget::new(view.mode, view.panel.as_ref()), left[0]);

            let map_lines = vec![
                Line::from(format!(
                    "Style: {}   Zoom: {}",
                    view.style_name, view.zoom
                )),
                Line::from(format!("Center: {}", view.center)),
                Line::from(Span::styled(
                    view.attribution,
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(
                Paragraph::new(map_lines)
                    .block(Block::default().borders(Borders::ALL).title("Map")),
                left[1],
            );

            frame.render_widget(BookmarkListWidget::new(view.bookmarks, selected), body[1]);

            let footer = vec![
                Line::from(Span::styled(KEY_HELP, Style::default().fg(Color::DarkGray))),
                match notification {
                    Some(message) => Line::from(Span::styled(
                        message,
                        Style::default().fg(Color::Green),
                    )),
                    None => Line::default(),
                },
            ];
            frame.render_widget(Paragraph::new(footer).style(base), outer[2]);
        })?;
        Ok(())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        // Best-effort restore; the process is exiting anyway.
        let _ = disable_raw_mode();
        let _ = crossterm::execute!(io::stdout(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Map a key press to a dashboard event.
fn map_key(key: KeyEvent) -> Option<DashboardEvent> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(DashboardEvent::Quit);
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(DashboardEvent::Quit),
        KeyCode::Char('r') => Some(DashboardEvent::Dispatch(Command::Refresh)),
        KeyCode::Char('c') => Some(DashboardEvent::Dispatch(Command::CopyCoordinates)),
        KeyCode::Char('s') => Some(DashboardEvent::Dispatch(Command::ShareLocation)),
        KeyCode::Char('b') => Some(DashboardEvent::Dispatch(Command::AddBookmark)),
        KeyCode::Char('x') => Some(DashboardEvent::Dispatch(Command::ClearHistory)),
        KeyCode::Char('d') => Some(DashboardEvent::Dispatch(Command::ToggleDarkMode)),
        KeyCode::Char('1') => Some(DashboardEvent::Dispatch(Command::SetMapStyle(
            TileStyle::Standard,
        ))),
        KeyCode::Char('2') => Some(DashboardEvent::Dispatch(Command::SetMapStyle(
            TileStyle::Satellite,
        ))),
        KeyCode::Char('3') => Some(DashboardEvent::Dispatch(Command::SetMapStyle(
            TileStyle::Terrain,
        ))),
        KeyCode::Down => Some(DashboardEvent::SelectNext),
        KeyCode::Up => Some(DashboardEvent::SelectPrev),
        KeyCode::Enter => Some(DashboardEvent::ActivateSelected),
        KeyCode::Delete | KeyCode::Backspace => Some(DashboardEvent::DeleteSelected),
        _ => None,
    }
}
