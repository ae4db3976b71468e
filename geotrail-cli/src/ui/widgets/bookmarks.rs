//! Bookmark list widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, StatefulWidget, Widget},
};

use geotrail::ui::BookmarkRow;

/// Widget displaying saved bookmarks with a selection cursor.
pub struct BookmarkListWidget<'a> {
    rows: &'a [BookmarkRow],
    selected: Option<usize>,
}

impl<'a> BookmarkListWidget<'a> {
    pub fn new(rows: &'a [BookmarkRow], selected: Option<usize>) -> Self {
        Self { rows, selected }
    }
}

impl Widget for BookmarkListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Bookmarks ({})", self.rows.len()));

        if self.rows.is_empty() {
            ratatui::widgets::Paragraph::new(Line::from(Span::styled(
                "No bookmarks yet. Press b to save the current position.",
                Style::default().fg(Color::DarkGray),
            )))
            .block(block)
            .render(area, buf);
            return;
        }

        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| ListItem::new(row.label.clone()))
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(self.selected);
        StatefulWidget::render(list, area, buf, &mut state);
    }
}
