//! Position panel widget.
//!
//! Renders one of the three panel states: loading spinner text, error
//! message with retry hint, or the labelled fix details.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use geotrail::ui::{InfoPanel, UiMode};

/// Widget displaying the current position (or why there is none).
pub struct InfoWidget<'a> {
    mode: &'a UiMode,
    panel: Option<&'a InfoPanel>,
}

impl<'a> InfoWidget<'a> {
    pub fn new(mode: &'a UiMode, panel: Option<&'a InfoPanel>) -> Self {
        Self { mode, panel }
    }

    fn label_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }
}

impl Widget for InfoWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title, lines) = if self.mode.is_loading() {
            (
                "Position",
                vec![Line::from(Span::styled(
                    "Getting your location...",
                    Style::default().fg(Color::Yellow),
                ))],
            )
        } else if let Some(message) = self.mode.error_message() {
            (
                "Position",
                vec![
                    Line::from(Span::styled(
                        message.to_string(),
                        Style::default().fg(Color::Red),
                    )),
                    Line::default(),
                    Line::from(Span::styled(
                        "Press r to retry.",
                        Self::label_style(),
                    )),
                ],
            )
        } else if let Some(panel) = self.panel {
            let lines = panel
                .rows()
                .iter()
                .map(|(label, value)| {
                    Line::from(vec![
                        Span::styled(format!("{:<12}", label), Self::label_style()),
                        Span::raw(value.to_string()),
                    ])
                })
                .collect();
            ("Position", lines)
        } else {
            (
                "Position",
                vec![Line::from(Span::styled(
                    "No fix yet.",
                    Self::label_style(),
                ))],
            )
        };

        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .render(area, buf);
    }
}
