//! Search input row.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::theme::Theme;

const PLACEHOLDER: &str = "Search files...";

/// Filter prompt shown above the listing.
pub struct SearchBar<'a> {
    query: &'a str,
    editing: bool,
    theme: &'a Theme,
}

impl<'a> SearchBar<'a> {
    pub fn new(query: &'a str, editing: bool, theme: &'a Theme) -> Self {
        Self {
            query,
            editing,
            theme,
        }
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(" / ", self.theme.search_prompt)];
        let placeholder = Span::styled(PLACEHOLDER, Style::new().fg(self.theme.muted));
        match (self.query.is_empty(), self.editing) {
            (true, true) => {
                spans.push(Span::styled(" ", self.theme.search_cursor));
                spans.push(placeholder);
            }
            (true, false) => spans.push(placeholder),
            (false, true) => {
                spans.push(Span::styled(self.query, self.theme.search_input));
                spans.push(Span::styled(" ", self.theme.search_cursor));
            }
            (false, false) => {
                spans.push(Span::styled(self.query, self.theme.search_input));
                spans.push(Span::styled("  (Esc to clear)", Style::new().fg(self.theme.muted)));
            }
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}
