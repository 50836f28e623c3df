//! Activity status line.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;
use wayfile_status::StatusView;

use crate::theme::Theme;

/// One-row rendering of a [`StatusView`]: glyph, label and elapsed time on
/// the left, token usage and the interrupt hint on the right.
pub struct StatusBar<'a> {
    view: &'a StatusView,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(view: &'a StatusView, theme: &'a Theme) -> Self {
        Self { view, theme }
    }

    fn right_text(&self) -> String {
        let mut parts = Vec::new();
        if let Some(summary) = &self.view.token_summary {
            parts.push(summary.display());
        }
        if self.view.can_interrupt {
            parts.push("esc to stop".to_string());
        }
        parts.join(" · ")
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.view.visible || area.height == 0 {
            return;
        }

        let color = self.theme.status_color(self.view.color);
        let left = Line::from(vec![
            Span::styled(
                format!(" {} ", self.view.glyph()),
                Style::new().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(self.view.label.clone(), Style::new().fg(color)),
            Span::styled(
                format!(" ({}s)", self.view.elapsed_seconds),
                Style::new().fg(self.theme.muted),
            ),
        ]);
        buf.set_line(area.x, area.y, &left, area.width);

        let right = self.right_text();
        let right_width = u16::try_from(right.width()).unwrap_or(u16::MAX);
        let left_width = u16::try_from(left.width()).unwrap_or(u16::MAX);
        if !right.is_empty() && left_width.saturating_add(right_width + 2) <= area.width {
            let x = area.x + area.width - right_width - 1;
            buf.set_string(x, area.y, right, Style::new().fg(self.theme.muted));
        }
    }
}
