//! Directory listing widget.

use chrono::{DateTime, Utc};
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Widget};
use unicode_width::UnicodeWidthStr;
use wayfile_core::format::{format_optional_size, format_relative_time};
use wayfile_core::{DirectoryEntry, EntryKind, FileCategory, ViewMode};

use crate::theme::Theme;

/// What to show when no real entry is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    NoProject,
    Loading,
    NoFiles,
    NoMatches,
}

impl EmptyState {
    fn lines(self) -> (&'static str, &'static str) {
        match self {
            Self::NoProject => ("No project selected", "Run wayfile <PROJECT> to browse files"),
            Self::Loading => ("Loading files...", ""),
            Self::NoFiles => ("No files found", "Check if the project path is accessible"),
            Self::NoMatches => ("No matches found", "Try a different search term"),
        }
    }
}

/// Listing of one directory, drawn according to the view mode.
pub struct ListingView<'a> {
    entries: &'a [&'a DirectoryEntry],
    mode: ViewMode,
    selected: usize,
    offset: usize,
    title: &'a str,
    empty: EmptyState,
    now: DateTime<Utc>,
    theme: &'a Theme,
}

impl<'a> ListingView<'a> {
    pub fn new(entries: &'a [&'a DirectoryEntry], mode: ViewMode, theme: &'a Theme) -> Self {
        Self {
            entries,
            mode,
            selected: 0,
            offset: 0,
            title: "",
            empty: EmptyState::NoFiles,
            now: Utc::now(),
            theme,
        }
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn empty_state(mut self, empty: EmptyState) -> Self {
        self.empty = empty;
        self
    }

    /// Reference time for relative timestamps.
    pub fn now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Rows available for entries inside `area`.
    pub fn rows_for(area: Rect, mode: ViewMode) -> usize {
        let chrome = if mode == ViewMode::Detailed { 3 } else { 2 };
        usize::from(area.height.saturating_sub(chrome))
    }

    fn icon(entry: &DirectoryEntry) -> &'static str {
        match entry.kind {
            EntryKind::Directory => "📁",
            EntryKind::ParentLink => "↩",
            EntryKind::ErrorPlaceholder { .. } => "⚠",
            EntryKind::File { .. } => match entry.category() {
                FileCategory::Code => "📜",
                FileCategory::Document => "📄",
                FileCategory::Image => "🎨",
                FileCategory::Other => "📃",
            },
        }
    }

    fn name_style(&self, entry: &DirectoryEntry) -> Style {
        match entry.kind {
            EntryKind::Directory => self.theme.directory,
            EntryKind::ParentLink => self.theme.parent_link,
            EntryKind::ErrorPlaceholder { .. } => Style::new().fg(self.theme.error),
            EntryKind::File { .. } => self.theme.file_style(entry.category()),
        }
    }

    fn name_spans(&self, entry: &DirectoryEntry) -> Vec<Span<'a>> {
        let text = match entry.error_message() {
            Some(message) => message.to_string(),
            None => entry.name.to_string(),
        };
        vec![
            Span::raw(format!("{} ", Self::icon(entry))),
            Span::styled(text, self.name_style(entry)),
        ]
    }

    fn size_text(entry: &DirectoryEntry) -> String {
        if entry.is_file() {
            format_optional_size(entry.size())
        } else {
            String::new()
        }
    }

    fn modified_text(&self, entry: &DirectoryEntry) -> String {
        if entry.is_file() {
            entry
                .modified()
                .map(|at| format_relative_time(at, self.now))
                .unwrap_or_else(|| "-".to_string())
        } else {
            String::new()
        }
    }

    fn columns(area: Rect) -> [Rect; 3] {
        Layout::horizontal([
            Constraint::Ratio(6, 12),
            Constraint::Ratio(2, 12),
            Constraint::Ratio(4, 12),
        ])
        .areas(area)
    }

    fn render_row(&self, entry: &DirectoryEntry, row: Rect, buf: &mut Buffer) {
        let muted = Style::new().fg(self.theme.muted);
        match self.mode {
            ViewMode::Simple => {
                buf.set_line(row.x, row.y, &Line::from(self.name_spans(entry)), row.width);
            }
            ViewMode::Compact => {
                let size = Self::size_text(entry);
                let size_width = u16::try_from(size.width()).unwrap_or(row.width);
                let name_width = row.width.saturating_sub(size_width + 1);
                buf.set_line(row.x, row.y, &Line::from(self.name_spans(entry)), name_width);
                if !size.is_empty() && size_width < row.width {
                    let x = row.x + row.width - size_width;
                    buf.set_string(x, row.y, &size, muted);
                }
            }
            ViewMode::Detailed => {
                let [name, size, modified] = Self::columns(row);
                if entry.is_error() {
                    buf.set_line(row.x, row.y, &Line::from(self.name_spans(entry)), row.width);
                    return;
                }
                buf.set_line(name.x, name.y, &Line::from(self.name_spans(entry)), name.width);
                buf.set_stringn(size.x, size.y, Self::size_text(entry), size.width.into(), muted);
                buf.set_stringn(
                    modified.x,
                    modified.y,
                    self.modified_text(entry),
                    modified.width.into(),
                    muted,
                );
            }
        }
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        let [name, size, modified] = Self::columns(area);
        let style = self.theme.column_header;
        buf.set_stringn(name.x, name.y, "Name", name.width.into(), style);
        buf.set_stringn(size.x, size.y, "Size", size.width.into(), style);
        buf.set_stringn(modified.x, modified.y, "Modified", modified.width.into(), style);
    }

    fn render_empty(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let (title, hint) = self.empty.lines();
        Line::from(Span::styled(title, Style::new().fg(self.theme.foreground)))
            .centered()
            .render(Rect { height: 1, ..area }, buf);
        if !hint.is_empty() && area.height > 1 {
            Line::from(Span::styled(hint, Style::new().fg(self.theme.muted)))
                .centered()
                .render(Rect::new(area.x, area.y + 1, area.width, 1), buf);
        }
    }
}

impl Widget for ListingView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(self.theme.title)
            .borders(Borders::ALL)
            .border_style(self.theme.border);
        let mut inner = block.inner(area);
        block.render(area, buf);

        if self.mode == ViewMode::Detailed && inner.height > 0 {
            self.render_header(Rect { height: 1, ..inner }, buf);
            inner.y += 1;
            inner.height -= 1;
        }

        let rows = usize::from(inner.height);
        let visible = self.entries.iter().skip(self.offset).take(rows);
        let mut y = inner.y;
        for (index, entry) in visible.enumerate() {
            let row = Rect::new(inner.x, y, inner.width, 1);
            self.render_row(entry, row, buf);
            if self.offset + index == self.selected {
                buf.set_style(row, self.theme.selected);
            }
            y += 1;
        }

        // Parent links alone do not count as content.
        if self.entries.iter().all(|entry| entry.is_parent_link()) {
            let used = y - inner.y;
            let rest = Rect::new(inner.x, y + 1, inner.width, inner.height.saturating_sub(used + 1));
            self.render_empty(rest, buf);
        }
    }
}
