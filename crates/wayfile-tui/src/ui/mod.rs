//! UI components and widgets.

mod help;
mod listing;
mod search_bar;
mod status_bar;

pub use help::HelpOverlay;
pub use listing::{EmptyState, ListingView};
pub use search_bar::SearchBar;
pub use status_bar::StatusBar;

use ratatui::layout::{Constraint, Layout, Rect};

/// Layout areas for the application.
#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub header: Rect,
    pub search: Option<Rect>,
    pub main: Rect,
    pub status: Option<Rect>,
    pub footer: Rect,
}

impl AppLayout {
    /// Compute layout from terminal area.
    pub fn new(area: Rect, show_search: bool, show_status: bool) -> Self {
        let mut constraints = vec![Constraint::Length(1)];
        if show_search {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Min(3));
        if show_status {
            constraints.push(Constraint::Length(1));
        }
        constraints.push(Constraint::Length(1));

        let areas = Layout::vertical(constraints).split(area);
        let mut next = areas.iter().copied();
        let mut take = || next.next().unwrap_or_default();

        let header = take();
        let search = show_search.then(&mut take);
        let main = take();
        let status = show_status.then(&mut take);
        let footer = take();

        Self {
            header,
            search,
            main,
            status,
            footer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_without_optional_rows() {
        let layout = AppLayout::new(Rect::new(0, 0, 80, 24), false, false);
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.main.height, 22);
        assert_eq!(layout.footer.y, 23);
        assert!(layout.search.is_none());
        assert!(layout.status.is_none());
    }

    #[test]
    fn test_layout_with_search_and_status() {
        let layout = AppLayout::new(Rect::new(0, 0, 80, 24), true, true);
        assert_eq!(layout.search.map(|r| r.y), Some(1));
        assert_eq!(layout.main.y, 2);
        assert_eq!(layout.main.height, 20);
        assert_eq!(layout.status.map(|r| r.y), Some(22));
        assert_eq!(layout.footer.y, 23);
    }
}
