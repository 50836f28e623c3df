//! Rendering for the application.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use super::App;
use super::selection::ListNavigator;
use super::state::{AppMode, MessageKind};
use crate::ui::{AppLayout, EmptyState, HelpOverlay, ListingView, SearchBar, StatusBar};

impl App {
    /// Render the application.
    pub(crate) fn render(&mut self, frame: &mut Frame) {
        let show_search =
            self.mode == AppMode::Search || !self.navigator.search_query().is_empty();
        let layout = AppLayout::new(frame.area(), show_search, self.status_view.visible);

        self.render_header(frame, layout.header);

        if let Some(area) = layout.search {
            let editing = self.mode == AppMode::Search;
            frame.render_widget(
                SearchBar::new(self.navigator.search_query(), editing, &self.theme),
                area,
            );
        }

        self.render_listing(frame, layout.main);

        if let Some(area) = layout.status {
            frame.render_widget(StatusBar::new(&self.status_view, &self.theme), area);
        }

        self.render_footer(frame, layout.footer);

        if self.mode == AppMode::Help {
            frame.render_widget(HelpOverlay::new(&self.theme), frame.area());
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;
        let mut spans = vec![Span::styled(
            " wayfile ",
            theme.header.add_modifier(Modifier::BOLD),
        )];

        if self.navigator.project().is_some() {
            let crumbs = self.navigator.breadcrumbs();
            let last = crumbs.len() - 1;
            for (index, crumb) in crumbs.iter().enumerate() {
                spans.push(Span::styled(
                    if index == 0 { " " } else { " › " },
                    theme.breadcrumb,
                ));
                let style = if index == last {
                    theme.breadcrumb_current
                } else {
                    theme.breadcrumb
                };
                spans.push(Span::styled(crumb.label.clone(), style));
            }
        }

        if self.navigator.is_loading() {
            spans.push(Span::styled("  loading…", Style::new().fg(theme.muted)));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.header), area);
    }

    fn render_listing(&mut self, frame: &mut Frame, area: Rect) {
        let mode = self.navigator.view_mode();
        let entries = self.navigator.filtered_entries();
        let offset = self.selection.scroll_offset(ListingView::rows_for(area, mode));

        let empty = if self.navigator.project().is_none() {
            EmptyState::NoProject
        } else if self.navigator.is_loading() && self.navigator.entries().is_empty() {
            EmptyState::Loading
        } else if !self.navigator.search_query().trim().is_empty() {
            EmptyState::NoMatches
        } else {
            EmptyState::NoFiles
        };

        let title = self
            .navigator
            .project()
            .map_or("Files", |project| project.label());

        let view = ListingView::new(&entries, mode, &self.theme)
            .title(title)
            .selected(self.selection.selected())
            .offset(offset)
            .empty_state(empty);
        frame.render_widget(view, area);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let theme = &self.theme;

        let left = match &self.message {
            Some(message) => {
                let color = match message.kind {
                    MessageKind::Info => theme.success,
                    MessageKind::Warning => theme.warning,
                };
                Line::from(Span::styled(format!(" {}", message.text), Style::new().fg(color)))
            }
            None if self.mode == AppMode::Search => Line::from(Span::styled(
                " Enter keep filter · Esc clear",
                theme.footer,
            )),
            None => Line::from(Span::styled(
                " ? help · / search · v view · R refresh · q quit",
                theme.footer,
            )),
        };

        let count = self
            .navigator
            .filtered_entries()
            .iter()
            .filter(|entry| !entry.is_synthetic())
            .count();
        let right = format!("{count} items · {} ", self.navigator.view_mode());

        frame.render_widget(Paragraph::new(left).style(theme.footer), area);

        let right_width = u16::try_from(right.width()).unwrap_or(u16::MAX);
        if right_width < area.width / 2 {
            let right_area = Rect {
                x: area.x + area.width - right_width,
                width: right_width,
                ..area
            };
            frame.render_widget(Paragraph::new(right).style(theme.footer), right_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use wayfile_core::{DirectoryEntry, Project};
    use wayfile_nav::{MemoryPreferenceStore, StaticListingService};

    use super::*;
    use crate::TuiConfig;
    use crate::event::KeyAction;

    fn screen(app: &mut App) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(70, 12)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }

    async fn loaded_app() -> App {
        let listing = StaticListingService::new()
            .with_listing(
                "site",
                "",
                vec![
                    DirectoryEntry::directory("src", "src"),
                    DirectoryEntry::file("Readme.md", "Readme.md").with_size(100),
                    DirectoryEntry::file("report.txt", "report.txt"),
                    DirectoryEntry::file("index.js", "index.js"),
                ],
            )
            .with_listing("site", "src", Vec::<DirectoryEntry>::new());
        let config = TuiConfig::new(Arc::new(listing))
            .with_project(Project::new("site", "/srv/site").with_display_name("My Site"))
            .with_preferences(MemoryPreferenceStore::new())
            .with_settings_path(None);
        let mut app = App::new(config);
        app.start();
        let response = app.listings_rx.recv().await.unwrap();
        app.handle_listing(response);
        app
    }

    #[tokio::test]
    async fn test_screen_shows_breadcrumbs_and_entries() {
        let mut app = loaded_app().await;
        let lines = screen(&mut app);

        assert!(lines[0].contains("My Site"));
        assert!(lines.iter().any(|line| line.contains("Readme.md")));
        assert!(lines.iter().any(|line| line.contains("Modified")));
        assert!(lines[11].contains("4 items · detailed"));
    }

    #[tokio::test]
    async fn test_search_bar_and_no_matches() {
        let mut app = loaded_app().await;
        app.handle_action(KeyAction::Search);
        for c in "zzz".chars() {
            app.handle_key(crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char(c),
                crossterm::event::KeyModifiers::NONE,
            ));
        }
        let lines = screen(&mut app);

        assert!(lines[1].contains("/ zzz"));
        assert!(lines.iter().any(|line| line.contains("No matches found")));
        assert!(lines[11].contains("0 items"));
    }

    #[tokio::test]
    async fn test_empty_directory_state() {
        let mut app = loaded_app().await;
        app.handle_action(KeyAction::Open);
        let response = app.listings_rx.recv().await.unwrap();
        app.handle_listing(response);
        let lines = screen(&mut app);

        assert!(lines[0].contains("My Site › src"));
        assert!(lines.iter().any(|line| line.contains("..")));
        assert!(lines.iter().any(|line| line.contains("No files found")));
    }

    #[tokio::test]
    async fn test_help_overlay_drawn_on_top() {
        let mut app = loaded_app().await;
        app.handle_action(KeyAction::ToggleHelp);
        let lines = screen(&mut app);
        assert!(lines.iter().any(|line| line.contains("Help - Press ? or Esc")));
    }
}
