//! Keyboard input handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::App;
use super::selection::ListNavigator;
use super::state::{AppMode, Message};
use crate::event::KeyAction;

impl App {
    /// Route a key press according to the current mode.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) {
        if self.mode == AppMode::Search {
            self.handle_search_input(key);
        } else {
            self.handle_action(KeyAction::from_key_event(key));
        }
    }

    pub(crate) fn handle_action(&mut self, action: KeyAction) {
        if self.mode == AppMode::Help {
            match action {
                KeyAction::ToggleHelp | KeyAction::Cancel => self.mode = AppMode::Normal,
                KeyAction::Quit | KeyAction::ForceQuit => self.mode = AppMode::Quit,
                _ => {}
            }
            return;
        }

        match action {
            KeyAction::MoveUp => self.selection.move_up(1),
            KeyAction::MoveDown => self.selection.move_down(1),
            KeyAction::JumpToTop => self.selection.jump_to_top(),
            KeyAction::JumpToBottom => self.selection.jump_to_bottom(),
            KeyAction::PageUp => self.selection.page_up(),
            KeyAction::PageDown => self.selection.page_down(),

            KeyAction::Open => self.open_selected(),
            KeyAction::NavigateBack => self.navigate_back(),
            KeyAction::JumpToCrumb(position) => self.jump_to_crumb(position),

            KeyAction::CycleView => self.cycle_view(),
            KeyAction::ToggleHelp => self.mode = AppMode::Help,
            KeyAction::ToggleTheme => self.toggle_theme(),

            KeyAction::Refresh => {
                let request = self.navigator.refresh();
                self.dispatch(request);
            }
            KeyAction::Search => self.mode = AppMode::Search,
            KeyAction::Cancel => {
                if self.navigator.search_query().is_empty() {
                    self.message = None;
                } else {
                    self.set_query(String::new());
                }
            }

            KeyAction::Quit | KeyAction::ForceQuit => self.mode = AppMode::Quit,
            KeyAction::None => {}
        }
    }

    fn handle_search_input(&mut self, key: KeyEvent) {
        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.mode = AppMode::Quit,
            (KeyCode::Esc, _) => {
                self.set_query(String::new());
                self.mode = AppMode::Normal;
            }
            (KeyCode::Enter, _) => self.mode = AppMode::Normal,
            (KeyCode::Backspace, _) => {
                let mut query = self.navigator.search_query().to_string();
                query.pop();
                self.set_query(query);
            }
            (KeyCode::Up, _) => self.selection.move_up(1),
            (KeyCode::Down, _) => self.selection.move_down(1),
            (KeyCode::Char(c), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
                let mut query = self.navigator.search_query().to_string();
                query.push(c);
                self.set_query(query);
            }
            _ => {}
        }
    }

    fn set_query(&mut self, query: String) {
        self.navigator.set_search_query(query);
        let count = self.navigator.filtered_entries().len();
        self.selection.reset(count);
    }

    fn open_selected(&mut self) {
        let Some(entry) = self.selected_entry() else {
            return;
        };
        debug!(name = %entry.name, "Opening entry");
        let request = self.navigator.enter(&entry);
        self.dispatch(request);
    }

    /// Follow the parent link. Falls back to the path parent when the
    /// listing has none, e.g. after a failed load.
    fn navigate_back(&mut self) {
        let parent = self
            .navigator
            .entries()
            .iter()
            .find(|entry| entry.is_parent_link())
            .cloned();
        let request = match parent {
            Some(link) => self.navigator.enter(&link),
            None => self.navigator.go_up(),
        };
        self.dispatch(request);
    }

    fn jump_to_crumb(&mut self, position: usize) {
        let crumbs = self.navigator.breadcrumbs();
        let Some(crumb) = position.checked_sub(1).and_then(|i| crumbs.get(i)) else {
            return;
        };
        let request = self.navigator.jump_to_breadcrumb(&crumb.path);
        self.dispatch(request);
    }

    fn cycle_view(&mut self) {
        let mode = self.navigator.view_mode().next();
        if let Err(err) = self.navigator.set_view_mode(mode) {
            self.message = Some(Message::warning(format!("View mode not saved: {err}")));
        }
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggle();
        self.settings.theme = self.theme.variant;
        self.persist_settings();
    }
}
