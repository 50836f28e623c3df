//! Event handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    JumpToTop,
    JumpToBottom,
    PageUp,
    PageDown,

    // Directory navigation
    Open,
    NavigateBack,
    /// Jump to the breadcrumb at this 1-based position.
    JumpToCrumb(usize),

    // UI toggles
    CycleView,
    ToggleHelp,
    ToggleTheme,

    // Other actions
    Refresh,
    Search,
    Cancel,

    // Application
    Quit,
    ForceQuit,

    // No action
    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::ForceQuit,

            // Esc clears the search filter or closes overlays
            (KeyCode::Esc, _) => KeyAction::Cancel,

            // Navigation - vim style
            (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::MoveDown,
            (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::MoveUp,

            // Navigation - arrow keys
            (KeyCode::Down, _) => KeyAction::MoveDown,
            (KeyCode::Up, _) => KeyAction::MoveUp,

            // Jump
            (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::JumpToTop,
            (KeyCode::Char('G'), KeyModifiers::SHIFT) => KeyAction::JumpToBottom,
            (KeyCode::Home, _) => KeyAction::JumpToTop,
            (KeyCode::End, _) => KeyAction::JumpToBottom,

            // Page navigation
            (KeyCode::PageUp, _) => KeyAction::PageUp,
            (KeyCode::PageDown, _) => KeyAction::PageDown,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => KeyAction::PageUp,
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => KeyAction::PageDown,

            // Directory navigation
            (KeyCode::Enter, _) => KeyAction::Open,
            (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::Open,
            (KeyCode::Right, _) => KeyAction::Open,
            (KeyCode::Backspace, _) => KeyAction::NavigateBack,
            (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::NavigateBack,
            (KeyCode::Char('-'), KeyModifiers::NONE) => KeyAction::NavigateBack,
            (KeyCode::Left, _) => KeyAction::NavigateBack,

            // Breadcrumbs
            (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
                KeyAction::JumpToCrumb(c as usize - '0' as usize)
            }

            // UI toggles
            (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::ToggleHelp,
            (KeyCode::Char('?'), KeyModifiers::SHIFT) => KeyAction::ToggleHelp,
            (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::ToggleTheme,
            (KeyCode::Char('v'), KeyModifiers::NONE) => KeyAction::CycleView,

            // Refresh
            (KeyCode::Char('R'), KeyModifiers::SHIFT) => KeyAction::Refresh,

            // Search
            (KeyCode::Char('/'), KeyModifiers::NONE) => KeyAction::Search,

            _ => KeyAction::None,
        }
    }
}

/// A section of key bindings for the help display.
pub struct HelpSection {
    pub title: &'static str,
    pub bindings: Vec<KeyBinding>,
}

/// Key binding for display in help.
pub struct KeyBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

/// Get all key bindings organized by section for help display.
pub fn get_help_sections() -> Vec<HelpSection> {
    vec![
        HelpSection {
            title: "Navigation",
            bindings: vec![
                KeyBinding { keys: "j/k ↑/↓", description: "Move up/down" },
                KeyBinding { keys: "Enter/l", description: "Open directory or file" },
                KeyBinding { keys: "Backspace/h/-", description: "Go to parent" },
                KeyBinding { keys: "1-9", description: "Jump to breadcrumb" },
                KeyBinding { keys: "g/G", description: "Jump to top/bottom" },
                KeyBinding { keys: "PgUp/PgDn", description: "Page up/down" },
            ],
        },
        HelpSection {
            title: "Search",
            bindings: vec![
                KeyBinding { keys: "/", description: "Filter by name" },
                KeyBinding { keys: "Enter", description: "Keep filter" },
                KeyBinding { keys: "Esc", description: "Clear filter" },
            ],
        },
        HelpSection {
            title: "Views & Display",
            bindings: vec![
                KeyBinding { keys: "v", description: "Cycle simple/compact/detailed" },
                KeyBinding { keys: "t", description: "Toggle dark/light theme" },
                KeyBinding { keys: "R", description: "Refresh listing" },
            ],
        },
        HelpSection {
            title: "Commands",
            bindings: vec![
                KeyBinding { keys: "?", description: "Show this help" },
                KeyBinding { keys: "q", description: "Quit" },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_breadcrumb_digits() {
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('1'))),
            KeyAction::JumpToCrumb(1)
        );
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('9'))),
            KeyAction::JumpToCrumb(9)
        );
        assert_eq!(
            KeyAction::from_key_event(key(KeyCode::Char('0'))),
            KeyAction::None
        );
    }

    #[test]
    fn test_parent_navigation_keys() {
        for code in [KeyCode::Backspace, KeyCode::Char('h'), KeyCode::Char('-')] {
            assert_eq!(KeyAction::from_key_event(key(code)), KeyAction::NavigateBack);
        }
    }

    #[test]
    fn test_shifted_keys() {
        let refresh = KeyEvent::new(KeyCode::Char('R'), KeyModifiers::SHIFT);
        assert_eq!(KeyAction::from_key_event(refresh), KeyAction::Refresh);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(KeyAction::from_key_event(ctrl_c), KeyAction::ForceQuit);
    }
}
