//! Color theme for the TUI.
//!
//! Dark and light themes share one semantic palette based on Tailwind CSS
//! colors. Status colors resolve through [`Theme::status_color`].

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Serialize};
use wayfile_core::{ColorTag, FileCategory};

/// Theme variant (dark or light).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
}

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Current theme variant.
    pub variant: ThemeVariant,

    // Base colors
    pub foreground: Color,
    pub muted: Color,

    // Interactive elements
    pub selected: Style,

    // Semantic colors
    pub accent: Color,
    pub tool: Color,
    pub pending: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI elements
    pub border: Style,
    pub title: Style,
    pub help_key: Style,
    pub help_desc: Style,
    pub column_header: Style,

    // Listing entries
    pub directory: Style,
    pub file: Style,
    pub code: Style,
    pub document: Style,
    pub image: Style,
    pub parent_link: Style,

    // Header/Footer
    pub header: Style,
    pub footer: Style,
    pub breadcrumb: Style,
    pub breadcrumb_current: Style,

    // Search bar
    pub search_prompt: Style,
    pub search_input: Style,
    pub search_cursor: Style,
}

impl Theme {
    /// Dark theme using a slate-based palette.
    pub fn dark() -> Self {
        // Slate palette (Tailwind CSS)
        let slate_50 = Color::Rgb(248, 250, 252);
        let slate_100 = Color::Rgb(241, 245, 249);
        let slate_300 = Color::Rgb(203, 213, 225);
        let slate_400 = Color::Rgb(148, 163, 184);
        let slate_500 = Color::Rgb(100, 116, 139);
        let slate_600 = Color::Rgb(71, 85, 105);
        let slate_700 = Color::Rgb(51, 65, 85);
        let slate_800 = Color::Rgb(30, 41, 59);

        // Accent colors (Tailwind CSS)
        let blue_400 = Color::Rgb(96, 165, 250);
        let blue_500 = Color::Rgb(59, 130, 246);
        let purple_400 = Color::Rgb(192, 132, 252);
        let green_500 = Color::Rgb(34, 197, 94);
        let yellow_500 = Color::Rgb(234, 179, 8);
        let orange_500 = Color::Rgb(249, 115, 22);
        let red_500 = Color::Rgb(239, 68, 68);
        let cyan_400 = Color::Rgb(34, 211, 238);
        let amber_500 = Color::Rgb(245, 158, 11);

        Self {
            variant: ThemeVariant::Dark,
            foreground: slate_100,
            muted: slate_500,

            selected: Style::new().bg(slate_700).fg(slate_50).add_modifier(Modifier::BOLD),

            accent: blue_400,
            tool: purple_400,
            pending: orange_500,
            success: green_500,
            warning: yellow_500,
            error: red_500,

            border: Style::new().fg(slate_600),
            title: Style::new().fg(blue_400).add_modifier(Modifier::BOLD),
            help_key: Style::new().fg(blue_400).add_modifier(Modifier::BOLD),
            help_desc: Style::new().fg(slate_400),
            column_header: Style::new().fg(slate_500).add_modifier(Modifier::BOLD),

            directory: Style::new().fg(blue_500).add_modifier(Modifier::BOLD),
            file: Style::new().fg(slate_300),
            code: Style::new().fg(green_500),
            document: Style::new().fg(amber_500),
            image: Style::new().fg(cyan_400),
            parent_link: Style::new().fg(slate_400),

            header: Style::new().bg(slate_800).fg(slate_100),
            footer: Style::new().bg(slate_800).fg(slate_400),
            breadcrumb: Style::new().fg(slate_400),
            breadcrumb_current: Style::new().fg(slate_50).add_modifier(Modifier::BOLD),

            search_prompt: Style::new().fg(blue_400).add_modifier(Modifier::BOLD),
            search_input: Style::new().fg(slate_100),
            search_cursor: Style::new().add_modifier(Modifier::REVERSED),
        }
    }

    /// Light theme using a slate-based palette.
    pub fn light() -> Self {
        // Slate palette (Tailwind CSS)
        let slate_100 = Color::Rgb(241, 245, 249);
        let slate_200 = Color::Rgb(226, 232, 240);
        let slate_400 = Color::Rgb(148, 163, 184);
        let slate_500 = Color::Rgb(100, 116, 139);
        let slate_600 = Color::Rgb(71, 85, 105);
        let slate_700 = Color::Rgb(51, 65, 85);
        let slate_800 = Color::Rgb(30, 41, 59);
        let slate_900 = Color::Rgb(15, 23, 42);

        // Accent colors (Tailwind CSS - darker variants for light theme)
        let blue_600 = Color::Rgb(37, 99, 235);
        let blue_700 = Color::Rgb(29, 78, 216);
        let purple_600 = Color::Rgb(147, 51, 234);
        let green_600 = Color::Rgb(22, 163, 74);
        let yellow_600 = Color::Rgb(202, 138, 4);
        let orange_600 = Color::Rgb(234, 88, 12);
        let red_600 = Color::Rgb(220, 38, 38);
        let cyan_600 = Color::Rgb(8, 145, 178);
        let amber_600 = Color::Rgb(217, 119, 6);

        Self {
            variant: ThemeVariant::Light,
            foreground: slate_900,
            muted: slate_500,

            selected: Style::new().bg(slate_200).fg(slate_900).add_modifier(Modifier::BOLD),

            accent: blue_600,
            tool: purple_600,
            pending: orange_600,
            success: green_600,
            warning: yellow_600,
            error: red_600,

            border: Style::new().fg(slate_400),
            title: Style::new().fg(blue_700).add_modifier(Modifier::BOLD),
            help_key: Style::new().fg(blue_700).add_modifier(Modifier::BOLD),
            help_desc: Style::new().fg(slate_600),
            column_header: Style::new().fg(slate_500).add_modifier(Modifier::BOLD),

            directory: Style::new().fg(blue_700).add_modifier(Modifier::BOLD),
            file: Style::new().fg(slate_700),
            code: Style::new().fg(green_600),
            document: Style::new().fg(amber_600),
            image: Style::new().fg(cyan_600),
            parent_link: Style::new().fg(slate_500),

            header: Style::new().bg(slate_100).fg(slate_800),
            footer: Style::new().bg(slate_100).fg(slate_600),
            breadcrumb: Style::new().fg(slate_600),
            breadcrumb_current: Style::new().fg(slate_900).add_modifier(Modifier::BOLD),

            search_prompt: Style::new().fg(blue_700).add_modifier(Modifier::BOLD),
            search_input: Style::new().fg(slate_900),
            search_cursor: Style::new().add_modifier(Modifier::REVERSED),
        }
    }

    /// Create theme from variant.
    pub fn from_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
        }
    }

    /// Toggle between dark and light themes.
    pub fn toggle(&self) -> Self {
        match self.variant {
            ThemeVariant::Dark => Self::light(),
            ThemeVariant::Light => Self::dark(),
        }
    }

    /// Color for a semantic status tag.
    pub fn status_color(&self, tag: ColorTag) -> Color {
        match tag {
            ColorTag::Accent => self.accent,
            ColorTag::Tool => self.tool,
            ColorTag::Pending => self.pending,
            ColorTag::Warning => self.warning,
            ColorTag::Success => self.success,
        }
    }

    /// Style for a file name of the given category.
    pub fn file_style(&self, category: FileCategory) -> Style {
        match category {
            FileCategory::Code => self.code,
            FileCategory::Document => self.document,
            FileCategory::Image => self.image,
            FileCategory::Other => self.file,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let theme = Theme::default();
        assert_eq!(theme.variant, ThemeVariant::Dark);
        assert_eq!(theme.toggle().variant, ThemeVariant::Light);
        assert_eq!(theme.toggle().toggle().variant, ThemeVariant::Dark);
    }

    #[test]
    fn test_status_colors_are_distinct() {
        let theme = Theme::dark();
        assert_ne!(
            theme.status_color(ColorTag::Tool),
            theme.status_color(ColorTag::Pending)
        );
        assert_eq!(theme.status_color(ColorTag::Accent), theme.accent);
    }
}
