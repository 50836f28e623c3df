//! Status presentation produced by the engine.

use serde::Serialize;
use strum::{Display, IntoStaticStr};
use wayfile_core::format::format_tokens;
use wayfile_core::{ColorTag, TokenUsage};

/// Spinner frames, one per animation phase.
pub const SPINNER_FRAMES: [&str; 4] = ["✻", "✹", "✸", "✶"];

/// Glyph producers may send to ask for the animated spinner.
const SPINNER_GLYPH: &str = "✻";

/// Icon shown next to the status label.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusIcon {
    /// Animated spinner; cycles with the animation phase.
    #[default]
    Spinner,
    Pause,
    Tool,
    Hourglass,
    Thought,
    /// Caller-supplied glyph, shown as-is.
    Custom(String),
}

impl StatusIcon {
    /// Icon for a caller-supplied glyph. Missing or spinner glyphs animate.
    pub fn from_glyph(glyph: Option<&str>) -> Self {
        match glyph.map(str::trim) {
            None | Some("") | Some(SPINNER_GLYPH) => Self::Spinner,
            Some(other) => Self::Custom(other.to_string()),
        }
    }

    /// Glyph to draw at animation `phase`.
    pub fn glyph(&self, phase: u8) -> &str {
        match self {
            Self::Spinner => SPINNER_FRAMES[usize::from(phase) % SPINNER_FRAMES.len()],
            Self::Pause => "⏸",
            Self::Tool => "🔧",
            Self::Hourglass => "⏳",
            Self::Thought => "💭",
            Self::Custom(glyph) => glyph,
        }
    }
}

/// Which rule produced a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatusSource {
    Hidden,
    PermissionWait,
    Explicit,
    ActiveTool,
    Silence,
    Startup,
    Rotation,
}

/// Normalized token usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TokenSummary {
    /// Per-direction breakdown; missing counters are 0.
    Detailed {
        input: u64,
        output: u64,
        cache: u64,
        total: u64,
    },
    /// Consumption against a budget.
    Budget { total: u64, limit: u64 },
}

impl TokenSummary {
    /// Summarize raw usage. `default_limit` applies when the backend
    /// reports no positive limit.
    pub fn from_usage(usage: &TokenUsage, default_limit: u64) -> Self {
        if usage.has_breakdown() {
            Self::Detailed {
                input: usage.input_tokens.unwrap_or(0),
                output: usage.output_tokens.unwrap_or(0),
                cache: usage.cache_tokens.unwrap_or(0),
                total: usage.total_used.unwrap_or(0),
            }
        } else {
            Self::Budget {
                total: usage.total_used.unwrap_or(0),
                limit: usage.total_limit.filter(|&limit| limit > 0).unwrap_or(default_limit),
            }
        }
    }

    /// Compact display such as `⚡ 1.5k / 200`.
    pub fn display(&self) -> String {
        match *self {
            Self::Detailed {
                input,
                output,
                total,
                ..
            } => {
                let lead = if input > 0 { input } else { total };
                if output > 0 {
                    format!("⚡ {} / {}", format_tokens(lead), format_tokens(output))
                } else {
                    format!("⚡ {}", format_tokens(lead))
                }
            }
            Self::Budget { total, limit } => {
                format!("⚡ {} / {}", format_tokens(total), format_tokens(limit))
            }
        }
    }
}

/// Everything the presentation layer needs to draw the status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub visible: bool,
    pub label: String,
    pub icon: StatusIcon,
    pub color: ColorTag,
    pub elapsed_seconds: u64,
    /// Animation phase in `0..4`.
    pub phase: u8,
    pub token_summary: Option<TokenSummary>,
    pub can_interrupt: bool,
    pub source: StatusSource,
}

impl Default for StatusView {
    fn default() -> Self {
        Self::hidden()
    }
}

impl StatusView {
    /// The view shown while no task is active.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            label: String::new(),
            icon: StatusIcon::Spinner,
            color: ColorTag::Accent,
            elapsed_seconds: 0,
            phase: 0,
            token_summary: None,
            can_interrupt: false,
            source: StatusSource::Hidden,
        }
    }

    /// Glyph for the current animation phase.
    pub fn glyph(&self) -> &str {
        self.icon.glyph(self.phase)
    }

    /// Single-line rendering, e.g. `✹ Analyzing (9s) · ⚡ 1.5k / 200 · esc to stop`.
    /// Empty when hidden.
    pub fn line(&self) -> String {
        if !self.visible {
            return String::new();
        }
        let mut line = format!("{} {} ({}s)", self.glyph(), self.label, self.elapsed_seconds);
        if let Some(summary) = &self.token_summary {
            line.push_str(" · ");
            line.push_str(&summary.display());
        }
        if self.can_interrupt {
            line.push_str(" · esc to stop");
        }
        line
    }
}
