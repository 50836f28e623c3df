//! Activity signals driving the status line.
//!
//! A [`StatusSignal`] is the latest snapshot of everything the assistant
//! task has reported. Producers replace it wholesale whenever something
//! changes; every field is optional and missing values degrade gracefully.
//! The serde shape accepts the field names emitted by existing producers
//! (`toolName`, `used`, `total`, `cacheReadTokens`, `can_interrupt`).

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Provider assumed when the producer does not name one.
const DEFAULT_PROVIDER: &str = "claude";

/// Semantic color of a status presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTag {
    /// Default accent (blue).
    #[default]
    Accent,
    /// Tool execution (purple).
    Tool,
    /// Waiting on the backend (orange).
    Pending,
    /// Needs the user's attention (yellow).
    Warning,
    /// Completed successfully (green).
    Success,
}

impl ColorTag {
    /// Resolve a semantic or plain color name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "accent" | "blue" => Some(Self::Accent),
            "tool" | "purple" => Some(Self::Tool),
            "pending" | "orange" => Some(Self::Pending),
            "warning" | "yellow" => Some(Self::Warning),
            "success" | "green" => Some(Self::Success),
            _ => None,
        }
    }
}

/// Status text pushed explicitly by the producer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExplicitStatus {
    #[serde(deserialize_with = "lenient_text")]
    pub text: String,
    pub icon: Option<String>,
    #[serde(deserialize_with = "lenient_color")]
    pub color: Option<ColorTag>,
    #[serde(alias = "can_interrupt")]
    pub can_interrupt: Option<bool>,
}

impl ExplicitStatus {
    /// Explicit status with only a text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// The tool call currently executing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveTool {
    #[serde(alias = "toolName", deserialize_with = "lenient_text")]
    pub name: String,
    pub input: Option<serde_json::Value>,
}

impl ActiveTool {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            input: None,
        }
    }

    pub fn with_input(mut self, input: serde_json::Value) -> Self {
        self.input = Some(input);
        self
    }
}

/// Token counters reported by the model backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TokenUsage {
    #[serde(alias = "input", deserialize_with = "lenient_count")]
    pub input_tokens: Option<u64>,
    #[serde(alias = "output", deserialize_with = "lenient_count")]
    pub output_tokens: Option<u64>,
    #[serde(
        alias = "cacheReadTokens",
        alias = "cache",
        deserialize_with = "lenient_count"
    )]
    pub cache_tokens: Option<u64>,
    #[serde(alias = "used", deserialize_with = "lenient_count")]
    pub total_used: Option<u64>,
    #[serde(alias = "total", deserialize_with = "lenient_count")]
    pub total_limit: Option<u64>,
}

impl TokenUsage {
    /// Whether the usage carries a per-direction breakdown.
    pub fn has_breakdown(&self) -> bool {
        self.input_tokens.is_some() || self.output_tokens.is_some()
    }
}

/// Everything known about the running task at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusSignal {
    #[serde(alias = "status")]
    pub explicit_status: Option<ExplicitStatus>,
    #[serde(alias = "currentTool")]
    pub active_tool: Option<ActiveTool>,
    #[serde(alias = "tokenBudget")]
    pub token_usage: Option<TokenUsage>,
    #[serde(deserialize_with = "lenient_provider")]
    pub provider: String,
    #[serde(alias = "isLoading", deserialize_with = "lenient_flag")]
    pub is_active: bool,
}

impl Default for StatusSignal {
    fn default() -> Self {
        Self {
            explicit_status: None,
            active_tool: None,
            token_usage: None,
            provider: DEFAULT_PROVIDER.to_string(),
            is_active: false,
        }
    }
}

impl StatusSignal {
    /// An active signal with nothing else reported yet.
    pub fn active() -> Self {
        Self {
            is_active: true,
            ..Default::default()
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_explicit_status(mut self, status: ExplicitStatus) -> Self {
        self.explicit_status = Some(status);
        self
    }

    pub fn with_active_tool(mut self, tool: ActiveTool) -> Self {
        self.active_tool = Some(tool);
        self
    }

    pub fn with_token_usage(mut self, usage: TokenUsage) -> Self {
        self.token_usage = Some(usage);
        self
    }
}

fn lenient_color<'de, D>(deserializer: D) -> Result<Option<ColorTag>, D::Error>
where
    D: Deserializer<'de>,
{
    let name: Option<String> = Option::deserialize(deserializer)?;
    Ok(name.as_deref().and_then(ColorTag::from_name))
}

/// `null` reads as empty text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_provider<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let provider: Option<String> = Option::deserialize(deserializer)?;
    Ok(provider.unwrap_or_else(|| DEFAULT_PROVIDER.to_string()))
}

/// Only `true` counts as set; `null` and non-booleans read as `false`.
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// Token counters as JavaScript producers send them. Fractions are
/// truncated, negatives clamp to 0 and anything non-numeric is absent.
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| if f <= 0.0 { 0 } else { f as u64 })
        }),
        _ => None,
    };
    Ok(count)
}
