//! Status priority chain.
//!
//! Each rule pairs a predicate with a producer. Rules are evaluated in
//! order and the first match wins; the rotation rule matches anything and
//! terminates the chain.

use serde_json::Value;
use wayfile_core::{ColorTag, StatusSignal};

use crate::config::StatusConfig;
use crate::view::{StatusIcon, StatusSource};

/// Explicit status text that asks for the user's attention.
pub const PERMISSION_SENTINEL: &str = "Waiting for permission";

/// Characters removed from serialized tool input.
const STRIPPED_CHARS: [char; 3] = ['{', '}', '"'];
const TOOL_INPUT_MAX_CHARS: usize = 40;
const TOOL_INPUT_DISPLAY_CHARS: usize = 30;

const STILL_WORKING_AFTER_SECS: u64 = 20;
const ALMOST_THERE_AFTER_SECS: u64 = 30;

/// Inputs visible to every rule.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub signal: &'a StatusSignal,
    pub elapsed_secs: u64,
    /// Seconds since token usage or the active tool last changed.
    pub silent_secs: u64,
    pub config: &'a StatusConfig,
}

/// Label, icon and color chosen by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presentation {
    pub label: String,
    pub icon: StatusIcon,
    pub color: ColorTag,
}

impl Presentation {
    fn new(label: impl Into<String>, icon: StatusIcon, color: ColorTag) -> Self {
        Self {
            label: label.into(),
            icon,
            color,
        }
    }
}

/// One entry of the priority chain.
#[derive(Clone, Copy)]
pub struct Rule {
    pub source: StatusSource,
    pub matches: fn(&RuleContext<'_>) -> bool,
    pub produce: fn(&RuleContext<'_>) -> Presentation,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("source", &self.source).finish()
    }
}

impl Rule {
    /// Apply the rule if it matches.
    pub fn apply(&self, ctx: &RuleContext<'_>) -> Option<Presentation> {
        (self.matches)(ctx).then(|| (self.produce)(ctx))
    }
}

/// Conditional rules in priority order.
pub const RULES: [Rule; 5] = [
    Rule {
        source: StatusSource::PermissionWait,
        matches: permission_matches,
        produce: permission_produce,
    },
    Rule {
        source: StatusSource::Explicit,
        matches: explicit_matches,
        produce: explicit_produce,
    },
    Rule {
        source: StatusSource::ActiveTool,
        matches: tool_matches,
        produce: tool_produce,
    },
    Rule {
        source: StatusSource::Silence,
        matches: silence_matches,
        produce: silence_produce,
    },
    Rule {
        source: StatusSource::Startup,
        matches: startup_matches,
        produce: startup_produce,
    },
];

/// Rule used when nothing else matches.
pub const FALLBACK: Rule = Rule {
    source: StatusSource::Rotation,
    matches: always,
    produce: rotation_produce,
};

/// Run the chain and return the winning rule's source and presentation.
pub fn evaluate(ctx: &RuleContext<'_>) -> (StatusSource, Presentation) {
    RULES
        .iter()
        .find_map(|rule| rule.apply(ctx).map(|p| (rule.source, p)))
        .unwrap_or_else(|| (FALLBACK.source, (FALLBACK.produce)(ctx)))
}

fn always(_ctx: &RuleContext<'_>) -> bool {
    true
}

fn explicit_text<'a>(ctx: &RuleContext<'a>) -> Option<&'a str> {
    ctx.signal
        .explicit_status
        .as_ref()
        .map(|status| status.text.as_str())
        .filter(|text| !text.is_empty())
}

fn permission_matches(ctx: &RuleContext<'_>) -> bool {
    explicit_text(ctx) == Some(PERMISSION_SENTINEL)
}

fn permission_produce(_ctx: &RuleContext<'_>) -> Presentation {
    Presentation::new("Waiting for you", StatusIcon::Pause, ColorTag::Warning)
}

fn explicit_matches(ctx: &RuleContext<'_>) -> bool {
    explicit_text(ctx).is_some()
}

fn explicit_produce(ctx: &RuleContext<'_>) -> Presentation {
    match &ctx.signal.explicit_status {
        Some(status) => Presentation::new(
            status.text.clone(),
            StatusIcon::from_glyph(status.icon.as_deref()),
            status.color.unwrap_or_default(),
        ),
        None => rotation_produce(ctx),
    }
}

fn tool_matches(ctx: &RuleContext<'_>) -> bool {
    ctx.signal.active_tool.is_some()
}

fn tool_produce(ctx: &RuleContext<'_>) -> Presentation {
    let (name, input) = match &ctx.signal.active_tool {
        Some(tool) => (tool.name.trim(), tool.input.as_ref()),
        None => ("", None),
    };
    let name = if name.is_empty() { "Tool" } else { name };
    let summary = input.map(summarize_tool_input).unwrap_or_default();
    let label = if summary.is_empty() {
        format!("Using {name}")
    } else {
        format!("{name}: {summary}")
    };
    Presentation::new(label, StatusIcon::Tool, ColorTag::Tool)
}

/// Shorten tool input for display.
///
/// The input is serialized compactly, braces and quotes are removed, at
/// most 40 characters are kept, and anything over 30 is cut to 30 plus
/// `...`. Null input yields an empty summary.
pub fn summarize_tool_input(input: &Value) -> String {
    if input.is_null() {
        return String::new();
    }
    let compact = serde_json::to_string(input).unwrap_or_default();
    let stripped: String = compact
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .take(TOOL_INPUT_MAX_CHARS)
        .collect();
    if stripped.chars().count() > TOOL_INPUT_DISPLAY_CHARS {
        let mut cut: String = stripped.chars().take(TOOL_INPUT_DISPLAY_CHARS).collect();
        cut.push_str("...");
        cut
    } else {
        stripped
    }
}

fn silence_matches(ctx: &RuleContext<'_>) -> bool {
    ctx.silent_secs > ctx.config.silence_threshold_secs
        && ctx.elapsed_secs >= ctx.config.silence_min_elapsed_secs
}

fn silence_produce(_ctx: &RuleContext<'_>) -> Presentation {
    Presentation::new(
        "Waiting for response...",
        StatusIcon::Hourglass,
        ColorTag::Pending,
    )
}

fn startup_matches(ctx: &RuleContext<'_>) -> bool {
    ctx.elapsed_secs < ctx.config.startup_grace_secs
}

fn startup_produce(ctx: &RuleContext<'_>) -> Presentation {
    Presentation::new(
        format!("{} is thinking", provider_label(&ctx.signal.provider)),
        StatusIcon::Thought,
        ColorTag::Accent,
    )
}

/// Display name of a provider; unknown providers are shown verbatim.
pub fn provider_label(provider: &str) -> &str {
    match provider {
        "claude" => "Claude",
        "cursor" => "Cursor",
        "codex" => "Codex",
        other => other,
    }
}

fn rotation_produce(ctx: &RuleContext<'_>) -> Presentation {
    Presentation::new(
        rotation_word(ctx.elapsed_secs, ctx.config.rotation_period_secs),
        StatusIcon::Spinner,
        ColorTag::Accent,
    )
}

/// Action word shown after `elapsed` seconds.
pub fn rotation_word(elapsed: u64, period_secs: u64) -> &'static str {
    let words = [
        "Thinking",
        "Processing",
        "Analyzing",
        if elapsed > STILL_WORKING_AFTER_SECS {
            "Still working"
        } else {
            "Working"
        },
        if elapsed > ALMOST_THERE_AFTER_SECS {
            "Almost there"
        } else {
            "Computing"
        },
    ];
    let index = (elapsed / period_secs.max(1)) as usize % words.len();
    words[index]
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wayfile_core::{ActiveTool, ExplicitStatus, TokenUsage};

    use super::*;

    fn ctx<'a>(
        signal: &'a StatusSignal,
        elapsed_secs: u64,
        silent_secs: u64,
        config: &'a StatusConfig,
    ) -> RuleContext<'a> {
        RuleContext {
            signal,
            elapsed_secs,
            silent_secs,
            config,
        }
    }

    #[test]
    fn test_permission_beats_tool_and_caller_styling() {
        let config = StatusConfig::default();
        let status = ExplicitStatus {
            text: PERMISSION_SENTINEL.to_string(),
            icon: Some("🚀".to_string()),
            color: Some(ColorTag::Success),
            can_interrupt: None,
        };
        let signal = StatusSignal::active()
            .with_explicit_status(status)
            .with_active_tool(ActiveTool::new("bash"));

        let (source, p) = evaluate(&ctx(&signal, 5, 0, &config));
        assert_eq!(source, StatusSource::PermissionWait);
        assert_eq!(p.label, "Waiting for you");
        assert_eq!(p.icon, StatusIcon::Pause);
        assert_eq!(p.color, ColorTag::Warning);
    }

    #[test]
    fn test_explicit_verbatim_with_defaults() {
        let config = StatusConfig::default();
        let signal = StatusSignal::active().with_explicit_status(ExplicitStatus::text("Compacting"));
        let (source, p) = evaluate(&ctx(&signal, 50, 50, &config));
        assert_eq!(source, StatusSource::Explicit);
        assert_eq!(p.label, "Compacting");
        assert_eq!(p.icon, StatusIcon::Spinner);
        assert_eq!(p.color, ColorTag::Accent);
    }

    #[test]
    fn test_empty_explicit_falls_through() {
        let config = StatusConfig::default();
        let signal = StatusSignal::active().with_explicit_status(ExplicitStatus::text(""));
        let (source, _) = evaluate(&ctx(&signal, 1, 0, &config));
        assert_eq!(source, StatusSource::Startup);
    }

    #[test]
    fn test_tool_label_with_escaped_quote() {
        let config = StatusConfig::default();
        let tool = ActiveTool::new("grep").with_input(json!({"pattern": "foo\"bar"}));
        let signal = StatusSignal::active().with_active_tool(tool);

        let (source, p) = evaluate(&ctx(&signal, 0, 0, &config));
        assert_eq!(source, StatusSource::ActiveTool);
        assert_eq!(p.label, "grep: pattern:foo\\bar");
        assert_eq!(p.icon, StatusIcon::Tool);
        assert_eq!(p.color, ColorTag::Tool);
    }

    #[test]
    fn test_tool_without_input() {
        let config = StatusConfig::default();
        let signal = StatusSignal::active().with_active_tool(ActiveTool::new(""));
        let (_, p) = evaluate(&ctx(&signal, 0, 0, &config));
        assert_eq!(p.label, "Using Tool");

        let tool = ActiveTool::new("Read").with_input(json!({}));
        let signal = StatusSignal::active().with_active_tool(tool);
        let (_, p) = evaluate(&ctx(&signal, 0, 0, &config));
        assert_eq!(p.label, "Using Read");
    }

    #[test]
    fn test_summarize_truncates() {
        let input = json!({"file_path": "/home/user/projects/app/src/components/Button.tsx"});
        let summary = summarize_tool_input(&input);
        assert_eq!(summary, "file_path:/home/user/projects/...");
        assert_eq!(summary.chars().count(), 33);

        assert_eq!(summarize_tool_input(&json!({"a": 1})), "a:1");
        assert_eq!(summarize_tool_input(&Value::Null), "");
    }

    #[test]
    fn test_silence_thresholds() {
        let config = StatusConfig::default();
        let signal = StatusSignal::active().with_token_usage(TokenUsage::default());

        assert_eq!(evaluate(&ctx(&signal, 10, 9, &config)).0, StatusSource::Silence);
        assert_eq!(evaluate(&ctx(&signal, 10, 8, &config)).0, StatusSource::Rotation);
        assert_eq!(evaluate(&ctx(&signal, 9, 9, &config)).0, StatusSource::Rotation);

        let (_, p) = evaluate(&ctx(&signal, 12, 12, &config));
        assert_eq!(p.label, "Waiting for response...");
        assert_eq!(p.icon, StatusIcon::Hourglass);
        assert_eq!(p.color, ColorTag::Pending);
    }

    #[test]
    fn test_startup_provider_labels() {
        let config = StatusConfig::default();
        for (provider, label) in [
            ("claude", "Claude is thinking"),
            ("cursor", "Cursor is thinking"),
            ("codex", "Codex is thinking"),
            ("gemini", "gemini is thinking"),
        ] {
            let signal = StatusSignal::active().with_provider(provider);
            let (source, p) = evaluate(&ctx(&signal, 2, 2, &config));
            assert_eq!(source, StatusSource::Startup);
            assert_eq!(p.label, label);
        }
    }

    #[test]
    fn test_rotation_words() {
        assert_eq!(rotation_word(3, 4), "Thinking");
        assert_eq!(rotation_word(4, 4), "Processing");
        assert_eq!(rotation_word(8, 4), "Analyzing");
        assert_eq!(rotation_word(12, 4), "Working");
        assert_eq!(rotation_word(16, 4), "Computing");
        assert_eq!(rotation_word(20, 4), "Thinking");
        assert_eq!(rotation_word(32, 4), "Still working");
        assert_eq!(rotation_word(36, 4), "Almost there");
    }

    #[test]
    fn test_each_rule_is_independent() {
        let config = StatusConfig::default();
        let signal = StatusSignal::active();
        let context = ctx(&signal, 1, 0, &config);
        let matched: Vec<StatusSource> = RULES
            .iter()
            .filter(|rule| (rule.matches)(&context))
            .map(|rule| rule.source)
            .collect();
        assert_eq!(matched, vec![StatusSource::Startup]);
        assert!((FALLBACK.matches)(&context));
    }
}
