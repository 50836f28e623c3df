//! Display formatting for sizes, timestamps and token counts.

use chrono::{DateTime, Utc};

/// Format a byte size in human-readable form.
pub fn format_size(bytes: u64) -> String {
    humansize::format_size(bytes, humansize::BINARY)
}

/// Format an optional size, using `-` when unknown.
pub fn format_optional_size(bytes: Option<u64>) -> String {
    bytes.map(format_size).unwrap_or_else(|| "-".to_string())
}

/// Format a timestamp relative to `now`.
///
/// Anything older than thirty days is shown as a calendar date.
pub fn format_relative_time(time: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - time).num_seconds();
    if secs < 60 {
        "just now".to_string()
    } else if secs < 3600 {
        format!("{} min ago", secs / 60)
    } else if secs < 86400 {
        format!("{} hours ago", secs / 3600)
    } else if secs < 2_592_000 {
        format!("{} days ago", secs / 86400)
    } else {
        time.format("%Y-%m-%d").to_string()
    }
}

/// Format a token count: thousands get one decimal and a `k` suffix.
pub fn format_tokens(count: u64) -> String {
    if count >= 1000 {
        format!("{:.1}k", count as f64 / 1000.0)
    } else {
        count.to_string()
    }
}

/// Format elapsed seconds the way the status line shows them.
pub fn format_elapsed(secs: u64) -> String {
    format!("{secs}s")
}
