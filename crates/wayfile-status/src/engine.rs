//! Status inference state machine.

use tracing::debug;
use wayfile_core::StatusSignal;

use crate::config::StatusConfig;
use crate::rules::{self, RuleContext};
use crate::view::{StatusView, TokenSummary};

/// Number of animation phases.
const PHASES: u8 = 4;

/// Activity transition caused by a signal update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityChange {
    Started,
    Stopped,
}

/// Turns activity signals and clock ticks into a [`StatusView`].
///
/// The engine owns no timers; callers advance the clocks with
/// [`tick_elapsed`](Self::tick_elapsed) and
/// [`tick_animation`](Self::tick_animation).
#[derive(Debug, Clone, Default)]
pub struct StatusEngine {
    config: StatusConfig,
    signal: StatusSignal,
    elapsed_secs: u64,
    phase: u8,
    /// Elapsed seconds at the last token or tool activity.
    last_activity_secs: u64,
}

impl StatusEngine {
    pub fn new(config: StatusConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &StatusConfig {
        &self.config
    }

    pub fn signal(&self) -> &StatusSignal {
        &self.signal
    }

    pub fn is_active(&self) -> bool {
        self.signal.is_active
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn phase(&self) -> u8 {
        self.phase
    }

    /// Seconds since token usage or the active tool last changed.
    pub fn silent_secs(&self) -> u64 {
        self.elapsed_secs.saturating_sub(self.last_activity_secs)
    }

    /// Replace the current signal.
    ///
    /// Clocks restart from zero when the task becomes active and are
    /// cleared when it stops.
    pub fn update_signal(&mut self, signal: StatusSignal) -> Option<ActivityChange> {
        let change = match (self.signal.is_active, signal.is_active) {
            (false, true) => {
                self.elapsed_secs = 0;
                self.phase = 0;
                self.last_activity_secs = 0;
                Some(ActivityChange::Started)
            }
            (true, false) => {
                self.elapsed_secs = 0;
                self.phase = 0;
                Some(ActivityChange::Stopped)
            }
            _ => None,
        };

        let has_activity = signal.token_usage.is_some() || signal.active_tool.is_some();
        let activity_changed = signal.token_usage != self.signal.token_usage
            || signal.active_tool != self.signal.active_tool;
        if has_activity && activity_changed {
            self.last_activity_secs = self.elapsed_secs;
        }

        if let Some(change) = change {
            debug!(?change, provider = %signal.provider, "Activity changed");
        }
        self.signal = signal;
        change
    }

    /// Advance the elapsed clock by one second. Ignored while inactive.
    pub fn tick_elapsed(&mut self) {
        if self.signal.is_active {
            self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        }
    }

    /// Advance the animation phase. Ignored while inactive.
    pub fn tick_animation(&mut self) {
        if self.signal.is_active {
            self.phase = (self.phase + 1) % PHASES;
        }
    }

    /// Recompute the current view.
    pub fn view(&self) -> StatusView {
        if !self.signal.is_active {
            return StatusView::hidden();
        }

        let ctx = RuleContext {
            signal: &self.signal,
            elapsed_secs: self.elapsed_secs,
            silent_secs: self.silent_secs(),
            config: &self.config,
        };
        let (source, presentation) = rules::evaluate(&ctx);

        StatusView {
            visible: true,
            label: presentation.label,
            icon: presentation.icon,
            color: presentation.color,
            elapsed_seconds: self.elapsed_secs,
            phase: self.phase,
            token_summary: self
                .signal
                .token_usage
                .as_ref()
                .map(|usage| TokenSummary::from_usage(usage, self.config.default_token_limit)),
            can_interrupt: self
                .signal
                .explicit_status
                .as_ref()
                .and_then(|status| status.can_interrupt)
                != Some(false),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use wayfile_core::{ActiveTool, ExplicitStatus, TokenUsage};

    use super::*;
    use crate::view::{StatusIcon, StatusSource};

    fn ticks(engine: &mut StatusEngine, secs: u64) {
        for _ in 0..secs {
            engine.tick_elapsed();
        }
    }

    #[test]
    fn test_inactive_is_hidden() {
        let engine = StatusEngine::default();
        let view = engine.view();
        assert!(!view.visible);
        assert_eq!(view.source, StatusSource::Hidden);
    }

    #[test]
    fn test_elapsed_resets_on_each_activation() {
        let mut engine = StatusEngine::default();
        assert_eq!(
            engine.update_signal(StatusSignal::active()),
            Some(ActivityChange::Started)
        );
        ticks(&mut engine, 7);
        assert_eq!(engine.elapsed_secs(), 7);

        assert_eq!(
            engine.update_signal(StatusSignal::default()),
            Some(ActivityChange::Stopped)
        );
        assert_eq!(engine.elapsed_secs(), 0);
        ticks(&mut engine, 3);
        assert_eq!(engine.elapsed_secs(), 0);

        assert_eq!(
            engine.update_signal(StatusSignal::active()),
            Some(ActivityChange::Started)
        );
        assert_eq!(engine.elapsed_secs(), 0);
        assert_eq!(engine.update_signal(StatusSignal::active()), None);
    }

    #[test]
    fn test_phase_cycles_mod_four() {
        let mut engine = StatusEngine::default();
        engine.update_signal(StatusSignal::active());
        for _ in 0..6 {
            engine.tick_animation();
        }
        assert_eq!(engine.phase(), 2);
        assert_eq!(engine.elapsed_secs(), 0);
    }

    #[test]
    fn test_startup_then_rotation() {
        let mut engine = StatusEngine::default();
        engine.update_signal(StatusSignal::active().with_provider("cursor"));
        assert_eq!(engine.view().label, "Cursor is thinking");
        assert_eq!(engine.view().icon, StatusIcon::Thought);

        ticks(&mut engine, 4);
        let view = engine.view();
        assert_eq!(view.source, StatusSource::Rotation);
        assert_eq!(view.label, "Processing");
    }

    #[test]
    fn test_silence_after_activity_stops() {
        let mut engine = StatusEngine::default();
        let usage = |used| TokenUsage {
            total_used: Some(used),
            ..Default::default()
        };
        engine.update_signal(StatusSignal::active().with_token_usage(usage(100)));
        ticks(&mut engine, 5);
        engine.update_signal(StatusSignal::active().with_token_usage(usage(200)));
        ticks(&mut engine, 8);
        assert_eq!(engine.silent_secs(), 8);
        assert_eq!(engine.view().source, StatusSource::Rotation);

        engine.tick_elapsed();
        assert_eq!(engine.view().source, StatusSource::Silence);

        engine.update_signal(StatusSignal::active().with_token_usage(usage(300)));
        assert_eq!(engine.silent_secs(), 0);
        assert_ne!(engine.view().source, StatusSource::Silence);
    }

    #[test]
    fn test_unchanged_usage_is_not_activity() {
        let mut engine = StatusEngine::default();
        let signal = StatusSignal::active().with_token_usage(TokenUsage {
            total_used: Some(10),
            ..Default::default()
        });
        engine.update_signal(signal.clone());
        ticks(&mut engine, 12);
        engine.update_signal(signal);
        assert_eq!(engine.view().source, StatusSource::Silence);
    }

    #[test]
    fn test_silence_without_any_activity() {
        let mut engine = StatusEngine::default();
        engine.update_signal(StatusSignal::active());
        ticks(&mut engine, 10);
        assert_eq!(engine.view().source, StatusSource::Silence);
    }

    #[test]
    fn test_tool_beats_silence() {
        let mut engine = StatusEngine::default();
        engine.update_signal(StatusSignal::active().with_active_tool(ActiveTool::new("Bash")));
        ticks(&mut engine, 30);
        let view = engine.view();
        assert_eq!(view.source, StatusSource::ActiveTool);
        assert_eq!(view.label, "Using Bash");
    }

    #[test]
    fn test_can_interrupt() {
        let mut engine = StatusEngine::default();
        engine.update_signal(StatusSignal::active());
        assert!(engine.view().can_interrupt);

        let status = ExplicitStatus {
            can_interrupt: Some(false),
            ..ExplicitStatus::text("Saving")
        };
        engine.update_signal(StatusSignal::active().with_explicit_status(status));
        assert!(!engine.view().can_interrupt);
    }

    #[test]
    fn test_token_summary_in_view() {
        let mut engine = StatusEngine::default();
        engine.update_signal(StatusSignal::active().with_token_usage(TokenUsage {
            total_used: Some(5000),
            ..Default::default()
        }));
        assert_eq!(
            engine.view().token_summary,
            Some(TokenSummary::Budget {
                total: 5000,
                limit: 160_000
            })
        );
    }
}
