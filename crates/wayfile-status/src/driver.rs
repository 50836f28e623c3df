//! Async driver wiring signals and clocks into a status engine.

use tokio::sync::{mpsc, watch};
use tracing::{debug, trace};
use wayfile_core::StatusSignal;

use crate::config::StatusConfig;
use crate::engine::{ActivityChange, StatusEngine};
use crate::timers::{ClockKind, ClockTick, StatusTimers};
use crate::view::StatusView;

/// Owns a [`StatusEngine`], consumes signal updates and publishes every
/// recomputed [`StatusView`] on a watch channel.
///
/// Clocks run only while the task is active. The driver exits when the
/// signal channel closes, stopping any running clocks.
#[derive(Debug)]
pub struct StatusDriver {
    engine: StatusEngine,
    signals: mpsc::Receiver<StatusSignal>,
    views: watch::Sender<StatusView>,
}

impl StatusDriver {
    /// Create a driver and the receiver its views are published on.
    pub fn new(
        config: StatusConfig,
        signals: mpsc::Receiver<StatusSignal>,
    ) -> (Self, watch::Receiver<StatusView>) {
        let (views, rx) = watch::channel(StatusView::hidden());
        let driver = Self {
            engine: StatusEngine::new(config),
            signals,
            views,
        };
        (driver, rx)
    }

    pub fn engine(&self) -> &StatusEngine {
        &self.engine
    }

    /// Run until the signal channel closes.
    pub async fn run(mut self) {
        let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<ClockTick>();
        let mut timers: Option<StatusTimers> = None;
        let mut generation = 0u64;

        loop {
            tokio::select! {
                signal = self.signals.recv() => {
                    let Some(signal) = signal else { break };
                    match self.engine.update_signal(signal) {
                        Some(ActivityChange::Started) => {
                            generation += 1;
                            timers = Some(StatusTimers::start(
                                self.engine.config(),
                                generation,
                                tick_tx.clone(),
                            ));
                        }
                        Some(ActivityChange::Stopped) => {
                            timers = None;
                        }
                        None => {}
                    }
                    self.publish();
                }
                Some(tick) = tick_rx.recv() => {
                    let current = timers.as_ref().map(StatusTimers::generation);
                    if current != Some(tick.generation) {
                        trace!(generation = tick.generation, "Ignoring tick from stopped clocks");
                        continue;
                    }
                    match tick.kind {
                        ClockKind::Elapsed => self.engine.tick_elapsed(),
                        ClockKind::Animation => self.engine.tick_animation(),
                    }
                    self.publish();
                }
            }
        }

        drop(timers);
        self.views.send_replace(StatusView::hidden());
        debug!("Status driver stopped");
    }

    fn publish(&self) {
        let view = self.engine.view();
        self.views.send_if_modified(|current| {
            if *current == view {
                false
            } else {
                *current = view;
                true
            }
        });
    }
}
