//! Clock tasks feeding the status engine.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::StatusConfig;

/// Shortest clock period; `interval` panics on zero.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Which clock fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockKind {
    Elapsed,
    Animation,
}

/// A tick from one of the clocks. `generation` identifies the
/// [`StatusTimers`] instance that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    pub kind: ClockKind,
    pub generation: u64,
}

/// The elapsed-seconds and animation clocks of one activity period.
///
/// Both clocks stop when [`stop`](Self::stop) is called or the value is
/// dropped.
#[derive(Debug)]
pub struct StatusTimers {
    generation: u64,
    cancel: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl StatusTimers {
    /// Spawn both clocks. The first tick of each arrives one period after
    /// the start.
    pub fn start(config: &StatusConfig, generation: u64, tx: UnboundedSender<ClockTick>) -> Self {
        let cancel = CancellationToken::new();
        let handles = vec![
            spawn_clock(
                config.elapsed_tick,
                ClockTick {
                    kind: ClockKind::Elapsed,
                    generation,
                },
                tx.clone(),
                cancel.clone(),
            ),
            spawn_clock(
                config.animation_tick,
                ClockTick {
                    kind: ClockKind::Animation,
                    generation,
                },
                tx,
                cancel.clone(),
            ),
        ];
        Self {
            generation,
            cancel,
            handles,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stop(&self) {
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Whether both clock tasks have exited.
    pub fn is_finished(&self) -> bool {
        self.handles.iter().all(JoinHandle::is_finished)
    }
}

impl Drop for StatusTimers {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn spawn_clock(
    period: Duration,
    tick: ClockTick,
    tx: UnboundedSender<ClockTick>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    let period = period.max(MIN_PERIOD);
    tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    if tx.send(tick).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_clocks_tick_independently() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timers = StatusTimers::start(&StatusConfig::default(), 1, tx);

        time::sleep(Duration::from_millis(2100)).await;
        timers.stop();

        let mut elapsed = 0;
        let mut animation = 0;
        while let Ok(tick) = rx.try_recv() {
            assert_eq!(tick.generation, 1);
            match tick.kind {
                ClockKind::Elapsed => elapsed += 1,
                ClockKind::Animation => animation += 1,
            }
        }
        assert_eq!(elapsed, 2);
        assert_eq!(animation, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_stops_clocks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timers = StatusTimers::start(&StatusConfig::default(), 1, tx);
        drop(timers);

        time::sleep(Duration::from_secs(5)).await;
        assert!(rx.try_recv().is_err());
        // Every sender lived in a clock task, so the channel closes once
        // both have exited.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_period_is_clamped() {
        let config = StatusConfig {
            elapsed_tick: Duration::ZERO,
            animation_tick: Duration::ZERO,
            ..StatusConfig::default()
        };
        let (tx, mut rx) = mpsc::unbounded_channel();
        let timers = StatusTimers::start(&config, 7, tx);

        time::sleep(Duration::from_millis(5)).await;
        timers.stop();
        time::sleep(Duration::from_millis(5)).await;

        assert!(timers.is_finished());
        let tick = rx.try_recv().unwrap();
        assert_eq!(tick.generation, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_finishes_tasks() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let timers = StatusTimers::start(&StatusConfig::default(), 3, tx);
        assert!(!timers.is_stopped());
        timers.stop();
        time::sleep(Duration::from_millis(10)).await;
        assert!(timers.is_stopped());
        assert!(timers.is_finished());
        assert_eq!(timers.generation(), 3);
    }
}
