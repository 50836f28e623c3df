//! Activity status inference.
//!
//! A [`StatusEngine`] folds [`StatusSignal`](wayfile_core::StatusSignal)
//! updates and two clocks into one prioritized [`StatusView`]. The
//! [`StatusDriver`] runs the engine on tokio with its clocks managed by
//! [`StatusTimers`].

mod config;
mod driver;
mod engine;
pub mod rules;
mod timers;
mod view;

pub use config::{StatusConfig, StatusConfigBuilder};
pub use driver::StatusDriver;
pub use engine::{ActivityChange, StatusEngine};
pub use timers::{ClockKind, ClockTick, StatusTimers};
pub use view::{SPINNER_FRAMES, StatusIcon, StatusSource, StatusView, TokenSummary};
