//! Status engine configuration.

use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Thresholds and clock periods of the status engine.
#[derive(Debug, Clone, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
#[serde(default)]
pub struct StatusConfig {
    /// Seconds without token or tool activity before the task counts as
    /// waiting on the backend.
    #[builder(default = "8")]
    pub silence_threshold_secs: u64,

    /// Minimum elapsed seconds before silence is reported at all.
    #[builder(default = "10")]
    pub silence_min_elapsed_secs: u64,

    /// Elapsed seconds during which the provider "is thinking" label shows.
    #[builder(default = "3")]
    pub startup_grace_secs: u64,

    /// Seconds each rotating action word stays on screen.
    #[builder(default = "4")]
    pub rotation_period_secs: u64,

    /// Token limit assumed when the backend reports none.
    #[builder(default = "160_000")]
    pub default_token_limit: u64,

    /// Period of the elapsed-seconds clock.
    #[builder(default = "Duration::from_millis(1000)")]
    pub elapsed_tick: Duration,

    /// Period of the animation clock.
    #[builder(default = "Duration::from_millis(500)")]
    pub animation_tick: Duration,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            silence_threshold_secs: 8,
            silence_min_elapsed_secs: 10,
            startup_grace_secs: 3,
            rotation_period_secs: 4,
            default_token_limit: 160_000,
            elapsed_tick: Duration::from_millis(1000),
            animation_tick: Duration::from_millis(500),
        }
    }
}

impl StatusConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.rotation_period_secs == Some(0) {
            return Err("Rotation period must be at least one second".to_string());
        }
        for tick in [self.elapsed_tick, self.animation_tick].into_iter().flatten() {
            if tick.is_zero() {
                return Err("Clock periods must be non-zero".to_string());
            }
        }
        Ok(())
    }
}

impl StatusConfig {
    pub fn builder() -> StatusConfigBuilder {
        StatusConfigBuilder::default()
    }
}
