//! Player configuration.

use serde::{Deserialize, Serialize};

/// Playback tuning. The defaults reproduce plain wall-clock playback with a
/// `0` base for channels the host cannot report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base value for tracks whose host `get` returns nothing.
    pub fallback_value: f64,
    /// Multiplier applied to frame deltas while playing.
    pub speed: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fallback_value: 0.0,
            speed: 1.0,
        }
    }
}

impl Config {
    /// Speed actually applied: non-finite becomes `1.0`, negative becomes `0.0`.
    pub fn effective_speed(&self) -> f64 {
        if !self.speed.is_finite() {
            1.0
        } else {
            self.speed.max(0.0)
        }
    }

    /// Fallback actually applied: non-finite becomes `0.0`.
    pub fn effective_fallback(&self) -> f64 {
        if self.fallback_value.is_finite() {
            self.fallback_value
        } else {
            0.0
        }
    }
}
