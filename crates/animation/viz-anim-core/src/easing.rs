//! Easing curves mapping normalized progress `[0,1]` onto `[0,1]`.

use serde::{Deserialize, Serialize};

/// Interpolation curve applied to a tween's local progress.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ease {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Ease {
    /// Apply the curve. Input is clamped to `[0,1]`; endpoints map to themselves.
    #[inline]
    pub fn apply(self, p: f64) -> f64 {
        let p = clamp01(p);
        match self {
            Ease::Linear => p,
            Ease::EaseIn => p * p,
            Ease::EaseOut => p * (2.0 - p),
            Ease::EaseInOut => {
                if p < 0.5 {
                    2.0 * p * p
                } else {
                    -1.0 + (4.0 - 2.0 * p) * p
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Ease::Linear => "linear",
            Ease::EaseIn => "easeIn",
            Ease::EaseOut => "easeOut",
            Ease::EaseInOut => "easeInOut",
        }
    }

    /// Parse a curve name; accepts camelCase and kebab-case spellings.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Ease::Linear),
            "easeIn" | "ease-in" => Some(Ease::EaseIn),
            "easeOut" | "ease-out" => Some(Ease::EaseOut),
            "easeInOut" | "ease-in-out" => Some(Ease::EaseInOut),
            _ => None,
        }
    }
}

/// Clamp into `[0,1]`; NaN maps to 0.
#[inline]
pub fn clamp01(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Linear interpolation `a + (b - a) * t`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}
