//! Error types for authoring and loading timelines.
//!
//! Only authoring mistakes and malformed serialized specs are errors. Runtime
//! gaps on the host side (missing elements, unknown properties) are absorbed
//! where they occur and never surface here.

use thiserror::Error;

use crate::ids::AnimProperty;

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnimError {
    /// `to()` was called before `node()`/`edge()`/`target()` selected anything.
    #[error("no animation target selected before animating '{property}'")]
    NoTargetSelected { property: String },

    #[error("tween duration must be finite, got {duration}")]
    InvalidDuration { duration: f64 },

    #[error("tween #{index} is invalid: {reason}")]
    InvalidTween { index: usize, reason: String },

    #[error("unsupported animation spec version '{found}' (expected '{expected}')")]
    UnsupportedVersion { found: String, expected: &'static str },

    #[error("animation spec parse error: {0}")]
    Parse(String),
}

impl AnimError {
    pub(crate) fn no_target(property: Option<&AnimProperty>) -> Self {
        AnimError::NoTargetSelected {
            property: property.map(|p| p.to_string()).unwrap_or_default(),
        }
    }
}

impl From<serde_json::Error> for AnimError {
    fn from(err: serde_json::Error) -> Self {
        AnimError::Parse(err.to_string())
    }
}
