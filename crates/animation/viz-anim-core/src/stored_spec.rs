//! JSON wire format of [`AnimationSpec`] (`viz-anim/1`).
//!
//! The engine itself never checks versions; this loader is the consumer-side
//! gate. It rejects unknown versions and specs that break the tween invariant
//! (finite `to`/`duration`/`delay`, non-negative times).

use serde_json::Value as JsonValue;

use crate::data::{AnimationSpec, SPEC_VERSION};
use crate::error::AnimError;

/// Parse and validate a serialized spec.
pub fn parse_animation_spec_json(s: &str) -> Result<AnimationSpec, AnimError> {
    let value: JsonValue = serde_json::from_str(s)?;
    animation_spec_from_value(value)
}

/// Same as [`parse_animation_spec_json`] for an already-parsed JSON value.
pub fn animation_spec_from_value(value: JsonValue) -> Result<AnimationSpec, AnimError> {
    let version = value
        .get("version")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| AnimError::Parse("missing string field 'version'".into()))?;
    if version != SPEC_VERSION {
        return Err(AnimError::UnsupportedVersion {
            found: version.to_string(),
            expected: SPEC_VERSION,
        });
    }
    let spec: AnimationSpec = serde_json::from_value(value)?;
    spec.validate()?;
    Ok(spec)
}

impl AnimationSpec {
    /// Serialize to the wire shape. Extensions are not included.
    pub fn to_json_value(&self) -> JsonValue {
        serde_json::to_value(self).unwrap_or(JsonValue::Null)
    }

    pub fn to_json_string(&self) -> Result<String, AnimError> {
        Ok(serde_json::to_string(self)?)
    }
}
