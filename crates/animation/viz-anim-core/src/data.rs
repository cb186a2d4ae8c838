//! Canonical animation data model: the portable, serializable tween list.

use serde::{Deserialize, Serialize};

use crate::easing::Ease;
use crate::error::AnimError;
use crate::extension::{AdapterExtension, AdapterExtensions};
use crate::ids::{AnimProperty, AnimationTarget};

/// Wire version tag of [`AnimationSpec`].
pub const SPEC_VERSION: &str = "viz-anim/1";

/// One interpolation instruction. Times are milliseconds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TweenSpec {
    pub target: AnimationTarget,
    pub property: AnimProperty,
    pub to: f64,
    /// Length of the tween; `0` snaps to `to` at `delay`.
    pub duration: f64,
    /// Absolute start time on the timeline.
    #[serde(default)]
    pub delay: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub easing: Option<Ease>,
    /// Explicit start value; when absent it is chained or captured from the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<f64>,
}

impl TweenSpec {
    pub fn new(
        target: AnimationTarget,
        property: AnimProperty,
        to: f64,
        duration: f64,
    ) -> Self {
        Self {
            target,
            property,
            to,
            duration,
            delay: 0.0,
            easing: None,
            from: None,
        }
    }

    pub fn with_delay(mut self, delay: f64) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_easing(mut self, easing: Ease) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn with_from(mut self, from: f64) -> Self {
        self.from = Some(from);
        self
    }

    #[inline]
    pub fn ease(&self) -> Ease {
        self.easing.unwrap_or_default()
    }

    /// `delay + duration`.
    #[inline]
    pub fn end(&self) -> f64 {
        self.delay + self.duration
    }

    fn check(&self) -> Result<(), String> {
        if !self.to.is_finite() {
            return Err(format!("'to' must be finite, got {}", self.to));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(format!(
                "'duration' must be finite and >= 0, got {}",
                self.duration
            ));
        }
        if !self.delay.is_finite() || self.delay < 0.0 {
            return Err(format!(
                "'delay' must be finite and >= 0, got {}",
                self.delay
            ));
        }
        if let Some(from) = self.from {
            if !from.is_finite() {
                return Err(format!("'from' must be finite, got {from}"));
            }
        }
        Ok(())
    }
}

/// The compiled timeline handed from authoring to playback.
///
/// Only `version` and `tweens` are data. Adapter extensions ride along in a
/// separate field that serialization skips; clones share them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnimationSpec {
    pub version: String,
    #[serde(with = "tagged_tweens")]
    pub tweens: Vec<TweenSpec>,
    #[serde(skip)]
    extensions: AdapterExtensions,
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl PartialEq for AnimationSpec {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version && self.tweens == other.tweens
    }
}

impl AnimationSpec {
    pub fn new(tweens: Vec<TweenSpec>) -> Self {
        Self {
            version: SPEC_VERSION.to_string(),
            tweens,
            extensions: AdapterExtensions::default(),
        }
    }

    /// Latest tween end over the whole spec; `0` when empty.
    pub fn total_duration(&self) -> f64 {
        self.tweens.iter().map(TweenSpec::end).fold(0.0, f64::max)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    /// Check finite `to`/`duration`/`delay`/`from` and non-negative times.
    pub fn validate(&self) -> Result<(), AnimError> {
        for (index, tween) in self.tweens.iter().enumerate() {
            tween
                .check()
                .map_err(|reason| AnimError::InvalidTween { index, reason })?;
        }
        Ok(())
    }

    pub fn with_extension(mut self, ext: AdapterExtension) -> Self {
        self.extensions.push(ext);
        self
    }

    pub fn push_extension(&mut self, ext: AdapterExtension) {
        self.extensions.push(ext);
    }

    pub fn extensions(&self) -> &AdapterExtensions {
        &self.extensions
    }

    /// Run every carried extension against a concrete adapter. Returns how many
    /// matched the adapter's type.
    pub fn apply_extensions<A: 'static>(&self, adapter: &mut A) -> usize {
        self.extensions.apply(adapter)
    }
}

/// Each tween is written as `{ "kind": "tween", ... }`.
mod tagged_tweens {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::TweenSpec;

    #[derive(Serialize)]
    #[serde(tag = "kind", rename_all = "lowercase")]
    enum TweenRef<'a> {
        Tween(&'a TweenSpec),
    }

    #[derive(Deserialize)]
    #[serde(tag = "kind", rename_all = "lowercase")]
    enum TweenItem {
        Tween(TweenSpec),
    }

    pub fn serialize<S: Serializer>(tweens: &[TweenSpec], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(tweens.iter().map(TweenRef::Tween))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<TweenSpec>, D::Error> {
        let items = Vec::<TweenItem>::deserialize(d)?;
        Ok(items
            .into_iter()
            .map(|item| match item {
                TweenItem::Tween(t) => t,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tween(delay: f64, duration: f64) -> TweenSpec {
        TweenSpec::new(AnimationTarget::node("a"), AnimProperty::X, 10.0, duration)
            .with_delay(delay)
    }

    #[test]
    fn total_duration_is_latest_end() {
        assert_eq!(AnimationSpec::new(vec![]).total_duration(), 0.0);
        let spec = AnimationSpec::new(vec![tween(0.0, 100.0), tween(300.0, 50.0), tween(50.0, 0.0)]);
        assert_eq!(spec.total_duration(), 350.0);
    }

    #[test]
    fn serializes_with_kind_tag_and_omits_absent_fields() {
        let spec = AnimationSpec::new(vec![tween(0.0, 100.0).with_easing(Ease::EaseOut)]);
        let v = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            v,
            json!({
                "version": "viz-anim/1",
                "tweens": [{
                    "kind": "tween",
                    "target": "node:a",
                    "property": "x",
                    "to": 10.0,
                    "duration": 100.0,
                    "delay": 0.0,
                    "easing": "easeOut"
                }]
            })
        );
        let back: AnimationSpec = serde_json::from_value(v).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn delay_defaults_to_zero_when_missing() {
        let v = json!({
            "version": "viz-anim/1",
            "tweens": [{"kind": "tween", "target": "node:b", "property": "opacity", "to": 1, "duration": 10}]
        });
        let spec: AnimationSpec = serde_json::from_value(v).unwrap();
        assert_eq!(spec.tweens[0].delay, 0.0);
        assert_eq!(spec.tweens[0].ease(), Ease::Linear);
    }

    #[test]
    fn validate_rejects_negative_and_non_finite_times() {
        let bad = AnimationSpec::new(vec![tween(0.0, 10.0), tween(-1.0, 10.0)]);
        match bad.validate() {
            Err(AnimError::InvalidTween { index, .. }) => assert_eq!(index, 1),
            other => panic!("unexpected {other:?}"),
        }
        let bad = AnimationSpec::new(vec![tween(0.0, f64::INFINITY)]);
        assert!(bad.validate().is_err());
        let bad = AnimationSpec::new(vec![tween(0.0, 1.0).with_from(f64::NAN)]);
        assert!(bad.validate().is_err());
        assert!(AnimationSpec::new(vec![tween(5.0, 0.0)]).validate().is_ok());
    }
}
