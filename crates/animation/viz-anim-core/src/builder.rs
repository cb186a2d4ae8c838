//! Fluent authoring API compiling into an [`AnimationSpec`].
//!
//! The builder keeps a time cursor and a selected target. Each `to()` emits one
//! tween per numeric property, starting at the cursor, then advances the cursor
//! by the tween duration, so consecutive calls play one after another. `at()` and
//! `wait()` move the cursor explicitly to overlap or reorder.
//!
//! ```
//! use viz_anim_core::{AnimationBuilder, Ease, Props, TweenOpts};
//!
//! let mut b = AnimationBuilder::new();
//! b.node("a")
//!     .to(Props::new().set("x", 320.0), TweenOpts::new(1200.0).easing(Ease::EaseInOut))?
//!     .wait(600.0)
//!     .to([("x", 120.0)], TweenOpts::new(1200.0))?;
//! let spec = b.build();
//! assert_eq!(spec.tweens.len(), 2);
//! assert_eq!(spec.tweens[1].delay, 1800.0);
//! # Ok::<(), viz_anim_core::AnimError>(())
//! ```

use serde_json::Value as JsonValue;

use crate::data::{AnimationSpec, TweenSpec};
use crate::easing::Ease;
use crate::error::AnimError;
use crate::extension::{AdapterExtension, AdapterExtensions};
use crate::ids::{AnimProperty, AnimationTarget};

/// Ordered property bag passed to `to()`. Entries may hold any JSON value;
/// only finite numbers become tweens.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Props {
    entries: Vec<(AnimProperty, JsonValue)>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a numeric entry. Non-finite numbers are kept as hints and skipped later.
    pub fn set(mut self, property: impl Into<AnimProperty>, value: f64) -> Self {
        let value = serde_json::Number::from_f64(value)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null);
        self.entries.push((property.into(), value));
        self
    }

    /// Add an arbitrary (possibly non-numeric) entry.
    pub fn hint(mut self, property: impl Into<AnimProperty>, value: JsonValue) -> Self {
        self.entries.push((property.into(), value));
        self
    }

    /// First numeric value for `property`.
    pub fn number(&self, property: &AnimProperty) -> Option<f64> {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .and_then(|(_, v)| as_finite(v))
    }

    /// Numeric entries in insertion order.
    pub fn numbers(&self) -> impl Iterator<Item = (&AnimProperty, f64)> {
        self.entries
            .iter()
            .filter_map(|(p, v)| as_finite(v).map(|n| (p, n)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn as_finite(v: &JsonValue) -> Option<f64> {
    v.as_f64().filter(|n| n.is_finite())
}

impl From<JsonValue> for Props {
    /// Object entries become properties in source order; any other JSON shape
    /// is an empty bag.
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => Props {
                entries: map
                    .into_iter()
                    .map(|(k, v)| (AnimProperty::from(k), v))
                    .collect(),
            },
            _ => Props::default(),
        }
    }
}

impl<P: Into<AnimProperty>, const N: usize> From<[(P, f64); N]> for Props {
    fn from(items: [(P, f64); N]) -> Self {
        items
            .into_iter()
            .fold(Props::new(), |props, (p, v)| props.set(p, v))
    }
}

impl<P: Into<AnimProperty>> From<Vec<(P, f64)>> for Props {
    fn from(items: Vec<(P, f64)>) -> Self {
        items
            .into_iter()
            .fold(Props::new(), |props, (p, v)| props.set(p, v))
    }
}

/// Per-call tween options.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TweenOpts {
    pub duration: f64,
    pub easing: Option<Ease>,
    /// Explicit start values; used per property when numeric.
    pub from: Props,
}

impl TweenOpts {
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    pub fn easing(mut self, easing: Ease) -> Self {
        self.easing = Some(easing);
        self
    }

    pub fn from(mut self, from: impl Into<Props>) -> Self {
        self.from = from.into();
        self
    }
}

/// Imperative timeline compiler. Never touches a host.
#[derive(Debug, Default)]
pub struct AnimationBuilder {
    cursor: f64,
    target: Option<AnimationTarget>,
    tweens: Vec<TweenSpec>,
    extensions: AdapterExtensions,
}

impl AnimationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&mut self, id: &str) -> &mut Self {
        self.target(AnimationTarget::node(id))
    }

    pub fn edge(&mut self, id: &str) -> &mut Self {
        self.target(AnimationTarget::edge(id))
    }

    /// Select the edge `from->to`.
    pub fn edge_between(&mut self, from: &str, to: &str) -> &mut Self {
        self.target(AnimationTarget::edge_between(from, to))
    }

    pub fn overlay(&mut self, key: &str) -> &mut Self {
        self.target(AnimationTarget::overlay(key))
    }

    pub fn target(&mut self, target: impl Into<AnimationTarget>) -> &mut Self {
        self.target = Some(target.into());
        self
    }

    /// Move the cursor to an absolute time (negative clamps to 0).
    pub fn at(&mut self, ms: f64) -> &mut Self {
        self.cursor = non_negative(ms);
        self
    }

    /// Advance the cursor; never moves it backwards.
    pub fn wait(&mut self, ms: f64) -> &mut Self {
        self.cursor += non_negative(ms);
        self
    }

    #[inline]
    pub fn cursor(&self) -> f64 {
        self.cursor
    }

    pub fn selected(&self) -> Option<&AnimationTarget> {
        self.target.as_ref()
    }

    /// Emit one tween per numeric entry of `props` starting at the cursor, then
    /// advance the cursor by the (clamped) duration.
    ///
    /// Fails when no target is selected or the duration is not finite.
    pub fn to(
        &mut self,
        props: impl Into<Props>,
        opts: TweenOpts,
    ) -> Result<&mut Self, AnimError> {
        let props = props.into();
        let Some(target) = self.target.clone() else {
            let first = props.entries.first().map(|(p, _)| p);
            return Err(AnimError::no_target(first));
        };
        if opts.duration.is_infinite() {
            return Err(AnimError::InvalidDuration {
                duration: opts.duration,
            });
        }
        let duration = non_negative(opts.duration);

        for (property, to) in props.numbers() {
            self.tweens.push(TweenSpec {
                target: target.clone(),
                property: property.clone(),
                to,
                duration,
                delay: self.cursor,
                easing: opts.easing,
                from: opts.from.number(property),
            });
        }
        self.cursor += duration;
        Ok(self)
    }

    /// Attach an extension for adapters of type `A` to the built spec.
    pub fn with_extension<A, F>(&mut self, f: F) -> &mut Self
    where
        A: 'static,
        F: Fn(&mut A) + Send + Sync + 'static,
    {
        self.extensions.push(AdapterExtension::new(f));
        self
    }

    pub fn tweens(&self) -> &[TweenSpec] {
        &self.tweens
    }

    /// Snapshot the captured tweens (and extensions) as a spec. The builder
    /// stays usable.
    pub fn build(&self) -> AnimationSpec {
        let mut spec = AnimationSpec::new(self.tweens.clone());
        for ext in self.extensions.iter() {
            spec.push_extension(ext.clone());
        }
        spec
    }
}

/// `max(0, v)`, mapping NaN to 0.
#[inline]
fn non_negative(v: f64) -> f64 {
    if v > 0.0 {
        v
    } else {
        0.0
    }
}
