//! Identifiers for what is animated (targets) and which channel (properties).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque reference to an animated element, conventionally `"<kind>:<id>"`
/// (`node:a`, `edge:a->b`, `overlay:key`).
///
/// The engine never resolves targets itself; adapters decide what a target means.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimationTarget(String);

impl AnimationTarget {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn node(id: &str) -> Self {
        Self(format!("node:{id}"))
    }

    pub fn edge(id: &str) -> Self {
        Self(format!("edge:{id}"))
    }

    /// Edge target with the conventional `from->to` id.
    pub fn edge_between(from: &str, to: &str) -> Self {
        Self(format!("edge:{from}->{to}"))
    }

    pub fn overlay(key: &str) -> Self {
        Self(format!("overlay:{key}"))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Kind prefix before the first `:`. A target without a colon is all kind.
    pub fn kind(&self) -> &str {
        self.split().0
    }

    /// Id after the first `:` (empty when there is no colon).
    pub fn id(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        self.0.split_once(':').unwrap_or((self.0.as_str(), ""))
    }
}

impl fmt::Display for AnimationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AnimationTarget {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for AnimationTarget {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Animated numeric channel. The core vocabulary is closed; hosts may add any
/// other name through [`AnimProperty::Custom`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnimProperty {
    X,
    Y,
    Opacity,
    Scale,
    Rotation,
    StrokeDashoffset,
    Custom(String),
}

impl AnimProperty {
    pub fn as_str(&self) -> &str {
        match self {
            AnimProperty::X => "x",
            AnimProperty::Y => "y",
            AnimProperty::Opacity => "opacity",
            AnimProperty::Scale => "scale",
            AnimProperty::Rotation => "rotation",
            AnimProperty::StrokeDashoffset => "strokeDashoffset",
            AnimProperty::Custom(name) => name,
        }
    }

    #[inline]
    pub fn is_custom(&self) -> bool {
        matches!(self, AnimProperty::Custom(_))
    }
}

impl From<&str> for AnimProperty {
    fn from(name: &str) -> Self {
        match name {
            "x" => AnimProperty::X,
            "y" => AnimProperty::Y,
            "opacity" => AnimProperty::Opacity,
            "scale" => AnimProperty::Scale,
            "rotation" => AnimProperty::Rotation,
            "strokeDashoffset" => AnimProperty::StrokeDashoffset,
            other => AnimProperty::Custom(other.to_string()),
        }
    }
}

impl From<String> for AnimProperty {
    fn from(name: String) -> Self {
        match AnimProperty::from(name.as_str()) {
            AnimProperty::Custom(_) => AnimProperty::Custom(name),
            core => core,
        }
    }
}

impl From<&String> for AnimProperty {
    fn from(name: &String) -> Self {
        AnimProperty::from(name.as_str())
    }
}

impl From<AnimProperty> for String {
    fn from(prop: AnimProperty) -> Self {
        match prop {
            AnimProperty::Custom(name) => name,
            core => core.as_str().to_string(),
        }
    }
}

impl fmt::Display for AnimProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key under which tweens are grouped into tracks: `target|property`.
pub fn track_key(target: &AnimationTarget, property: &AnimProperty) -> String {
    format!("{}|{}", target.as_str(), property.as_str())
}
