//! Track compiler: groups a flat tween list into per-(target, property) tracks.
//!
//! Tracks keep first-encounter order. Within a track tweens are sorted by start
//! time with a stable sort, so at equal starts the later-declared tween sorts
//! last and wins during evaluation.

use hashbrown::HashMap;

use crate::data::TweenSpec;
use crate::easing::Ease;
use crate::ids::{track_key, AnimProperty, AnimationTarget};

/// A tween placed on the timeline, with its start value once resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct InternalTween {
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub to: f64,
    pub easing: Ease,
    /// Explicit `from` of the source spec, if any.
    pub from: Option<f64>,
    /// Start value fixed by the resolver; `None` until resolved.
    pub resolved_from: Option<f64>,
    /// Position in the source tween list.
    pub insertion_index: usize,
}

impl InternalTween {
    fn from_spec(spec: &TweenSpec, insertion_index: usize) -> Self {
        let start = spec.delay;
        Self {
            start,
            end: start + spec.duration,
            duration: spec.duration,
            to: spec.to,
            easing: spec.ease(),
            from: spec.from,
            resolved_from: None,
            insertion_index,
        }
    }
}

/// All tweens animating one (target, property) pair.
#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    /// `target|property`
    pub key: String,
    pub target: AnimationTarget,
    pub property: AnimProperty,
    /// Host value captured at resolve time.
    pub base: f64,
    pub tweens: Vec<InternalTween>,
}

impl Track {
    fn new(target: AnimationTarget, property: AnimProperty) -> Self {
        Self {
            key: track_key(&target, &property),
            target,
            property,
            base: 0.0,
            tweens: Vec::new(),
        }
    }

    /// Index of the latest tween with `start <= t`, if any has begun.
    #[inline]
    pub fn active_index(&self, t: f64) -> Option<usize> {
        self.tweens
            .partition_point(|tw| tw.start <= t)
            .checked_sub(1)
    }
}

/// Output of [`compile_tracks`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompiledTimeline {
    pub tracks: Vec<Track>,
    /// `max(end)` across every tween; `0` for an empty list.
    pub total_duration: f64,
}

impl CompiledTimeline {
    pub fn track(&self, target: &AnimationTarget, property: &AnimProperty) -> Option<&Track> {
        let key = track_key(target, property);
        self.tracks.iter().find(|t| t.key == key)
    }
}

/// Group, order and measure a tween list. Deterministic for identical input.
pub fn compile_tracks(tweens: &[TweenSpec]) -> CompiledTimeline {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut tracks: Vec<Track> = Vec::new();
    let mut total_duration = 0.0f64;

    for (i, spec) in tweens.iter().enumerate() {
        let tween = InternalTween::from_spec(spec, i);
        total_duration = total_duration.max(tween.end);

        let key = track_key(&spec.target, &spec.property);
        let slot = *index.entry(key).or_insert_with(|| {
            tracks.push(Track::new(spec.target.clone(), spec.property.clone()));
            tracks.len() - 1
        });
        tracks[slot].tweens.push(tween);
    }

    for track in &mut tracks {
        // stable: ties keep insertion order
        track.tweens.sort_by(|a, b| a.start.total_cmp(&b.start));
    }

    CompiledTimeline {
        tracks,
        total_duration,
    }
}
