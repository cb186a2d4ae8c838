//! Baking: sample every track of a spec at a fixed frame rate.
//!
//! Uses the same resolver and evaluator as playback, reading base values from
//! `base` but never writing to it.

use serde::{Deserialize, Serialize};

use crate::adapter::HostAdapter;
use crate::data::AnimationSpec;
use crate::ids::{AnimProperty, AnimationTarget};
use crate::resolve::resolve_tracks;
use crate::sampling::sample_track;
use crate::tracks::compile_tracks;

/// Upper bound on samples per track. Windows that would need more frames are
/// baked at the coarser rate that fits, reported in `BakedTimeline::frame_rate`.
pub const MAX_BAKED_FRAMES: usize = 1_000_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakingConfig {
    /// Samples per second.
    pub frame_rate: f64,
    /// Window start (ms).
    pub start_time: f64,
    /// Window end (ms); `None` bakes to the end of the timeline.
    pub end_time: Option<f64>,
    /// Base value for channels the host cannot report.
    pub fallback_value: f64,
}

impl Default for BakingConfig {
    fn default() -> Self {
        Self {
            frame_rate: 60.0,
            start_time: 0.0,
            end_time: None,
            fallback_value: 0.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakedTrack {
    pub target: AnimationTarget,
    pub property: AnimProperty,
    /// One value per frame, first at `start_time`, last at `end_time`.
    pub values: Vec<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BakedTimeline {
    pub frame_rate: f64,
    pub start_time: f64,
    pub end_time: f64,
    pub tracks: Vec<BakedTrack>,
}

impl BakedTimeline {
    pub fn frame_count(&self) -> usize {
        self.tracks.first().map(|t| t.values.len()).unwrap_or(0)
    }
}

/// Bake `spec` over the configured window (inclusive of the end).
pub fn bake_spec<A: HostAdapter + ?Sized>(
    spec: &AnimationSpec,
    base: &A,
    cfg: &BakingConfig,
) -> BakedTimeline {
    let fr = if cfg.frame_rate.is_finite() && cfg.frame_rate > 0.0 {
        cfg.frame_rate
    } else {
        60.0
    };
    let mut compiled = compile_tracks(&spec.tweens);
    resolve_tracks(&mut compiled.tracks, base, cfg.fallback_value);

    let total = compiled.total_duration;
    let start = if cfg.start_time.is_finite() {
        cfg.start_time.clamp(0.0, total)
    } else {
        0.0
    };
    let end = cfg
        .end_time
        .filter(|e| e.is_finite())
        .unwrap_or(total)
        .clamp(start, total);
    let mut step = 1000.0 / fr;
    let intervals = ((end - start) / step).ceil();
    let frame_count = if intervals.is_finite() && intervals < MAX_BAKED_FRAMES as f64 {
        intervals as usize + 1
    } else {
        // spread the capped frame budget evenly over the window
        step = (end - start) / (MAX_BAKED_FRAMES - 1) as f64;
        MAX_BAKED_FRAMES
    };
    let last = frame_count - 1;
    let time_of = |f: usize| {
        if f == last {
            end
        } else {
            (start + f as f64 * step).min(end)
        }
    };

    let tracks = compiled
        .tracks
        .iter()
        .map(|track| BakedTrack {
            target: track.target.clone(),
            property: track.property.clone(),
            values: (0..frame_count).map(|f| sample_track(track, time_of(f))).collect(),
        })
        .collect();

    let frame_rate = if frame_count < MAX_BAKED_FRAMES { fr } else { 1000.0 / step };
    BakedTimeline {
        frame_rate,
        start_time: start,
        end_time: end,
        tracks,
    }
}

/// Export baked data as serde_json::Value.
pub fn export_baked_json(baked: &BakedTimeline) -> serde_json::Value {
    serde_json::to_value(baked).unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::MemoryAdapter;
    use crate::data::TweenSpec;

    #[test]
    fn bakes_inclusive_of_end_and_never_writes() {
        let spec = AnimationSpec::new(vec![TweenSpec::new(
            "node:a".into(),
            "x".into(),
            100.0,
            1000.0,
        )]);
        let host = MemoryAdapter::new().with_value("node:a", "x", 0.0);
        let baked = bake_spec(
            &spec,
            &host,
            &BakingConfig {
                frame_rate: 4.0,
                ..BakingConfig::default()
            },
        );
        assert_eq!(baked.frame_count(), 5);
        assert_eq!(baked.tracks[0].values, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert!(host.writes().is_empty());
        assert_eq!(export_baked_json(&baked)["frame_rate"], 4.0);
    }

    #[test]
    fn huge_frame_rate_is_capped() {
        let spec = AnimationSpec::new(vec![TweenSpec::new(
            "node:a".into(),
            "x".into(),
            100.0,
            1000.0,
        )]);
        let baked = bake_spec(
            &spec,
            &MemoryAdapter::new(),
            &BakingConfig {
                frame_rate: f64::MAX,
                ..BakingConfig::default()
            },
        );
        assert_eq!(baked.frame_count(), MAX_BAKED_FRAMES);
        let values = &baked.tracks[0].values;
        assert_eq!(values[0], 0.0);
        assert_eq!(values[MAX_BAKED_FRAMES - 1], 100.0);
        assert!(baked.frame_rate.is_finite());
        assert!(baked.frame_rate <= 1000.0 * MAX_BAKED_FRAMES as f64);
    }

    #[test]
    fn empty_spec_bakes_a_single_frame_window() {
        let baked = bake_spec(&AnimationSpec::default(), &MemoryAdapter::new(), &BakingConfig::default());
        assert!(baked.tracks.is_empty());
        assert_eq!(baked.end_time, 0.0);
    }
}
