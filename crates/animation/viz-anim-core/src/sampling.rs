//! Evaluator: sample tracks at an absolute time and write through the adapter.
//!
//! Per track, binary-search the latest tween with `start <= t`:
//! - none has begun: the track base;
//! - zero-length tween: snap to `to`;
//! - at or before the start: the resolved `from`;
//! - past the end: `to`, held until the next tween on the track begins;
//! - otherwise eased interpolation `from -> to`.
//!
//! No rounding happens here; snapping is a host concern.

use crate::adapter::HostAdapter;
use crate::easing::{clamp01, lerp};
use crate::tracks::{InternalTween, Track};

/// Start value of a tween, falling back to the explicit `from` or the track
/// base if the resolver has not run.
#[inline]
fn start_value(track: &Track, tween: &InternalTween) -> f64 {
    tween.resolved_from.or(tween.from).unwrap_or(track.base)
}

/// Value of one tween at absolute time `t` (`t >= tween.start` expected).
pub fn sample_tween(track: &Track, tween: &InternalTween, t: f64) -> f64 {
    if tween.duration <= 0.0 {
        return tween.to;
    }
    let local = t - tween.start;
    if local <= 0.0 {
        return start_value(track, tween);
    }
    if local >= tween.duration {
        return tween.to;
    }
    let p = clamp01(local / tween.duration);
    lerp(start_value(track, tween), tween.to, tween.easing.apply(p))
}

/// Effective value of `track` at absolute time `t` (milliseconds).
pub fn sample_track(track: &Track, t: f64) -> f64 {
    match track.active_index(t) {
        None => track.base,
        Some(i) => sample_tween(track, &track.tweens[i], t),
    }
}

/// Write every track's value at `t`, then flush once.
pub fn evaluate<A: HostAdapter + ?Sized>(tracks: &[Track], t: f64, adapter: &mut A) {
    for track in tracks {
        let value = sample_track(track, t);
        adapter.set(&track.target, &track.property, value);
    }
    adapter.flush();
}
