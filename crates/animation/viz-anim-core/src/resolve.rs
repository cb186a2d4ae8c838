//! Value resolver: fixes every tween's start value once per load.
//!
//! Precedence per tween:
//! 1. explicit `from`;
//! 2. the immediately preceding tween's `to`, if that tween ends at or before
//!    this one starts (touching counts);
//! 3. the track base, read once from the host (`fallback` when the host has none).
//!
//! Only the immediate predecessor is consulted. If it overlaps, the tween falls
//! back to the base even when an earlier tween would have chained.

use crate::adapter::HostAdapter;
use crate::tracks::Track;

/// Resolve start values of every track against the host.
pub fn resolve_tracks<A: HostAdapter + ?Sized>(tracks: &mut [Track], adapter: &A, fallback: f64) {
    for track in tracks.iter_mut() {
        let captured = adapter.get(&track.target, &track.property);
        if captured.is_none() {
            log::trace!("no host value for {}, using {fallback}", track.key);
        }
        track.base = captured.unwrap_or(fallback);
        resolve_track(track);
    }
}

/// Resolve one track whose `base` is already set.
pub fn resolve_track(track: &mut Track) {
    let base = track.base;
    let mut prior: Option<(f64, f64)> = None; // (end, to)
    for tween in track.tweens.iter_mut() {
        let from = match (tween.from, prior) {
            (Some(explicit), _) => explicit,
            (None, Some((end, to))) if end <= tween.start => to,
            _ => base,
        };
        tween.resolved_from = Some(from);
        prior = Some((tween.end, tween.to));
    }
}
