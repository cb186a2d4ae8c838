//! Playback controller.
//!
//! States: `Unloaded -> Idle <-> Playing <-> Paused`; `stop()` returns to `Idle`
//! at `t = 0`. Every operation before the first `load` is a silent no-op.
//!
//! Time only moves inside `on_frame`, by the clock delta since the previous
//! frame. At most one frame request is outstanding; `load`, `pause` and `stop`
//! cancel it before changing state.

use serde::{Deserialize, Serialize};

use crate::adapter::HostAdapter;
use crate::clock::{FrameClock, FrameRequest, VirtualClock};
use crate::config::Config;
use crate::data::AnimationSpec;
use crate::events::PlaybackEvent;
use crate::ids::{AnimProperty, AnimationTarget};
use crate::resolve::resolve_tracks;
use crate::sampling::{evaluate, sample_track};
use crate::tracks::{compile_tracks, CompiledTimeline, Track};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlaybackState {
    Unloaded,
    /// Loaded and not playing: fresh load, after `stop()`, or after the end.
    Idle,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn name(self) -> &'static str {
        match self {
            PlaybackState::Unloaded => "unloaded",
            PlaybackState::Idle => "idle",
            PlaybackState::Playing => "playing",
            PlaybackState::Paused => "paused",
        }
    }
}

/// Drives one compiled timeline against a host adapter.
#[derive(Debug)]
pub struct Player<A, C = VirtualClock> {
    cfg: Config,
    adapter: A,
    clock: C,
    timeline: Option<CompiledTimeline>,
    /// Start values resolved for the current load.
    resolved: bool,
    state: PlaybackState,
    time: f64,
    last_frame: f64,
    pending: Option<FrameRequest>,
    events: Vec<PlaybackEvent>,
}

impl<A: HostAdapter, C: FrameClock> Player<A, C> {
    pub fn new(adapter: A, clock: C) -> Self {
        Self::with_config(adapter, clock, Config::default())
    }

    pub fn with_config(adapter: A, clock: C, cfg: Config) -> Self {
        Self {
            cfg,
            adapter,
            clock,
            timeline: None,
            resolved: false,
            state: PlaybackState::Unloaded,
            time: 0.0,
            last_frame: 0.0,
            pending: None,
            events: Vec::new(),
        }
    }

    /// Replace the timeline, reset to `t = 0` and show the initial pose.
    ///
    /// Adapter extensions carried by `spec` are not applied here; see
    /// `load_extended`.
    pub fn load(&mut self, spec: &AnimationSpec) {
        if !spec.extensions().is_empty() {
            log::debug!(
                "load: ignoring {} adapter extension(s); use load_extended to apply them",
                spec.extensions().len()
            );
        }
        self.load_timeline(spec);
    }

    fn load_timeline(&mut self, spec: &AnimationSpec) {
        self.cancel_pending();
        let compiled = compile_tracks(&spec.tweens);
        log::debug!(
            "loading timeline: {} tweens, {} tracks, {} ms",
            spec.tweens.len(),
            compiled.tracks.len(),
            compiled.total_duration
        );
        let duration = compiled.total_duration;
        self.timeline = Some(compiled);
        self.resolved = false;
        self.time = 0.0;
        self.state = PlaybackState::Idle;
        self.events.push(PlaybackEvent::Loaded { duration });
        self.ensure_resolved();
        self.apply(0.0);
    }

    pub fn play(&mut self) {
        if matches!(self.state, PlaybackState::Unloaded | PlaybackState::Playing) {
            return;
        }
        self.ensure_resolved();
        self.state = PlaybackState::Playing;
        self.last_frame = self.clock.now();
        self.pending = Some(self.clock.request_frame());
        log::debug!("play from {} ms", self.time);
        self.events.push(PlaybackEvent::Started { time: self.time });
    }

    /// Deliver a frame requested from the clock. Requests that are no longer
    /// pending (cancelled or superseded) are ignored.
    pub fn on_frame(&mut self, request: FrameRequest) {
        if self.pending != Some(request) || self.state != PlaybackState::Playing {
            log::trace!("ignoring stale frame {:?}", request);
            return;
        }
        self.pending = None;

        let now = self.clock.now();
        let delta = (now - self.last_frame).max(0.0) * self.cfg.effective_speed();
        self.last_frame = now;

        let total = self.duration();
        self.time = (self.time + delta).min(total);
        log::trace!("frame: +{delta} ms -> {} ms", self.time);
        self.apply(self.time);

        if self.time >= total {
            self.state = PlaybackState::Idle;
            log::debug!("playback ended at {} ms", self.time);
            self.events.push(PlaybackEvent::Ended { time: self.time });
        } else {
            self.pending = Some(self.clock.request_frame());
        }
    }

    /// Deliver the clock's due frame, if any. Returns whether a frame ran.
    pub fn pump(&mut self) -> bool {
        match self.clock.take_due() {
            Some(request) => {
                let live = self.pending == Some(request);
                self.on_frame(request);
                live
            }
            None => false,
        }
    }

    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.cancel_pending();
        self.state = PlaybackState::Paused;
        log::debug!("paused at {} ms", self.time);
        self.events.push(PlaybackEvent::Paused { time: self.time });
    }

    /// Jump to `ms` (clamped to the timeline) without changing play state.
    pub fn seek(&mut self, ms: f64) {
        if self.state == PlaybackState::Unloaded {
            return;
        }
        self.ensure_resolved();
        let total = self.duration();
        self.time = if ms.is_nan() { 0.0 } else { ms.clamp(0.0, total) };
        self.apply(self.time);
        self.events.push(PlaybackEvent::Seeked { time: self.time });
    }

    /// Back to `Idle` at `t = 0`, re-applying the resolved start pose.
    pub fn stop(&mut self) {
        if self.state == PlaybackState::Unloaded {
            return;
        }
        self.cancel_pending();
        self.state = PlaybackState::Idle;
        self.time = 0.0;
        self.ensure_resolved();
        self.apply(0.0);
        log::debug!("stopped");
        self.events.push(PlaybackEvent::Stopped);
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Current timeline time (ms).
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Total timeline duration (ms); `0` when unloaded or empty.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.timeline
            .as_ref()
            .map(|t| t.total_duration)
            .unwrap_or(0.0)
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn tracks(&self) -> &[Track] {
        self.timeline
            .as_ref()
            .map(|t| t.tracks.as_slice())
            .unwrap_or(&[])
    }

    /// Sample one channel at `t` without writing to the host.
    pub fn value_at(
        &self,
        target: &AnimationTarget,
        property: &AnimProperty,
        t: f64,
    ) -> Option<f64> {
        let track = self.timeline.as_ref()?.track(target, property)?;
        Some(sample_track(track, t))
    }

    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.pending
    }

    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn into_parts(self) -> (A, C) {
        (self.adapter, self.clock)
    }

    fn cancel_pending(&mut self) {
        if let Some(request) = self.pending.take() {
            self.clock.cancel_frame(request);
        }
    }

    /// Capture bases and chain start values, once per load.
    fn ensure_resolved(&mut self) {
        if self.resolved {
            return;
        }
        if let Some(timeline) = self.timeline.as_mut() {
            resolve_tracks(
                &mut timeline.tracks,
                &self.adapter,
                self.cfg.effective_fallback(),
            );
            log::trace!("resolved {} track(s)", timeline.tracks.len());
            self.resolved = true;
        }
    }

    fn apply(&mut self, t: f64) {
        if let Some(timeline) = self.timeline.as_ref() {
            evaluate(&timeline.tracks, t, &mut self.adapter);
        }
    }
}

impl<A: HostAdapter + 'static, C: FrameClock> Player<A, C> {
    /// Apply the spec's adapter extensions to this player's adapter, then load.
    ///
    /// Extensions are matched against `A` itself; for a shared
    /// `Rc<RefCell<_>>` adapter apply them to the inner value before loading.
    pub fn load_extended(&mut self, spec: &AnimationSpec) {
        spec.apply_extensions(&mut self.adapter);
        self.load_timeline(spec);
    }
}

impl<A: HostAdapter> Player<A, VirtualClock> {
    /// Advance the virtual clock by `dt_ms` and deliver the pending frame.
    pub fn advance_frame(&mut self, dt_ms: f64) -> bool {
        self.clock.advance(dt_ms);
        self.pump()
    }
}
