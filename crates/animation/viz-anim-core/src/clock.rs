//! Frame scheduling primitives.
//!
//! The player never blocks or spawns threads. While playing it asks its clock
//! for one frame at a time and the host delivers that frame back through
//! `Player::on_frame` (or `Player::pump` for polled clocks). Cancelling is
//! immediate: a request that is no longer pending is ignored on delivery.

use std::time::Instant;

/// Handle of one requested frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// "Call me back before the next redraw", plus a millisecond time source.
pub trait FrameClock {
    /// Current time in milliseconds. Only differences are meaningful.
    fn now(&self) -> f64;

    fn request_frame(&mut self) -> FrameRequest;

    fn cancel_frame(&mut self, request: FrameRequest);

    /// For polled clocks: hand out the outstanding request once it is due.
    /// Callback-driven clocks deliver frames themselves and keep the default.
    fn take_due(&mut self) -> Option<FrameRequest> {
        None
    }
}

/// Bookkeeping for a single outstanding request.
#[derive(Clone, Debug, Default)]
struct FrameSlot {
    next: u64,
    pending: Option<FrameRequest>,
}

impl FrameSlot {
    fn request(&mut self) -> FrameRequest {
        self.next = self.next.wrapping_add(1);
        let req = FrameRequest(self.next);
        self.pending = Some(req);
        req
    }

    fn cancel(&mut self, request: FrameRequest) {
        if self.pending == Some(request) {
            self.pending = None;
        }
    }
}

/// Manually advanced clock for headless hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct VirtualClock {
    now: f64,
    slot: FrameSlot,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(ms: f64) -> Self {
        Self {
            now: ms,
            ..Self::default()
        }
    }

    /// Move time forward; negative steps are ignored.
    pub fn advance(&mut self, ms: f64) {
        if ms > 0.0 {
            self.now += ms;
        }
    }

    pub fn set_now(&mut self, ms: f64) {
        self.now = ms;
    }

    pub fn pending(&self) -> Option<FrameRequest> {
        self.slot.pending
    }
}

impl FrameClock for VirtualClock {
    fn now(&self) -> f64 {
        self.now
    }

    fn request_frame(&mut self) -> FrameRequest {
        self.slot.request()
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.slot.cancel(request);
    }

    fn take_due(&mut self) -> Option<FrameRequest> {
        self.slot.pending.take()
    }
}

/// Wall-clock source for hosts with their own redraw loop: call
/// `Player::pump` once per redraw.
#[derive(Clone, Debug)]
pub struct SystemClock {
    origin: Instant,
    slot: FrameSlot,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
            slot: FrameSlot::default(),
        }
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<FrameRequest> {
        self.slot.pending
    }
}

impl FrameClock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    fn request_frame(&mut self) -> FrameRequest {
        self.slot.request()
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.slot.cancel(request);
    }

    fn take_due(&mut self) -> Option<FrameRequest> {
        self.slot.pending.take()
    }
}
