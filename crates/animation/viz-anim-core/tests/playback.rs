use viz_anim_core::{
    AnimProperty, AnimationBuilder, AnimationSpec, AnimationTarget, Ease, MemoryAdapter,
    PlaybackEvent, PlaybackState, Player, TweenOpts, TweenSpec, VirtualClock, Write,
};

fn approx(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

/// A: 0..1200 -> 320, B: 1800..3000 -> 120, both on node:a.x
fn chaining_spec() -> AnimationSpec {
    let mut b = AnimationBuilder::new();
    b.node("a")
        .to([("x", 320.0)], TweenOpts::new(1200.0))
        .unwrap()
        .wait(600.0)
        .to([("x", 120.0)], TweenOpts::new(1200.0))
        .unwrap();
    b.build()
}

fn host_at(x: f64) -> MemoryAdapter {
    MemoryAdapter::new().with_value("node:a", "x", x)
}

fn x_of(p: &Player<MemoryAdapter>) -> f64 {
    p.adapter().value("node:a", "x").expect("node:a.x written")
}

/// it should chain B's start value to A's end value rather than the captured base
#[test]
fn chaining_law() {
    let mut p = Player::new(host_at(120.0), VirtualClock::new());
    p.load(&chaining_spec());
    assert_eq!(p.duration(), 3000.0);

    p.seek(600.0);
    approx(x_of(&p), 220.0, 1e-9);
    p.seek(2400.0);
    approx(x_of(&p), 220.0, 1e-9);
    p.seek(1500.0);
    assert_eq!(x_of(&p), 320.0);
}

/// it should not recapture the host base on later seeks, even though the engine overwrote it
#[test]
fn resolve_happens_once_per_load() {
    let mut p = Player::new(host_at(120.0), VirtualClock::new());
    p.load(&chaining_spec());
    p.seek(1200.0);
    assert_eq!(x_of(&p), 320.0);
    p.seek(0.0);
    assert_eq!(x_of(&p), 120.0);
    p.seek(600.0);
    approx(x_of(&p), 220.0, 1e-9);

    // a fresh load captures whatever the host holds now
    p.seek(1200.0);
    p.load(&chaining_spec());
    assert_eq!(p.tracks()[0].base, 320.0);
    assert_eq!(x_of(&p), 320.0);
}

/// it should produce identical writes for identical seek sequences
#[test]
fn seek_sequence_is_deterministic() {
    let seeks = [0.0, 250.0, 1200.0, 1799.0, 2400.0, 9999.0, -5.0, 600.0];
    let run = || {
        let mut p = Player::new(host_at(120.0), VirtualClock::new());
        p.load(&chaining_spec());
        for t in seeks {
            p.seek(t);
        }
        p.adapter().writes().to_vec()
    };
    let first: Vec<Write> = run();
    assert_eq!(first, run());

    let mut p = Player::new(host_at(120.0), VirtualClock::new());
    p.load(&chaining_spec());
    let mut once = Vec::new();
    for t in seeks {
        p.seek(t);
        once.push(x_of(&p));
    }
    let mut twice = Vec::new();
    for t in seeks {
        p.seek(t);
        twice.push(x_of(&p));
    }
    assert_eq!(once, twice);
}

/// it should clamp seeks into [0, duration] without touching play state
#[test]
fn seek_clamps_and_preserves_state() {
    let mut p = Player::new(host_at(0.0), VirtualClock::new());
    p.load(&chaining_spec());
    p.seek(-100.0);
    assert_eq!(p.time(), 0.0);
    p.seek(1e9);
    assert_eq!(p.time(), 3000.0);
    assert_eq!(p.state(), PlaybackState::Idle);

    p.play();
    p.seek(100.0);
    assert!(p.is_playing());
    p.pause();
    p.seek(200.0);
    assert_eq!(p.state(), PlaybackState::Paused);
    assert_eq!(p.time(), 200.0);
}

/// it should stop at exactly the total duration and leave playing state
#[test]
fn play_to_completion() {
    let mut p = Player::new(host_at(120.0), VirtualClock::new());
    p.load(&chaining_spec());
    p.play();
    assert!(p.is_playing());

    let mut frames = 0;
    while p.is_playing() {
        assert!(p.advance_frame(16.0));
        frames += 1;
        assert!(frames < 1000, "playback never ended");
    }
    assert_eq!(p.time(), 3000.0);
    assert_eq!(p.state(), PlaybackState::Idle);
    assert_eq!(x_of(&p), 120.0);
    assert_eq!(p.pending_frame(), None);
    // nothing left to deliver
    assert!(!p.advance_frame(16.0));
}

/// it should advance time by wall-clock deltas between frames
#[test]
fn frames_advance_by_clock_delta() {
    let mut p = Player::new(host_at(120.0), VirtualClock::starting_at(5_000.0));
    p.load(&chaining_spec());
    p.play();
    p.advance_frame(600.0);
    assert_eq!(p.time(), 600.0);
    approx(x_of(&p), 220.0, 1e-9);

    // a single long frame clamps at the end
    p.advance_frame(10_000.0);
    assert_eq!(p.time(), 3000.0);
    assert!(!p.is_playing());
}

/// it should resume from the paused time, not from when pause happened on the clock
#[test]
fn pause_and_resume_preserve_time() {
    let mut p = Player::new(host_at(0.0), VirtualClock::new());
    p.load(&chaining_spec());
    p.play();
    p.advance_frame(100.0);
    p.pause();
    assert_eq!(p.time(), 100.0);

    // clock keeps running while paused; no frame is pending
    p.clock_mut().advance(5_000.0);
    assert!(!p.pump());
    assert_eq!(p.time(), 100.0);

    p.play();
    p.advance_frame(50.0);
    assert_eq!(p.time(), 150.0);
}

/// it should reset to t=0 and re-apply the resolved start pose on stop
#[test]
fn stop_resets() {
    let mut spec = chaining_spec();
    spec.tweens.push(
        TweenSpec::new(AnimationTarget::node("b"), AnimProperty::Opacity, 1.0, 500.0)
            .with_from(0.2)
            .with_easing(Ease::EaseIn),
    );
    let mut p = Player::new(
        host_at(120.0).with_value("node:b", "opacity", 1.0),
        VirtualClock::new(),
    );
    p.load(&spec);
    p.play();
    p.advance_frame(700.0);
    p.pause();
    p.seek(2000.0);
    p.play();
    p.advance_frame(16.0);

    p.stop();
    assert_eq!(p.time(), 0.0);
    assert!(!p.is_playing());
    assert_eq!(p.state(), PlaybackState::Idle);
    assert_eq!(x_of(&p), 120.0);
    // explicit from wins over the original host value
    assert_eq!(p.adapter().value("node:b", "opacity"), Some(0.2));
    assert!(!p.advance_frame(16.0));
}

/// it should treat an empty timeline as valid and finish on the first frame
#[test]
fn empty_timeline_completes_immediately() {
    let mut p = Player::new(MemoryAdapter::new(), VirtualClock::new());
    p.load(&AnimationSpec::default());
    assert_eq!(p.duration(), 0.0);
    p.play();
    assert!(p.is_playing());
    assert!(p.advance_frame(16.0));
    assert!(!p.is_playing());
    assert_eq!(p.time(), 0.0);
    assert!(p.adapter().writes().is_empty());
}

/// it should flush once per evaluation regardless of track count
#[test]
fn flush_once_per_evaluation() {
    let mut b = AnimationBuilder::new();
    for id in ["a", "b", "c"] {
        b.node(id).at(0.0).to([("x", 1.0), ("y", 2.0)], TweenOpts::new(100.0)).unwrap();
    }
    let mut p = Player::new(MemoryAdapter::new(), VirtualClock::new());
    p.load(&b.build());
    assert_eq!(p.tracks().len(), 6);
    assert_eq!(p.adapter().flush_count(), 1);
    assert_eq!(p.adapter().writes().len(), 6);
    p.seek(50.0);
    assert_eq!(p.adapter().flush_count(), 2);
    assert_eq!(p.adapter().writes().len(), 12);
}

/// it should hold a zero-duration tween's value from its start onward
#[test]
fn zero_duration_snap() {
    let mut b = AnimationBuilder::new();
    b.overlay("badge").at(300.0).to([("opacity", 1.0)], TweenOpts::new(0.0)).unwrap();
    let spec = b.build();
    let mut p = Player::new(
        MemoryAdapter::new().with_value("overlay:badge", "opacity", 0.0),
        VirtualClock::new(),
    );
    p.load(&spec);
    assert_eq!(p.duration(), 300.0);
    p.seek(299.0);
    assert_eq!(p.adapter().value("overlay:badge", "opacity"), Some(0.0));
    p.seek(300.0);
    assert_eq!(p.adapter().value("overlay:badge", "opacity"), Some(1.0));
}

/// it should report the documented event sequence
#[test]
fn events_follow_transitions() {
    let mut p = Player::new(host_at(0.0), VirtualClock::new());
    p.load(&chaining_spec());
    p.play();
    p.advance_frame(100.0);
    p.pause();
    p.seek(2999.0);
    p.play();
    p.advance_frame(10.0);
    p.stop();
    assert_eq!(
        p.drain_events(),
        vec![
            PlaybackEvent::Loaded { duration: 3000.0 },
            PlaybackEvent::Started { time: 0.0 },
            PlaybackEvent::Paused { time: 100.0 },
            PlaybackEvent::Seeked { time: 2999.0 },
            PlaybackEvent::Started { time: 2999.0 },
            PlaybackEvent::Ended { time: 3000.0 },
            PlaybackEvent::Stopped,
        ]
    );
    assert!(p.drain_events().is_empty());
}

/// it should cancel the outstanding frame when a new spec is loaded mid-play
#[test]
fn reload_cancels_playback() {
    let mut p = Player::new(host_at(0.0), VirtualClock::new());
    p.load(&chaining_spec());
    p.play();
    p.advance_frame(500.0);
    let stale = p.pending_frame().expect("frame pending while playing");

    p.load(&chaining_spec());
    assert_eq!(p.state(), PlaybackState::Idle);
    assert_eq!(p.time(), 0.0);
    assert_eq!(p.pending_frame(), None);
    p.on_frame(stale);
    assert_eq!(p.time(), 0.0);
}

/// it should sample without writing via value_at
#[test]
fn value_at_reads_without_writing() {
    let mut p = Player::new(host_at(120.0), VirtualClock::new());
    p.load(&chaining_spec());
    let writes = p.adapter().writes().len();
    let v = p
        .value_at(&AnimationTarget::node("a"), &AnimProperty::X, 2400.0)
        .unwrap();
    approx(v, 220.0, 1e-9);
    assert_eq!(p.adapter().writes().len(), writes);
    assert_eq!(
        p.value_at(&AnimationTarget::node("zzz"), &AnimProperty::X, 0.0),
        None
    );
}

/// it should ignore pause unless playing
#[test]
fn pause_outside_playing_is_a_no_op() {
    let mut p = Player::new(host_at(120.0), VirtualClock::new());
    p.load(&chaining_spec());
    p.drain_events();

    p.pause();
    assert_eq!(p.state(), PlaybackState::Idle);
    assert_eq!(p.pending_frame(), None);

    p.play();
    p.advance_frame(300.0);
    p.pause();
    p.pause();
    assert_eq!(p.state(), PlaybackState::Paused);
    assert_eq!(p.time(), 300.0);
    assert_eq!(
        p.drain_events(),
        vec![
            PlaybackEvent::Started { time: 0.0 },
            PlaybackEvent::Paused { time: 300.0 },
        ]
    );
}

/// it should return a paused player to idle at t=0 on load
#[test]
fn load_while_paused_resets_to_idle() {
    let mut p = Player::new(host_at(120.0), VirtualClock::new());
    p.load(&chaining_spec());
    p.play();
    p.advance_frame(600.0);
    p.pause();
    assert_eq!(p.state(), PlaybackState::Paused);

    p.load(&chaining_spec());
    assert_eq!(p.state(), PlaybackState::Idle);
    assert_eq!(p.time(), 0.0);
    assert_eq!(p.pending_frame(), None);
    // the host now holds 220 from the paused frame; that becomes the new base
    approx(x_of(&p), 220.0, 1e-9);
    assert!(!p.advance_frame(16.0));

    p.play();
    assert!(p.advance_frame(16.0));
    assert_eq!(p.time(), 16.0);
}
