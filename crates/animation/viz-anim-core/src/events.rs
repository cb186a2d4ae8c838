//! Playback events queued by the player.
//!
//! Events are informational: the player never waits on a consumer. Hosts drain
//! them after driving the player (see `Player::drain_events`).

use serde::{Deserialize, Serialize};

/// Discrete playback signals, in the order they happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
#[non_exhaustive]
pub enum PlaybackEvent {
    /// A spec was loaded; `duration` is the compiled timeline length (ms).
    Loaded { duration: f64 },
    Started { time: f64 },
    Paused { time: f64 },
    Seeked { time: f64 },
    Stopped,
    /// The timeline reached its end while playing.
    Ended { time: f64 },
}
