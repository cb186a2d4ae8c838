//! Viz animation core: compiles fluent authoring calls into a portable tween
//! list and plays it back against a pluggable host adapter.
//!
//! Pipeline: [`AnimationBuilder`] -> [`AnimationSpec`] -> [`compile_tracks`] ->
//! [`resolve_tracks`] -> [`evaluate`], driven in time by [`Player`].
//!
//! The crate is host-agnostic. Geometry, DOM/SVG trees and rendering live
//! behind [`HostAdapter`]; frame scheduling lives behind [`FrameClock`].

pub mod adapter;
pub mod baking;
pub mod builder;
pub mod clock;
pub mod config;
pub mod data;
pub mod easing;
pub mod error;
pub mod events;
pub mod extension;
pub mod ids;
pub mod player;
pub mod registry;
pub mod resolve;
pub mod sampling;
pub mod stored_spec;
pub mod tracks;

// Re-exports for hosts and adapters
pub use adapter::{HostAdapter, MemoryAdapter, Write};
pub use baking::{
    bake_spec, export_baked_json, BakedTimeline, BakedTrack, BakingConfig, MAX_BAKED_FRAMES,
};
pub use builder::{AnimationBuilder, Props, TweenOpts};
pub use clock::{FrameClock, FrameRequest, SystemClock, VirtualClock};
pub use config::Config;
pub use data::{AnimationSpec, TweenSpec, SPEC_VERSION};
pub use easing::Ease;
pub use error::AnimError;
pub use events::PlaybackEvent;
pub use extension::{AdapterExtension, AdapterExtensions};
pub use ids::{AnimProperty, AnimationTarget};
pub use player::{PlaybackState, Player};
pub use registry::{PropertyAccess, RegistryAdapter};
pub use resolve::resolve_tracks;
pub use sampling::{evaluate, sample_track};
pub use stored_spec::{animation_spec_from_value, parse_animation_spec_json};
pub use tracks::{compile_tracks, CompiledTimeline, InternalTween, Track};
