// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scene primitives for ScenePlay.
//!
//! This crate provides the leaf building blocks the interaction runtime is
//! assembled from:
//! - Poses and quaternion/interpolation math
//! - The scene object table and camera rig
//! - Pointer events in world coordinates
//! - Highlight profiles and the per-object highlight table
//! - Fire-and-forget audio cues
//! - The cooperative frame clock and cancellable pose tween
//!
//! ## Architecture
//!
//! Nothing in here talks to an engine. The host mirrors the scene table,
//! camera rig, highlight states and cue log into whatever renders them, and
//! feeds pointer events and frame ticks back in. All waiting elsewhere in
//! ScenePlay bottoms out in [`FrameClock::next_frame`].

pub mod audio;
pub mod camera;
pub mod clock;
pub mod highlight;
pub mod input;
pub mod math;
pub mod object;
pub mod stage;
pub mod tween;

pub use audio::{CuePlayer, PlayedCue};
pub use camera::CameraRig;
pub use clock::{FrameClock, NextFrame};
pub use highlight::{retire_highlight, HighlightController, HighlightProfile, HighlightState};
pub use input::{PointerEvent, PointerPhase};
pub use math::Interpolation;
pub use object::{ObjectId, Pose, Scene, SceneObject};
pub use stage::{Stage, StageAssets};
pub use tween::{tween_pose, CancelToken, TweenOutcome};
