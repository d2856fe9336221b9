// SPDX-License-Identifier: MIT OR Apache-2.0
//! ScenePlay's interaction sequencer.
//!
//! This crate turns authored [`InteractionScript`]s into running scenes: the
//! [`Sequencer`] walks each interaction's step order, binding click/drag/
//! rotate behaviors, moving the camera, and playing animation clips, with
//! every lifecycle boundary gated on a settle-token hook. The
//! [`StageRuntime`] harness owns the cooperative executor the whole thing
//! runs on; the host ticks it once per frame.

pub mod camera;
pub mod hook;
pub mod media;
pub mod runtime;
pub mod script;
pub mod sequencer;

pub use hook::{HookKey, Hooks, InteractionHook, RunHook, SettleToken};
pub use media::{AnimationDriver, TimedMediaDriver, TimelineId};
pub use runtime::StageRuntime;
pub use script::{
    AnimationAction, CameraMove, ExecutionStep, InteractionDefinition, InteractionId,
    InteractionScript, ItemAction, ScriptError, StepDelays,
};
pub use sequencer::{EntryMode, Sequencer, SequencerError};
