// SPDX-License-Identifier: MIT OR Apache-2.0
//! Interactable behaviors for ScenePlay.
//!
//! This crate provides the per-object pointer state machines the sequencer
//! binds onto scene objects for the lifetime of one interaction:
//! - Click: fire an event on click, or animate the object to a marker pose
//! - Drag: axis-clamped dragging with snap-to-slot and return-on-miss
//! - Rotate: pointer-delta rotation toward a target orientation with snap
//!
//! Each binding owns exactly one single-resolution completion signal; the
//! sequencer awaits that signal and never inspects behavior internals.

pub mod binding;
pub mod click;
pub mod drag;
pub mod rotate;
pub mod signal;

pub use binding::{AfterEvent, Behavior, BindingTable, CueSlots};
pub use click::{ClickAction, Clickable};
pub use drag::{DragParams, Draggable};
pub use rotate::{RotateParams, Rotatable, RotationAxis};
pub use signal::{completion, CompletionSignal, CompletionSource, SharedSource, SignalError};
