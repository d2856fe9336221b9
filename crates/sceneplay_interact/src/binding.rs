// SPDX-License-Identifier: MIT OR Apache-2.0
//! Behavior bindings: which object currently carries which state machine.
//!
//! Instead of mutating scene objects, the runtime keeps an explicit table of
//! `ObjectId -> Behavior`. A binding lives for one interaction: created when
//! the interaction's item step dispatches, removed when it completes. An
//! object with no binding ignores the pointer entirely.

use crate::click::Clickable;
use crate::drag::Draggable;
use crate::rotate::Rotatable;
use indexmap::IndexMap;
use sceneplay_stage::{ObjectId, PointerEvent, PointerPhase, Stage};
use serde::{Deserialize, Serialize};

/// Resolved audio cue slots for one binding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueSlots {
    /// Cue on pick-up/click
    pub pick: Option<String>,
    /// Cue on place/drop
    pub drop: Option<String>,
}

/// What the router should do with a binding after delivering an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterEvent {
    /// Leave the binding in place
    Keep,
    /// Remove the binding; the object becomes inert
    Unbind,
}

/// One bound behavior: exactly one of the three kinds
pub enum Behavior {
    /// Click state machine
    Click(Clickable),
    /// Drag state machine
    Drag(Draggable),
    /// Rotate state machine
    Rotate(Rotatable),
}

impl Behavior {
    fn on_down(&mut self, stage: &Stage, event: &PointerEvent) -> AfterEvent {
        match self {
            Behavior::Click(b) => b.on_pointer_down(stage, event),
            Behavior::Drag(b) => b.on_pointer_down(stage, event),
            Behavior::Rotate(b) => b.on_pointer_down(stage, event),
        }
    }

    fn on_drag(&mut self, stage: &Stage, event: &PointerEvent) {
        match self {
            Behavior::Click(_) => {}
            Behavior::Drag(b) => b.on_pointer_drag(stage, event),
            Behavior::Rotate(b) => b.on_pointer_drag(stage, event),
        }
    }

    fn on_up(&mut self, stage: &Stage, event: &PointerEvent) {
        match self {
            Behavior::Click(_) => {}
            Behavior::Drag(b) => b.on_pointer_up(stage, event),
            Behavior::Rotate(b) => b.on_pointer_up(stage, event),
        }
    }
}

/// Table of active behavior bindings plus pointer routing state
#[derive(Default)]
pub struct BindingTable {
    bound: IndexMap<ObjectId, Behavior>,
    pressed: Option<ObjectId>,
}

impl BindingTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a behavior to an object, replacing any previous binding
    pub fn bind(&mut self, id: ObjectId, behavior: Behavior) {
        self.bound.insert(id, behavior);
    }

    /// Remove a binding, leaving the object inert
    pub fn unbind(&mut self, id: &ObjectId) -> Option<Behavior> {
        if self.pressed == Some(*id) {
            self.pressed = None;
        }
        self.bound.shift_remove(id)
    }

    /// Whether an object currently has a binding
    pub fn is_bound(&self, id: &ObjectId) -> bool {
        self.bound.contains_key(id)
    }

    /// Number of active bindings
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    /// Whether the table has no bindings
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }

    /// Route a pointer event to the binding it concerns.
    ///
    /// Presses go to the hit object if it is bound and its collider accepts
    /// hits; drags and releases go to whichever object the press landed on.
    pub fn dispatch(&mut self, stage: &Stage, event: &PointerEvent) {
        match event.phase {
            PointerPhase::Down => {
                let Some(hit) = event.hit else { return };
                if !stage.scene.borrow().collider_enabled(&hit) {
                    return;
                }
                let Some(behavior) = self.bound.get_mut(&hit) else {
                    return;
                };
                self.pressed = Some(hit);
                if behavior.on_down(stage, event) == AfterEvent::Unbind {
                    self.bound.shift_remove(&hit);
                    self.pressed = None;
                }
            }
            PointerPhase::Drag => {
                if let Some(id) = self.pressed {
                    if let Some(behavior) = self.bound.get_mut(&id) {
                        behavior.on_drag(stage, event);
                    }
                }
            }
            PointerPhase::Up => {
                if let Some(id) = self.pressed.take() {
                    if let Some(behavior) = self.bound.get_mut(&id) {
                        behavior.on_up(stage, event);
                    }
                }
            }
        }
    }
}
