// SPDX-License-Identifier: MIT OR Apache-2.0
//! Pointer events.
//!
//! The host resolves picking and screen-to-world projection itself and feeds
//! the runtime plain events: which object (if any) was hit on press, where
//! the pointer is in world space at the depth of the dragged object, and
//! where it is on screen. Drag and release events are routed to whichever
//! object the press landed on.

use crate::object::ObjectId;

/// Phase of a pointer event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    /// Button pressed
    Down,
    /// Moved while pressed
    Drag,
    /// Button released
    Up,
}

/// One pointer event in world and screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Event phase
    pub phase: PointerPhase,
    /// Object under the pointer (press events only)
    pub hit: Option<ObjectId>,
    /// Pointer position in world space
    pub world: [f32; 3],
    /// Pointer position in screen space
    pub screen: [f32; 2],
}

impl PointerEvent {
    /// A press over `hit`
    pub fn down(hit: ObjectId, world: [f32; 3], screen: [f32; 2]) -> Self {
        Self {
            phase: PointerPhase::Down,
            hit: Some(hit),
            world,
            screen,
        }
    }

    /// A move while pressed
    pub fn drag(world: [f32; 3], screen: [f32; 2]) -> Self {
        Self {
            phase: PointerPhase::Drag,
            hit: None,
            world,
            screen,
        }
    }

    /// A release
    pub fn up(world: [f32; 3], screen: [f32; 2]) -> Self {
        Self {
            phase: PointerPhase::Up,
            hit: None,
            world,
            screen,
        }
    }
}
