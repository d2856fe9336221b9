// SPDX-License-Identifier: MIT OR Apache-2.0
//! Highlight profiles and the per-object highlight table.
//!
//! A highlight profile is an opaque visual state; the host maps profile
//! names to whatever its outline/glow shader understands. The runtime only
//! assigns profiles, toggles them, and retires them when an interaction
//! finishes.

use crate::clock::FrameClock;
use crate::object::ObjectId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// How long a retired highlight shows its "done" profile before removal
pub const RETIRE_SECONDS: f32 = 0.5;

/// A named visual state for highlighted objects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightProfile {
    /// Profile name, matched by the host's shader setup
    pub name: String,
    /// Tint color, for hosts without a profile of this name
    pub color: [u8; 3],
}

impl HighlightProfile {
    /// Create a profile
    pub fn new(name: impl Into<String>, color: [u8; 3]) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Highlight state of one object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightState {
    /// Whether the highlight is currently visible
    pub enabled: bool,
    /// Assigned profile
    pub profile: HighlightProfile,
}

/// Per-object highlight assignments
#[derive(Debug, Clone, Default)]
pub struct HighlightController {
    states: IndexMap<ObjectId, HighlightState>,
}

impl HighlightController {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign a profile to an object, replacing any existing assignment
    pub fn apply(&mut self, id: ObjectId, profile: HighlightProfile, enabled: bool) {
        self.states.insert(id, HighlightState { enabled, profile });
    }

    /// Show or hide an existing highlight; unassigned objects are ignored
    pub fn set_enabled(&mut self, id: &ObjectId, enabled: bool) {
        if let Some(state) = self.states.get_mut(id) {
            state.enabled = enabled;
        }
    }

    /// Swap the profile of an existing highlight; unassigned objects are ignored
    pub fn set_profile(&mut self, id: &ObjectId, profile: HighlightProfile) {
        if let Some(state) = self.states.get_mut(id) {
            state.profile = profile;
        }
    }

    /// Remove an object's highlight entirely
    pub fn remove(&mut self, id: &ObjectId) -> Option<HighlightState> {
        self.states.shift_remove(id)
    }

    /// Get an object's highlight state
    pub fn state(&self, id: &ObjectId) -> Option<&HighlightState> {
        self.states.get(id)
    }

    /// Whether an object's highlight is assigned and visible
    pub fn is_enabled(&self, id: &ObjectId) -> bool {
        self.states.get(id).is_some_and(|s| s.enabled)
    }

    /// Iterate over all highlight assignments
    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &HighlightState)> {
        self.states.iter()
    }
}

/// Flash the "done" profile briefly, then remove the highlight.
///
/// Fire-and-forget companion to interaction completion; spawn it rather than
/// awaiting it so the sequencer can move on.
pub async fn retire_highlight(
    table: Rc<RefCell<HighlightController>>,
    clock: FrameClock,
    id: ObjectId,
    done: HighlightProfile,
) {
    table.borrow_mut().apply(id, done, true);
    clock.delay(RETIRE_SECONDS).await;
    table.borrow_mut().remove(&id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;

    #[test]
    fn apply_and_toggle() {
        let mut table = HighlightController::new();
        let id = ObjectId::new();
        table.apply(id, HighlightProfile::new("yellow", [255, 210, 60]), true);
        assert!(table.is_enabled(&id));
        table.set_enabled(&id, false);
        assert!(!table.is_enabled(&id));
    }

    #[test]
    fn retirement_removes_after_delay() {
        let mut pool = LocalPool::new();
        let clock = FrameClock::new();
        let table = Rc::new(RefCell::new(HighlightController::new()));
        let id = ObjectId::new();
        table
            .borrow_mut()
            .apply(id, HighlightProfile::new("yellow", [255, 210, 60]), true);

        pool.spawner()
            .spawn_local(retire_highlight(
                table.clone(),
                clock.clone(),
                id,
                HighlightProfile::new("green", [80, 220, 120]),
            ))
            .unwrap();

        pool.run_until_stalled();
        assert_eq!(table.borrow().state(&id).unwrap().profile.name, "green");

        clock.tick(RETIRE_SECONDS);
        pool.run_until_stalled();
        assert!(table.borrow().state(&id).is_none());
    }
}
