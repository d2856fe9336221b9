// SPDX-License-Identifier: MIT OR Apache-2.0
//! Authored interaction scripts.
//!
//! A script is the designer-facing data: an ordered list of interaction
//! definitions, persisted as RON. Definitions are immutable at runtime; the
//! sequencer reads them through `Rc` and never writes back.

use crate::media::TimelineId;
use sceneplay_interact::{ClickAction, CueSlots, DragParams, RotateParams};
use sceneplay_stage::ObjectId;
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

/// Unique identifier for interaction definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InteractionId(pub Uuid);

impl InteractionId {
    /// Create a new random interaction ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for InteractionId {
    fn default() -> Self {
        Self::new()
    }
}

/// One step kind in an interaction's execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionStep {
    /// The pointer-driven item interaction
    Item,
    /// The camera move
    Camera,
    /// Timeline or clip playback
    Animation,
}

/// The item sub-action, one kind per interaction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemAction {
    /// Click the target
    Click(ClickAction),
    /// Drag the target into a slot
    Drag(DragParams),
    /// Rotate the target to an orientation
    Rotate(RotateParams),
}

/// The camera sub-action: move to a marker, hold, and return unless locked
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraMove {
    /// Marker object whose pose is the destination
    pub end: ObjectId,
    /// Outbound (and return) motion duration in seconds
    pub move_duration: f32,
    /// Hold time at the destination before returning
    pub return_duration: f32,
    /// Stay at the destination instead of returning
    pub locked: bool,
}

/// The animation sub-action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AnimationAction {
    /// Play an authored timeline
    Timeline {
        /// Timeline to play
        timeline: TimelineId,
    },
    /// Play a named clip on an object
    Clip {
        /// Object the clip animates
        target: ObjectId,
        /// Clip name
        clip: String,
    },
}

/// Post-completion delays per step kind, in seconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StepDelays {
    /// After the item step's hook settled
    pub item: f32,
    /// After the camera step's hook settled
    pub camera: f32,
    /// After the animation step's hook settled
    pub animation: f32,
}

/// One authored unit of behavior.
///
/// Sub-actions are optional; a step in the execution order whose sub-action
/// is absent is skipped entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionDefinition {
    /// Unique interaction ID, also the key for its hooks
    pub id: InteractionId,
    /// Display name
    pub name: String,
    /// Object the item sub-action binds to
    pub target: Option<ObjectId>,
    /// Item sub-action
    pub item: Option<ItemAction>,
    /// Camera sub-action
    pub camera: Option<CameraMove>,
    /// Animation sub-action
    pub animation: Option<AnimationAction>,
    /// Step order; each step kind at most once
    pub execution_order: Vec<ExecutionStep>,
    /// Post-completion delays
    pub delays: StepDelays,
    /// Audio cue overrides; empty slots fall back to the stage cues
    pub cues: CueSlots,
}

impl InteractionDefinition {
    /// Create a definition with the default step order and no sub-actions
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: InteractionId::new(),
            name: name.into(),
            target: None,
            item: None,
            camera: None,
            animation: None,
            execution_order: vec![
                ExecutionStep::Item,
                ExecutionStep::Camera,
                ExecutionStep::Animation,
            ],
            delays: StepDelays::default(),
            cues: CueSlots::default(),
        }
    }

    /// Check the definition's invariants
    pub fn validate(&self) -> Result<(), ScriptError> {
        for (i, step) in self.execution_order.iter().enumerate() {
            if self.execution_order[..i].contains(step) {
                return Err(ScriptError::DuplicateStep {
                    interaction: self.name.clone(),
                    step: *step,
                });
            }
        }
        Ok(())
    }
}

/// Script data errors
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    /// An execution order lists the same step kind twice
    #[error("interaction '{interaction}' lists step {step:?} more than once")]
    DuplicateStep {
        /// Offending interaction name
        interaction: String,
        /// Repeated step kind
        step: ExecutionStep,
    },
    /// The script was written by an incompatible format version
    #[error("unsupported script format version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version found in the file
        found: u32,
        /// Version this build reads
        expected: u32,
    },
}

/// A named, versioned list of interaction definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionScript {
    /// Script name
    pub name: String,
    /// Format version for compatibility
    pub version: u32,
    /// Interactions in authored order
    pub interactions: Vec<InteractionDefinition>,
}

impl InteractionScript {
    /// Current script format version
    pub const FORMAT_VERSION: u32 = 1;

    /// Create an empty script
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Self::FORMAT_VERSION,
            interactions: Vec::new(),
        }
    }

    /// Append a definition, returning its ID
    pub fn add(&mut self, definition: InteractionDefinition) -> InteractionId {
        let id = definition.id;
        self.interactions.push(definition);
        id
    }

    /// Check version compatibility and every definition's invariants
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.version != Self::FORMAT_VERSION {
            return Err(ScriptError::UnsupportedVersion {
                found: self.version,
                expected: Self::FORMAT_VERSION,
            });
        }
        for definition in &self.interactions {
            definition.validate()?;
        }
        Ok(())
    }

    /// Serialize to RON format
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from RON format
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }

    /// Save the script to a file
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let ron_str = self
            .to_ron()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, ron_str)
    }

    /// Load a script from a file
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron(&contents)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ron_roundtrip_preserves_definitions() {
        let mut script = InteractionScript::new("intro");
        let mut def = InteractionDefinition::new("open the chest");
        def.target = Some(ObjectId::new());
        def.item = Some(ItemAction::Click(ClickAction::FireEvent));
        def.camera = Some(CameraMove {
            end: ObjectId::new(),
            move_duration: 1.0,
            return_duration: 0.5,
            locked: false,
        });
        def.delays.item = 0.25;
        def.cues.pick = Some("creak".to_string());
        script.add(def);

        let ron = script.to_ron().unwrap();
        let loaded = InteractionScript::from_ron(&ron).unwrap();
        assert_eq!(loaded, script);
        loaded.validate().unwrap();
    }

    #[test]
    fn duplicate_step_is_rejected() {
        let mut script = InteractionScript::new("bad");
        let mut def = InteractionDefinition::new("twice");
        def.execution_order = vec![
            ExecutionStep::Item,
            ExecutionStep::Camera,
            ExecutionStep::Item,
        ];
        script.add(def);

        assert!(matches!(
            script.validate(),
            Err(ScriptError::DuplicateStep {
                step: ExecutionStep::Item,
                ..
            })
        ));
    }

    #[test]
    fn future_version_is_rejected() {
        let mut script = InteractionScript::new("from the future");
        script.version = InteractionScript::FORMAT_VERSION + 1;
        assert!(matches!(
            script.validate(),
            Err(ScriptError::UnsupportedVersion { .. })
        ));
    }
}
