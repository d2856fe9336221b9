// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rotate behavior.
//!
//! While the pointer is held, horizontal or vertical pointer motion turns the
//! object about a single world axis at a fixed angular speed. The object
//! snaps to the authored target orientation as soon as it comes within the
//! snap tolerance; there is no timed tween, the snap is instantaneous.

use crate::binding::{AfterEvent, CueSlots};
use crate::signal::{resolve_logged, SharedSource};
use sceneplay_stage::math;
use sceneplay_stage::{retire_highlight, ObjectId, PointerEvent, Stage};
use serde::{Deserialize, Serialize};

/// Orientations closer than this to the target snap and complete
pub const SNAP_DEGREES: f32 = 1.0;

/// Pointer deltas smaller than this are ignored
const DEAD_ZONE: f32 = 0.1;

/// Which world axis the object turns about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationAxis {
    /// Turn about world X, driven by vertical pointer motion
    X,
    /// Turn about world Y, driven by horizontal pointer motion
    Y,
}

impl RotationAxis {
    fn vector(self) -> [f32; 3] {
        match self {
            RotationAxis::X => [1.0, 0.0, 0.0],
            RotationAxis::Y => [0.0, 1.0, 0.0],
        }
    }
}

/// Authored rotation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotateParams {
    /// Target orientation as euler angles in degrees
    pub target_euler: [f32; 3],
    /// Angular speed in degrees per second
    pub speed: f32,
    /// Axis the object turns about
    pub axis: RotationAxis,
    /// Optional indicator object highlighted while rotating
    pub indicator: Option<ObjectId>,
}

impl RotateParams {
    /// Parameters with the default angular speed
    pub fn new(target_euler: [f32; 3], axis: RotationAxis) -> Self {
        Self {
            target_euler,
            speed: 500.0,
            axis,
            indicator: None,
        }
    }
}

/// Rotate state machine bound to one object
pub struct Rotatable {
    object: ObjectId,
    params: RotateParams,
    cues: CueSlots,
    source: SharedSource,
    target: [f32; 4],
    rotating: bool,
    last_screen: [f32; 2],
}

impl Rotatable {
    /// Create a rotate behavior for `object`
    pub fn new(
        object: ObjectId,
        params: RotateParams,
        cues: CueSlots,
        source: SharedSource,
    ) -> Self {
        let target = math::quat_from_euler(params.target_euler);
        Self {
            object,
            params,
            cues,
            source,
            target,
            rotating: false,
            last_screen: [0.0, 0.0],
        }
    }

    /// Whether a rotation is currently in progress
    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    pub(crate) fn on_pointer_down(&mut self, stage: &Stage, event: &PointerEvent) -> AfterEvent {
        let Some(pose) = stage.scene.borrow().pose_of(&self.object) else {
            return AfterEvent::Keep;
        };
        // Already at the target orientation; nothing to rotate.
        if math::quat_angle(pose.rotation, self.target) < 1e-3 {
            return AfterEvent::Keep;
        }
        self.rotating = true;
        self.last_screen = event.screen;

        {
            let mut highlights = stage.highlights.borrow_mut();
            highlights.set_profile(&self.object, stage.assets.active.clone());
            if let Some(indicator) = self.params.indicator {
                highlights.set_enabled(&indicator, true);
            }
        }
        stage
            .audio
            .borrow_mut()
            .play_optional(self.cues.pick.as_deref());
        AfterEvent::Keep
    }

    pub(crate) fn on_pointer_drag(&mut self, stage: &Stage, event: &PointerEvent) {
        if !self.rotating {
            return;
        }

        let delta = match self.params.axis {
            RotationAxis::Y => event.screen[0] - self.last_screen[0],
            RotationAxis::X => event.screen[1] - self.last_screen[1],
        };
        self.last_screen = event.screen;
        if delta.abs() < DEAD_ZONE {
            return;
        }

        let degrees = self.params.speed * delta.signum() * stage.clock.delta();
        let step = math::quat_about_axis(self.params.axis.vector(), degrees);

        let rotation = {
            let mut scene = stage.scene.borrow_mut();
            let Some(obj) = scene.get_mut(&self.object) else {
                return;
            };
            // World-axis rotation, so the step pre-multiplies.
            obj.pose.rotation = math::normalize(math::quat_mul(step, obj.pose.rotation));
            obj.pose.rotation
        };

        if math::quat_angle(rotation, self.target) < SNAP_DEGREES {
            self.complete(stage);
        }
    }

    pub(crate) fn on_pointer_up(&mut self, stage: &Stage, _event: &PointerEvent) {
        if !self.rotating {
            return;
        }
        self.rotating = false;

        let mut highlights = stage.highlights.borrow_mut();
        highlights.set_profile(&self.object, stage.assets.idle.clone());
        if let Some(indicator) = self.params.indicator {
            highlights.set_enabled(&indicator, false);
        }
    }

    /// Snap to the exact target and resolve
    fn complete(&mut self, stage: &Stage) {
        self.rotating = false;

        {
            let mut scene = stage.scene.borrow_mut();
            if let Some(obj) = scene.get_mut(&self.object) {
                obj.pose.rotation = self.target;
            }
            scene.set_collider_enabled(&self.object, false);
        }
        if let Some(indicator) = self.params.indicator {
            stage.highlights.borrow_mut().set_enabled(&indicator, false);
        }
        stage
            .audio
            .borrow_mut()
            .play_optional(self.cues.drop.as_deref());
        stage.spawn(retire_highlight(
            stage.highlights.clone(),
            stage.clock.clone(),
            self.object,
            stage.assets.done.clone(),
        ));
        resolve_logged(&self.source, true);
    }
}
