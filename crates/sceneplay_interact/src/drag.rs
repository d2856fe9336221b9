// SPDX-License-Identifier: MIT OR Apache-2.0
//! Drag behavior.
//!
//! The dragged position is clamped to the authored per-axis limits *before*
//! the proximity test, so proximity is always measured against the clamped
//! position. A drop point outside the reachable box can therefore never
//! trigger the snap, which is exactly how the authoring tool expects limits
//! to behave.

use crate::binding::{AfterEvent, CueSlots};
use crate::signal::{resolve_logged, SharedSource};
use sceneplay_stage::math;
use sceneplay_stage::{tween_pose, CancelToken, ObjectId, Pose, PointerEvent, Stage};
use serde::{Deserialize, Serialize};

/// Duration of the snap-to-slot and return-to-start motions
pub const SNAP_SECONDS: f32 = 0.2;

/// Authored drag parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragParams {
    /// Drop slot marker object
    pub drop: ObjectId,
    /// Min and max world X while dragging
    pub x_limits: [f32; 2],
    /// Min and max world Y while dragging
    pub y_limits: [f32; 2],
    /// Min and max world Z while dragging
    pub z_limits: [f32; 2],
    /// Snap distance around the drop point
    pub proximity: f32,
}

impl DragParams {
    /// Parameters with the default reach box and snap distance
    pub fn new(drop: ObjectId) -> Self {
        Self {
            drop,
            x_limits: [-10.0, 10.0],
            y_limits: [-10.0, 10.0],
            z_limits: [-10.0, 10.0],
            proximity: 2.0,
        }
    }

    fn clamp(&self, p: [f32; 3]) -> [f32; 3] {
        [
            p[0].clamp(self.x_limits[0], self.x_limits[1]),
            p[1].clamp(self.y_limits[0], self.y_limits[1]),
            p[2].clamp(self.z_limits[0], self.z_limits[1]),
        ]
    }
}

/// Drag state machine bound to one object
pub struct Draggable {
    object: ObjectId,
    params: DragParams,
    cues: CueSlots,
    source: SharedSource,
    cancel: CancelToken,
    dragging: bool,
    offset: [f32; 3],
    start_position: [f32; 3],
}

impl Draggable {
    /// Create a drag behavior for `object`, remembering its current position
    /// as the return point
    pub fn new(
        stage: &Stage,
        object: ObjectId,
        params: DragParams,
        cues: CueSlots,
        source: SharedSource,
    ) -> Self {
        let start_position = stage
            .scene
            .borrow()
            .pose_of(&object)
            .map(|p| p.position)
            .unwrap_or_default();
        Self {
            object,
            params,
            cues,
            source,
            cancel: CancelToken::new(),
            dragging: false,
            offset: [0.0; 3],
            start_position,
        }
    }

    /// Token that aborts an in-flight snap or return motion
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Whether a drag is currently in progress
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub(crate) fn on_pointer_down(&mut self, stage: &Stage, event: &PointerEvent) -> AfterEvent {
        let Some(pose) = stage.scene.borrow().pose_of(&self.object) else {
            return AfterEvent::Keep;
        };
        self.dragging = true;
        self.offset = [
            pose.position[0] - event.world[0],
            pose.position[1] - event.world[1],
            pose.position[2] - event.world[2],
        ];

        {
            let mut highlights = stage.highlights.borrow_mut();
            highlights.set_profile(&self.object, stage.assets.active.clone());
            highlights.set_enabled(&self.params.drop, true);
        }
        stage
            .audio
            .borrow_mut()
            .play_optional(self.cues.pick.as_deref());
        AfterEvent::Keep
    }

    pub(crate) fn on_pointer_drag(&mut self, stage: &Stage, event: &PointerEvent) {
        if !self.dragging {
            return;
        }

        let raw = [
            event.world[0] + self.offset[0],
            event.world[1] + self.offset[1],
            event.world[2] + self.offset[2],
        ];
        // Clamp first; proximity is tested against the clamped position.
        let clamped = self.params.clamp(raw);

        let drop_pose = {
            let mut scene = stage.scene.borrow_mut();
            if let Some(obj) = scene.get_mut(&self.object) {
                obj.pose.position = clamped;
            }
            scene.pose_of(&self.params.drop)
        };

        let Some(drop_pose) = drop_pose else { return };
        if math::distance(clamped, drop_pose.position) <= self.params.proximity {
            self.stop_dragging(stage);
            self.snap_to_slot(stage, drop_pose);
        }
    }

    pub(crate) fn on_pointer_up(&mut self, stage: &Stage, _event: &PointerEvent) {
        if !self.dragging {
            return;
        }
        self.stop_dragging(stage);

        let (current, drop_pose) = {
            let scene = stage.scene.borrow();
            (
                scene.pose_of(&self.object),
                scene.pose_of(&self.params.drop),
            )
        };
        let Some(current) = current else { return };

        let missed = match drop_pose {
            Some(drop) => math::distance(current.position, drop.position) > self.params.proximity,
            None => true,
        };
        if missed {
            self.return_to_start(stage, current);
        }
    }

    fn stop_dragging(&mut self, stage: &Stage) {
        self.dragging = false;
        stage
            .highlights
            .borrow_mut()
            .set_enabled(&self.params.drop, false);
    }

    /// Animate into the slot; completion resolves the reached-slot signal.
    fn snap_to_slot(&self, stage: &Stage, drop_pose: Pose) {
        let Some(from) = stage.scene.borrow().pose_of(&self.object) else {
            return;
        };
        let to = Pose {
            position: drop_pose.position,
            rotation: drop_pose.rotation,
            scale: from.scale,
        };

        let stage = stage.clone();
        let object = self.object;
        let source = self.source.clone();
        let cancel = self.cancel.clone();
        stage.clone().spawn(async move {
            let outcome = tween_pose(&stage.clock, &cancel, from, to, SNAP_SECONDS, |pose| {
                stage.scene.borrow_mut().set_pose(&object, pose);
            })
            .await;
            if outcome == sceneplay_stage::TweenOutcome::Completed {
                resolve_logged(&source, true);
            }
        });
    }

    /// Animate back to where the drag started and restore the idle profile.
    fn return_to_start(&self, stage: &Stage, current: Pose) {
        let to = Pose {
            position: self.start_position,
            ..current
        };

        let stage = stage.clone();
        let object = self.object;
        let cancel = self.cancel.clone();
        stage.clone().spawn(async move {
            tween_pose(&stage.clock, &cancel, current, to, SNAP_SECONDS, |pose| {
                stage.scene.borrow_mut().set_pose(&object, pose);
            })
            .await;
            stage
                .highlights
                .borrow_mut()
                .set_profile(&object, stage.assets.idle.clone());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::completion;
    use futures::executor::LocalPool;
    use sceneplay_stage::{HighlightProfile, SceneObject, StageAssets};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct DragRig {
        pool: LocalPool,
        stage: Stage,
        item: ObjectId,
        draggable: Draggable,
        source: SharedSource,
        signal: crate::signal::CompletionSignal<bool>,
    }

    fn rig(drop_at: [f32; 3], proximity: f32) -> DragRig {
        let pool = LocalPool::new();
        let stage = Stage::new(pool.spawner(), StageAssets::default());
        let (item, drop) = {
            let mut scene = stage.scene.borrow_mut();
            let item = scene.add_object(SceneObject::new("Gem"));
            scene.set_collider_enabled(&item, true);
            let drop = scene.add_object(SceneObject::at("Socket", drop_at));
            (item, drop)
        };
        stage.highlights.borrow_mut().apply(
            item,
            HighlightProfile::new("yellow", [255, 210, 60]),
            true,
        );
        stage.highlights.borrow_mut().apply(
            drop,
            HighlightProfile::new("yellow", [255, 210, 60]),
            false,
        );

        let params = DragParams {
            drop,
            x_limits: [-5.0, 5.0],
            y_limits: [-5.0, 5.0],
            z_limits: [-5.0, 5.0],
            proximity,
        };
        let (source, signal) = completion();
        let source = Rc::new(RefCell::new(source));
        let draggable = Draggable::new(&stage, item, params, CueSlots::default(), source.clone());
        DragRig {
            pool,
            stage,
            item,
            draggable,
            source,
            signal,
        }
    }

    #[test]
    fn clamp_applies_before_proximity_test() {
        // Drop point outside the reachable box: limits are +/-5 but the drop
        // sits at x=10 with proximity 2.
        let mut rig = rig([10.0, 0.0, 0.0], 2.0);

        rig.draggable
            .on_pointer_down(&rig.stage, &PointerEvent::down(rig.item, [0.0; 3], [0.0; 2]));
        rig.draggable
            .on_pointer_drag(&rig.stage, &PointerEvent::drag([8.5, 0.0, 0.0], [0.0; 2]));

        let pos = rig.stage.scene.borrow().pose_of(&rig.item).unwrap().position;
        assert_eq!(pos, [5.0, 0.0, 0.0]);
        assert!(rig.draggable.is_dragging());
        assert!(!rig.source.borrow().is_resolved());

        // Closer to the drop point in raw coordinates, but the clamp still
        // wins: proximity is measured from x=5, which is 5 away.
        rig.draggable
            .on_pointer_drag(&rig.stage, &PointerEvent::drag([9.0, 0.0, 0.0], [0.0; 2]));
        let pos = rig.stage.scene.borrow().pose_of(&rig.item).unwrap().position;
        assert_eq!(pos, [5.0, 0.0, 0.0]);
        assert!(rig.draggable.is_dragging());
        assert!(!rig.source.borrow().is_resolved());
    }

    #[test]
    fn reaching_proximity_snaps_and_resolves() {
        let mut rig = rig([4.0, 0.0, 0.0], 2.0);

        rig.draggable
            .on_pointer_down(&rig.stage, &PointerEvent::down(rig.item, [0.0; 3], [0.0; 2]));
        assert!(rig.stage.highlights.borrow().is_enabled(
            &rig.draggable.params.drop
        ));

        rig.draggable
            .on_pointer_drag(&rig.stage, &PointerEvent::drag([2.5, 0.0, 0.0], [0.0; 2]));
        assert!(!rig.draggable.is_dragging());

        rig.pool.run_until_stalled();
        for _ in 0..3 {
            rig.stage.clock.tick(0.1);
            rig.pool.run_until_stalled();
        }

        let pos = rig.stage.scene.borrow().pose_of(&rig.item).unwrap().position;
        assert_eq!(pos, [4.0, 0.0, 0.0]);
        assert_eq!(futures::executor::block_on(rig.signal.wait()), Ok(true));
    }

    #[test]
    fn release_outside_proximity_returns_to_start() {
        let mut rig = rig([10.0, 0.0, 0.0], 2.0);

        rig.draggable
            .on_pointer_down(&rig.stage, &PointerEvent::down(rig.item, [0.0; 3], [0.0; 2]));
        rig.draggable
            .on_pointer_drag(&rig.stage, &PointerEvent::drag([3.0, 1.0, 0.0], [0.0; 2]));
        rig.draggable
            .on_pointer_up(&rig.stage, &PointerEvent::up([3.0, 1.0, 0.0], [0.0; 2]));

        rig.pool.run_until_stalled();
        for _ in 0..3 {
            rig.stage.clock.tick(0.1);
            rig.pool.run_until_stalled();
        }

        let pos = rig.stage.scene.borrow().pose_of(&rig.item).unwrap().position;
        assert_eq!(pos, [0.0, 0.0, 0.0]);
        assert!(!rig.source.borrow().is_resolved());
        // Idle profile restored after the return motion.
        assert_eq!(
            rig.stage
                .highlights
                .borrow()
                .state(&rig.item)
                .unwrap()
                .profile
                .name,
            "yellow"
        );
    }
}
