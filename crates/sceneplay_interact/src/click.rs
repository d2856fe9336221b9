// SPDX-License-Identifier: MIT OR Apache-2.0
//! Click behavior.

use crate::binding::{AfterEvent, CueSlots};
use crate::signal::{resolve_logged, SharedSource};
use sceneplay_stage::{
    retire_highlight, tween_pose, CancelToken, ObjectId, PointerEvent, Stage, TweenOutcome,
};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// What clicking the bound object does
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ClickAction {
    /// Resolve on the click itself; the sequencer then fires the authored
    /// click hook
    FireEvent,
    /// Animate the object to a marker's pose (position, rotation and scale)
    MoveToMarker {
        /// Marker object to move to
        reach: ObjectId,
        /// Motion duration in seconds
        duration: f32,
    },
}

/// Click state machine bound to one object
pub struct Clickable {
    object: ObjectId,
    action: ClickAction,
    cues: CueSlots,
    source: SharedSource,
    cancel: CancelToken,
    moving: Rc<Cell<bool>>,
}

impl Clickable {
    /// Create a click behavior for `object`
    pub fn new(object: ObjectId, action: ClickAction, cues: CueSlots, source: SharedSource) -> Self {
        Self {
            object,
            action,
            cues,
            source,
            cancel: CancelToken::new(),
            moving: Rc::new(Cell::new(false)),
        }
    }

    /// Token that aborts an in-flight move without resolving completion
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub(crate) fn on_pointer_down(&mut self, stage: &Stage, _event: &PointerEvent) -> AfterEvent {
        match self.action {
            ClickAction::FireEvent => {
                stage
                    .scene
                    .borrow_mut()
                    .set_collider_enabled(&self.object, false);
                stage
                    .audio
                    .borrow_mut()
                    .play_optional(self.cues.pick.as_deref());
                stage.spawn(retire_highlight(
                    stage.highlights.clone(),
                    stage.clock.clone(),
                    self.object,
                    stage.assets.done.clone(),
                ));
                resolve_logged(&self.source, true);
                AfterEvent::Unbind
            }
            ClickAction::MoveToMarker { reach, duration } => {
                if self.moving.get() {
                    return AfterEvent::Keep;
                }
                let (from, to) = {
                    let scene = stage.scene.borrow();
                    (scene.pose_of(&self.object), scene.pose_of(&reach))
                };
                let (Some(from), Some(to)) = (from, to) else {
                    // Marker vanished after authoring; nothing to move to.
                    tracing::debug!("click move skipped, marker or object missing");
                    resolve_logged(&self.source, false);
                    return AfterEvent::Keep;
                };

                stage
                    .audio
                    .borrow_mut()
                    .play_optional(self.cues.pick.as_deref());
                self.moving.set(true);

                let stage = stage.clone();
                let object = self.object;
                let cues = self.cues.clone();
                let source = self.source.clone();
                let cancel = self.cancel.clone();
                let moving = self.moving.clone();
                stage.clone().spawn(async move {
                    let outcome =
                        tween_pose(&stage.clock, &cancel, from, to, duration, |pose| {
                            stage.scene.borrow_mut().set_pose(&object, pose);
                        })
                        .await;
                    moving.set(false);
                    if outcome == TweenOutcome::Completed {
                        stage
                            .audio
                            .borrow_mut()
                            .play_optional(cues.drop.as_deref());
                        stage
                            .scene
                            .borrow_mut()
                            .set_collider_enabled(&object, false);
                        stage.spawn(retire_highlight(
                            stage.highlights.clone(),
                            stage.clock.clone(),
                            object,
                            stage.assets.done.clone(),
                        ));
                        resolve_logged(&source, true);
                    }
                });
                AfterEvent::Keep
            }
        }
    }
}
