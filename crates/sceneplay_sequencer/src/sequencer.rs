// SPDX-License-Identifier: MIT OR Apache-2.0
//! The interaction sequencer.
//!
//! Walks an authored script one interaction at a time, binding interactable
//! behaviors, running camera moves and animation playback, and gating every
//! boundary on its lifecycle hook. All progress knowledge comes from
//! completion signals and settle tokens; the sequencer never polls behavior
//! internals.

use crate::camera;
use crate::hook::{HookKey, Hooks, InteractionHook, RunHook};
use crate::media::AnimationDriver;
use crate::script::{
    AnimationAction, CameraMove, ExecutionStep, InteractionDefinition, InteractionScript,
    ItemAction,
};
use sceneplay_interact::signal::completion;
use sceneplay_interact::{
    Behavior, BindingTable, ClickAction, Clickable, CueSlots, Draggable, Rotatable, SharedSource,
};
use sceneplay_stage::{retire_highlight, CancelToken, ObjectId, Stage};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// How a sequencer instance is being driven
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryMode {
    /// One `run_all` call plays the whole script
    RunAll,
    /// External triggers play one interaction per `advance` call
    Advance,
}

/// Sequencer contract violations
#[derive(Debug, thiserror::Error)]
pub enum SequencerError {
    /// The instance was already driven through the other entry mode
    #[error("sequencer already driven in {locked:?} mode")]
    ModeConflict {
        /// Mode the instance is locked to
        locked: EntryMode,
    },
}

/// Drives one script over one stage. Cheap to clone; clones share all state.
#[derive(Clone)]
pub struct Sequencer {
    stage: Stage,
    hooks: Hooks,
    bindings: Rc<RefCell<BindingTable>>,
    driver: Rc<RefCell<dyn AnimationDriver>>,
    script: Rc<InteractionScript>,
    cursor: Rc<Cell<usize>>,
    mode: Rc<Cell<Option<EntryMode>>>,
    cancels: Rc<RefCell<Vec<CancelToken>>>,
}

impl Sequencer {
    /// Create a sequencer over a stage, hook board, binding table and
    /// animation driver
    pub fn new(
        stage: Stage,
        hooks: Hooks,
        bindings: Rc<RefCell<BindingTable>>,
        driver: Rc<RefCell<dyn AnimationDriver>>,
        script: InteractionScript,
    ) -> Self {
        Self {
            stage,
            hooks,
            bindings,
            driver,
            script: Rc::new(script),
            cursor: Rc::new(Cell::new(0)),
            mode: Rc::new(Cell::new(None)),
            cancels: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Index of the next interaction `advance` would play
    pub fn cursor(&self) -> usize {
        self.cursor.get()
    }

    /// Lock the instance to one entry mode. `advance` may be called
    /// repeatedly; everything else conflicts once a mode is claimed.
    fn claim(&self, want: EntryMode) -> Result<(), SequencerError> {
        match self.mode.get() {
            None => {
                self.mode.set(Some(want));
                Ok(())
            }
            Some(EntryMode::Advance) if want == EntryMode::Advance => Ok(()),
            Some(locked) => Err(SequencerError::ModeConflict { locked }),
        }
    }

    /// Play the whole script in authored order, each interaction fully
    /// awaited before the next begins
    pub async fn run_all(&self) -> Result<(), SequencerError> {
        self.claim(EntryMode::RunAll)?;
        tracing::info!(
            script = %self.script.name,
            interactions = self.script.interactions.len(),
            "run started"
        );

        self.hooks
            .fire(&self.stage.clock, HookKey::Run(RunHook::Start))
            .await;
        for definition in &self.script.interactions {
            self.run_one(definition).await;
        }
        self.hooks
            .fire(&self.stage.clock, HookKey::Run(RunHook::End))
            .await;

        tracing::info!(script = %self.script.name, "run finished");
        Ok(())
    }

    /// Play exactly the interaction at the cursor and increment it.
    /// Out-of-range calls are a no-op.
    pub async fn advance(&self) -> Result<(), SequencerError> {
        self.claim(EntryMode::Advance)?;
        let index = self.cursor.get();
        let Some(definition) = self.script.interactions.get(index) else {
            tracing::debug!(index, "advance past the end of the script, ignoring");
            return Ok(());
        };
        self.cursor.set(index + 1);
        self.run_one(definition).await;
        Ok(())
    }

    /// Run one interaction: start hook, authored steps in order, end hook
    pub async fn run_one(&self, definition: &InteractionDefinition) {
        tracing::info!(name = %definition.name, "interaction started");
        self.hooks
            .fire(
                &self.stage.clock,
                HookKey::Interaction(definition.id, InteractionHook::Start),
            )
            .await;

        for step in &definition.execution_order {
            match step {
                ExecutionStep::Item => {
                    // An absent sub-action skips the step entirely, hook and
                    // delay included.
                    let Some(item) = &definition.item else { continue };
                    self.run_item(definition, item).await;
                    self.fire_step(definition, InteractionHook::ItemComplete)
                        .await;
                    self.stage.clock.delay(definition.delays.item).await;
                }
                ExecutionStep::Camera => {
                    let Some(camera) = &definition.camera else { continue };
                    self.run_camera(camera).await;
                    self.fire_step(definition, InteractionHook::CameraComplete)
                        .await;
                    self.stage.clock.delay(definition.delays.camera).await;
                }
                ExecutionStep::Animation => {
                    let Some(animation) = &definition.animation else {
                        continue;
                    };
                    self.run_animation(animation).await;
                    self.fire_step(definition, InteractionHook::AnimationComplete)
                        .await;
                    self.stage.clock.delay(definition.delays.animation).await;
                }
            }
        }

        self.hooks
            .fire(
                &self.stage.clock,
                HookKey::Interaction(definition.id, InteractionHook::End),
            )
            .await;
        tracing::info!(name = %definition.name, "interaction finished");
    }

    /// Cancel every in-flight motion and force the camera back to its
    /// construction pose
    pub fn shutdown(&self) {
        for cancel in self.cancels.borrow_mut().drain(..) {
            cancel.cancel();
        }
        self.stage.camera.borrow_mut().restore_initial();
        tracing::info!("sequencer shut down, camera restored");
    }

    async fn fire_step(&self, definition: &InteractionDefinition, hook: InteractionHook) {
        self.hooks
            .fire(&self.stage.clock, HookKey::Interaction(definition.id, hook))
            .await;
    }

    /// Bind the item behavior, await its completion signal, tear down
    async fn run_item(&self, definition: &InteractionDefinition, item: &ItemAction) {
        let Some(target) = definition.target else {
            tracing::debug!(name = %definition.name, "item step without a target, skipping");
            return;
        };
        {
            let scene = self.stage.scene.borrow();
            if !scene.contains(&target) {
                tracing::debug!(name = %definition.name, "item target missing from the scene, skipping");
                return;
            }
            // Kind-specific required markers gate the dispatch the same way:
            // binding a drag with no drop slot would wait on a snap that can
            // never happen.
            let marker = match item {
                ItemAction::Click(ClickAction::MoveToMarker { reach, .. }) => Some(*reach),
                ItemAction::Drag(params) => Some(params.drop),
                ItemAction::Click(ClickAction::FireEvent) | ItemAction::Rotate(_) => None,
            };
            if let Some(marker) = marker {
                if !scene.contains(&marker) {
                    tracing::debug!(name = %definition.name, "item marker missing from the scene, skipping");
                    return;
                }
            }
        }

        let cues = self.effective_cues(definition);
        let drop_cue = cues.drop.clone();
        let (source, signal) = completion::<bool>();
        let source: SharedSource = Rc::new(RefCell::new(source));

        let behavior = match item {
            ItemAction::Click(action) => {
                let clickable = Clickable::new(target, *action, cues, source.clone());
                self.cancels.borrow_mut().push(clickable.cancel_token());
                Behavior::Click(clickable)
            }
            ItemAction::Drag(params) => {
                self.stage
                    .highlights
                    .borrow_mut()
                    .apply(params.drop, self.stage.assets.idle.clone(), false);
                let draggable =
                    Draggable::new(&self.stage, target, *params, cues, source.clone());
                self.cancels.borrow_mut().push(draggable.cancel_token());
                Behavior::Drag(draggable)
            }
            ItemAction::Rotate(params) => {
                if let Some(indicator) = params.indicator {
                    self.stage
                        .highlights
                        .borrow_mut()
                        .apply(indicator, self.stage.assets.idle.clone(), false);
                }
                Behavior::Rotate(Rotatable::new(target, *params, cues, source.clone()))
            }
        };

        self.stage
            .scene
            .borrow_mut()
            .set_collider_enabled(&target, true);
        self.stage
            .highlights
            .borrow_mut()
            .apply(target, self.stage.assets.idle.clone(), true);
        self.bindings.borrow_mut().bind(target, behavior);

        // A fire-on-click item with nobody listening is not awaited at all:
        // the binding stays live and a later click still detaches it, but the
        // sequence moves on immediately.
        if matches!(item, ItemAction::Click(ClickAction::FireEvent))
            && self.hooks.listener_count(&HookKey::Interaction(
                definition.id,
                InteractionHook::Clicked,
            )) == 0
        {
            tracing::debug!(name = %definition.name, "fire-on-click with no listeners, not awaiting");
            self.stage.spawn(async move {
                let _ = signal.wait().await;
            });
            return;
        }

        match signal.wait().await {
            Ok(done) => tracing::debug!(name = %definition.name, done, "item interaction complete"),
            Err(e) => tracing::warn!(name = %definition.name, "item completion signal lost: {e}"),
        }

        // Steps run one at a time, so every tracked motion is over now and
        // its cancel token is spent.
        self.cancels.borrow_mut().clear();
        self.bindings.borrow_mut().unbind(&target);
        match item {
            ItemAction::Click(ClickAction::FireEvent) => {
                self.fire_step(definition, InteractionHook::Clicked).await;
            }
            ItemAction::Drag(params) => {
                self.finish_drag(target, params.drop, drop_cue.as_deref());
            }
            ItemAction::Rotate(params) => {
                if let Some(indicator) = params.indicator {
                    self.stage.highlights.borrow_mut().remove(&indicator);
                }
            }
            ItemAction::Click(ClickAction::MoveToMarker { .. }) => {}
        }
    }

    /// The awaiting half of a completed drag: drop cue, collider off, both
    /// highlights retired
    fn finish_drag(&self, target: ObjectId, drop: ObjectId, drop_cue: Option<&str>) {
        self.stage.audio.borrow_mut().play_optional(drop_cue);
        self.stage
            .scene
            .borrow_mut()
            .set_collider_enabled(&target, false);
        self.stage.highlights.borrow_mut().remove(&drop);
        self.stage.spawn(retire_highlight(
            self.stage.highlights.clone(),
            self.stage.clock.clone(),
            target,
            self.stage.assets.done.clone(),
        ));
    }

    async fn run_camera(&self, camera: &CameraMove) {
        let Some(end) = self.stage.scene.borrow().pose_of(&camera.end) else {
            tracing::debug!("camera end marker missing from the scene, skipping");
            return;
        };
        let cancel = CancelToken::new();
        self.cancels.borrow_mut().push(cancel.clone());
        camera::move_and_return(
            &self.stage,
            &cancel,
            end,
            camera.move_duration,
            camera.return_duration,
            camera.locked,
        )
        .await;
        // The move is fully awaited; its cancel token is spent.
        self.cancels.borrow_mut().clear();
    }

    async fn run_animation(&self, animation: &AnimationAction) {
        let started = match animation {
            AnimationAction::Timeline { timeline } => {
                self.driver.borrow_mut().start_timeline(timeline)
            }
            AnimationAction::Clip { target, clip } => {
                self.driver.borrow_mut().start_clip(target, clip)
            }
        };
        if !started {
            return;
        }
        while self.driver.borrow().is_playing() {
            self.stage.clock.next_frame().await;
        }
    }

    /// Per-interaction cue overrides falling back to the stage cues
    fn effective_cues(&self, definition: &InteractionDefinition) -> CueSlots {
        CueSlots {
            pick: definition
                .cues
                .pick
                .clone()
                .or_else(|| self.stage.assets.pick_cue.clone()),
            drop: definition
                .cues
                .drop
                .clone()
                .or_else(|| self.stage.assets.drop_cue.clone()),
        }
    }
}
