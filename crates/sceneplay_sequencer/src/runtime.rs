// SPDX-License-Identifier: MIT OR Apache-2.0
//! The cooperative runtime harness.
//!
//! Owns the single-threaded executor and everything the sequencer shares:
//! the stage, the hook board, the behavior binding table and the media
//! driver. The host embeds one [`StageRuntime`] and drives it from its own
//! loop: `tick(dt)` once per frame, `pointer(event)` for input.

use crate::hook::Hooks;
use crate::media::TimedMediaDriver;
use crate::script::InteractionScript;
use crate::sequencer::Sequencer;
use futures::executor::LocalPool;
use sceneplay_interact::BindingTable;
use sceneplay_stage::{PointerEvent, Stage, StageAssets};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

/// The embedding point for a host engine
pub struct StageRuntime {
    pool: LocalPool,
    stage: Stage,
    hooks: Hooks,
    bindings: Rc<RefCell<BindingTable>>,
    media: Rc<RefCell<TimedMediaDriver>>,
}

impl StageRuntime {
    /// Create a runtime with an empty scene
    pub fn new(assets: StageAssets) -> Self {
        let pool = LocalPool::new();
        let stage = Stage::new(pool.spawner(), assets);
        let media = Rc::new(RefCell::new(TimedMediaDriver::new(stage.clock.clone())));
        Self {
            pool,
            stage,
            hooks: Hooks::new(),
            bindings: Rc::new(RefCell::new(BindingTable::new())),
            media,
        }
    }

    /// The shared stage
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// The hook board listeners register on
    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    /// The built-in media driver, for registering timelines and clips
    pub fn media(&self) -> &Rc<RefCell<TimedMediaDriver>> {
        &self.media
    }

    /// Build a sequencer for a script over this runtime's shared state
    pub fn sequencer(&self, script: InteractionScript) -> Sequencer {
        Sequencer::new(
            self.stage.clone(),
            self.hooks.clone(),
            self.bindings.clone(),
            self.media.clone(),
            script,
        )
    }

    /// Spawn a task on the runtime's executor
    pub fn spawn(&self, fut: impl Future<Output = ()> + 'static) {
        self.stage.spawn(fut);
    }

    /// Advance one frame: tick the clock with `dt` seconds, then run every
    /// woken task until all are parked again
    pub fn tick(&mut self, dt: f32) {
        self.stage.clock.tick(dt);
        self.pool.run_until_stalled();
    }

    /// Run ready tasks without advancing time; lets freshly spawned work
    /// reach its first suspension point
    pub fn pump(&mut self) {
        self.pool.run_until_stalled();
    }

    /// Route a pointer event to the bound behaviors, then run any work it
    /// released
    pub fn pointer(&mut self, event: PointerEvent) {
        self.bindings.borrow_mut().dispatch(&self.stage, &event);
        self.pool.run_until_stalled();
    }
}
