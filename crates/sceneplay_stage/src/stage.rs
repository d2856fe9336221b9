// SPDX-License-Identifier: MIT OR Apache-2.0
//! The stage: shared handles to everything the runtime animates.

use crate::audio::CuePlayer;
use crate::camera::CameraRig;
use crate::clock::FrameClock;
use crate::highlight::{HighlightController, HighlightProfile};
use crate::object::Scene;
use futures::executor::LocalSpawner;
use futures::task::LocalSpawnExt;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

/// Globally configured visual profiles and audio cue slots.
///
/// The three profiles correspond to "waiting for the player", "being
/// manipulated", and "finished"; cue slots may be overridden per interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageAssets {
    /// Profile for idle interactables
    pub idle: HighlightProfile,
    /// Profile while the player manipulates an object
    pub active: HighlightProfile,
    /// Profile flashed when an interaction completes
    pub done: HighlightProfile,
    /// Cue played on pick-up/click
    pub pick_cue: Option<String>,
    /// Cue played on place/drop
    pub drop_cue: Option<String>,
}

impl Default for StageAssets {
    fn default() -> Self {
        Self {
            idle: HighlightProfile::new("yellow", [255, 210, 60]),
            active: HighlightProfile::new("blue", [70, 130, 255]),
            done: HighlightProfile::new("green", [80, 220, 120]),
            pick_cue: None,
            drop_cue: None,
        }
    }
}

/// Shared handles to the scene, camera, highlight table, cue player and
/// clock, plus the spawner background motions run on.
///
/// Everything is `Rc`-shared and single-threaded; `Stage` is cheap to clone
/// into behaviors and spawned tasks. Borrows are never held across an await.
#[derive(Clone)]
pub struct Stage {
    /// Scene object table
    pub scene: Rc<RefCell<Scene>>,
    /// Camera rig
    pub camera: Rc<RefCell<CameraRig>>,
    /// Highlight assignments
    pub highlights: Rc<RefCell<HighlightController>>,
    /// Audio cue sink
    pub audio: Rc<RefCell<CuePlayer>>,
    /// Frame clock
    pub clock: FrameClock,
    /// Configured profiles and cue slots
    pub assets: StageAssets,
    spawner: LocalSpawner,
}

impl Stage {
    /// Create a stage with an empty scene and a default camera rig
    pub fn new(spawner: LocalSpawner, assets: StageAssets) -> Self {
        let clock = FrameClock::new();
        Self {
            scene: Rc::new(RefCell::new(Scene::new())),
            camera: Rc::new(RefCell::new(CameraRig::default())),
            highlights: Rc::new(RefCell::new(HighlightController::new())),
            audio: Rc::new(RefCell::new(CuePlayer::new(clock.clone()))),
            clock,
            assets,
            spawner,
        }
    }

    /// Spawn a background task on the runtime's executor
    pub fn spawn(&self, fut: impl Future<Output = ()> + 'static) {
        if let Err(e) = self.spawner.spawn_local(fut) {
            tracing::error!("failed to spawn stage task: {e}");
        }
    }
}
