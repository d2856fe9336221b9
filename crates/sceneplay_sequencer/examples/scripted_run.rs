// SPDX-License-Identifier: MIT OR Apache-2.0
//! Headless scripted run: builds a small scene and script, then drives the
//! runtime with synthetic frames and pointer events.

use sceneplay_interact::{ClickAction, DragParams};
use sceneplay_sequencer::{
    CameraMove, ExecutionStep, HookKey, InteractionDefinition, InteractionHook, InteractionScript,
    ItemAction, StageRuntime,
};
use sceneplay_stage::{PointerEvent, SceneObject, StageAssets};
use std::cell::Cell;
use std::rc::Rc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("sceneplay_sequencer=debug".parse().unwrap())
        .add_directive("sceneplay_interact=debug".parse().unwrap())
        .add_directive("sceneplay_stage=debug".parse().unwrap());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("ScenePlay scripted run v{}", env!("CARGO_PKG_VERSION"));

    let assets = StageAssets {
        pick_cue: Some("pick".to_string()),
        drop_cue: Some("drop".to_string()),
        ..StageAssets::default()
    };
    let mut runtime = StageRuntime::new(assets);

    let (bell, gem, socket, overlook) = {
        let mut scene = runtime.stage().scene.borrow_mut();
        let bell = scene.add_object(SceneObject::new("Bell"));
        let gem = scene.add_object(SceneObject::new("Gem"));
        let socket = scene.add_object(SceneObject::at("Socket", [1.5, 0.0, 0.0]));
        let overlook = scene.add_object(SceneObject::at("Overlook", [0.0, 5.0, -5.0]));
        (bell, gem, socket, overlook)
    };

    let mut script = InteractionScript::new("demo");

    let mut ring = InteractionDefinition::new("ring the bell");
    ring.target = Some(bell);
    ring.item = Some(ItemAction::Click(ClickAction::FireEvent));
    ring.execution_order = vec![ExecutionStep::Item];
    let ring_id = script.add(ring);

    let mut place = InteractionDefinition::new("place the gem");
    place.target = Some(gem);
    place.item = Some(ItemAction::Drag(DragParams::new(socket)));
    place.camera = Some(CameraMove {
        end: overlook,
        move_duration: 1.0,
        return_duration: 0.5,
        locked: false,
    });
    place.execution_order = vec![ExecutionStep::Item, ExecutionStep::Camera];
    script.add(place);

    script.validate().expect("script invariants");

    runtime.hooks().on(
        HookKey::Interaction(ring_id, InteractionHook::Clicked),
        |token| {
            tracing::info!("bell rung");
            token.settle();
        },
    );

    let sequencer = runtime.sequencer(script);
    let finished = Rc::new(Cell::new(false));
    let flag = finished.clone();
    runtime.spawn(async move {
        if let Err(e) = sequencer.run_all().await {
            tracing::error!("run failed: {e}");
        }
        flag.set(true);
    });
    runtime.pump();

    // Synthetic player input: click the bell, then drag the gem to the
    // socket.
    runtime.pointer(PointerEvent::down(bell, [0.0; 3], [0.0; 2]));
    runtime.pointer(PointerEvent::down(gem, [0.0; 3], [0.0; 2]));
    runtime.pointer(PointerEvent::drag([1.0, 0.0, 0.0], [0.2, 0.0]));

    // 60 fps frames until the script finishes.
    let mut frames = 0u32;
    while !finished.get() && frames < 600 {
        runtime.tick(1.0 / 60.0);
        frames += 1;
    }

    tracing::info!(frames, finished = finished.get(), "run complete");
    for cue in runtime.stage().audio.borrow_mut().drain() {
        tracing::info!(cue = %cue.cue, at = cue.at, "cue played");
    }
}
