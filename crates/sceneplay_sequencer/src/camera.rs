// SPDX-License-Identifier: MIT OR Apache-2.0
//! The camera move-and-return action.

use sceneplay_stage::{tween_pose, CancelToken, Pose, Stage, TweenOutcome};

/// Tween the camera to `end`, hold, and return unless locked.
///
/// The live camera pose at call time is cached as the start; the return leg
/// animates back to it over the same `move_duration`. Cancellation aborts
/// whichever leg is in flight in place, with no snap to a final pose. The
/// sequencer runs at most one camera action at a time; overlapping calls are
/// not supported.
pub async fn move_and_return(
    stage: &Stage,
    cancel: &CancelToken,
    end: Pose,
    move_duration: f32,
    return_duration: f32,
    locked: bool,
) -> TweenOutcome {
    let start = stage.camera.borrow().pose();
    tracing::debug!(move_duration, return_duration, locked, "camera move");

    let out = tween_pose(&stage.clock, cancel, start, end, move_duration, |pose| {
        stage.camera.borrow_mut().set_pose(pose);
    })
    .await;
    if out == TweenOutcome::Cancelled {
        return out;
    }

    stage.clock.delay(return_duration).await;
    if locked {
        return TweenOutcome::Completed;
    }

    tween_pose(&stage.clock, cancel, end, start, move_duration, |pose| {
        stage.camera.borrow_mut().set_pose(pose);
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::LocalPool;
    use sceneplay_stage::StageAssets;

    fn stage() -> (LocalPool, Stage) {
        let pool = LocalPool::new();
        let stage = Stage::new(pool.spawner(), StageAssets::default());
        (pool, stage)
    }

    fn camera_x(stage: &Stage) -> f32 {
        stage.camera.borrow().pose().position[0]
    }

    #[test]
    fn moves_holds_and_returns() {
        let (mut pool, stage) = stage();
        let cancel = CancelToken::new();
        let end = Pose::at([10.0, 0.0, 0.0]);

        let s = stage.clone();
        stage.spawn(async move {
            move_and_return(&s, &cancel, end, 1.0, 0.5, false).await;
        });

        // Outbound leg starts at the live camera pose.
        pool.run_until_stalled();
        assert_eq!(camera_x(&stage), 0.0);

        stage.clock.tick(0.5);
        pool.run_until_stalled();
        assert_eq!(camera_x(&stage), 5.0);

        stage.clock.tick(0.5);
        pool.run_until_stalled();
        assert_eq!(camera_x(&stage), 10.0);

        // Holding at the end pose.
        stage.clock.tick(0.5);
        pool.run_until_stalled();
        assert_eq!(camera_x(&stage), 10.0);

        // Return leg animates back toward the cached start.
        stage.clock.tick(0.5);
        pool.run_until_stalled();
        assert_eq!(camera_x(&stage), 5.0);

        stage.clock.tick(0.5);
        pool.run_until_stalled();
        assert_eq!(camera_x(&stage), 0.0);
    }

    #[test]
    fn locked_move_stays_at_the_end_pose() {
        let (mut pool, stage) = stage();
        let cancel = CancelToken::new();
        let end = Pose::at([4.0, 0.0, 0.0]);

        let s = stage.clone();
        stage.spawn(async move {
            move_and_return(&s, &cancel, end, 0.4, 0.2, true).await;
        });

        pool.run_until_stalled();
        for _ in 0..8 {
            stage.clock.tick(0.1);
            pool.run_until_stalled();
        }
        assert_eq!(camera_x(&stage), 4.0);
    }

    #[test]
    fn cancellation_freezes_the_camera_in_place() {
        let (mut pool, stage) = stage();
        let cancel = CancelToken::new();
        let end = Pose::at([10.0, 0.0, 0.0]);

        let s = stage.clone();
        let token = cancel.clone();
        stage.spawn(async move {
            move_and_return(&s, &token, end, 1.0, 0.0, false).await;
        });

        pool.run_until_stalled();
        stage.clock.tick(0.3);
        pool.run_until_stalled();
        cancel.cancel();
        stage.clock.tick(0.3);
        pool.run_until_stalled();

        let x = camera_x(&stage);
        assert!(x > 0.0 && x < 10.0);
    }
}
