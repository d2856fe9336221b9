// SPDX-License-Identifier: MIT OR Apache-2.0
//! Cancellable pose tween.

use crate::clock::FrameClock;
use crate::math::Interpolation;
use crate::object::Pose;
use std::cell::Cell;
use std::rc::Rc;

/// Cancellation handle for an in-flight tween, cheap to clone.
///
/// Cancelling aborts the motion in place on the next frame; the tween does
/// not snap to its final pose and does not count as completed.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Rc<Cell<bool>>,
}

impl CancelToken {
    /// Create a fresh, un-cancelled token
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.set(true);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.get()
    }
}

/// How a tween ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenOutcome {
    /// Ran to the end and applied the exact target pose
    Completed,
    /// Aborted in place by its cancel token
    Cancelled,
}

/// Interpolate from one pose to another over `duration` seconds.
///
/// Position and scale are lerped, rotation is slerped. The interpolated pose
/// is pushed through `apply` once per frame; elapsed time accumulates from
/// per-frame deltas, and on completion the exact target pose is applied.
pub async fn tween_pose(
    clock: &FrameClock,
    cancel: &CancelToken,
    from: Pose,
    to: Pose,
    duration: f32,
    mut apply: impl FnMut(Pose),
) -> TweenOutcome {
    if duration > 0.0 {
        let mut elapsed = 0.0f32;
        while elapsed < duration {
            if cancel.is_cancelled() {
                return TweenOutcome::Cancelled;
            }
            let t = elapsed / duration;
            apply(Pose {
                position: Interpolation::lerp_vec3(from.position, to.position, t),
                rotation: Interpolation::slerp(from.rotation, to.rotation, t),
                scale: Interpolation::lerp_vec3(from.scale, to.scale, t),
            });
            elapsed += clock.next_frame().await;
        }
    }
    apply(to);
    TweenOutcome::Completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;
    use std::cell::RefCell;

    fn pose_at(x: f32) -> Pose {
        Pose::at([x, 0.0, 0.0])
    }

    #[test]
    fn reaches_exact_target() {
        let mut pool = LocalPool::new();
        let clock = FrameClock::new();
        let cancel = CancelToken::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let outcome = Rc::new(RefCell::new(None));

        let c = clock.clone();
        let s = seen.clone();
        let o = outcome.clone();
        pool.spawner()
            .spawn_local(async move {
                let result = tween_pose(&c, &cancel, pose_at(0.0), pose_at(10.0), 1.0, |p| {
                    s.borrow_mut().push(p.position[0]);
                })
                .await;
                *o.borrow_mut() = Some(result);
            })
            .unwrap();

        // Uneven tick sizes still land exactly on the target.
        for dt in [0.4, 0.4, 0.4] {
            clock.tick(dt);
            pool.run_until_stalled();
        }

        assert_eq!(*outcome.borrow(), Some(TweenOutcome::Completed));
        let seen = seen.borrow();
        assert_eq!(seen.first().copied(), Some(0.0));
        assert_eq!(seen.last().copied(), Some(10.0));
    }

    #[test]
    fn cancellation_aborts_in_place() {
        let mut pool = LocalPool::new();
        let clock = FrameClock::new();
        let cancel = CancelToken::new();
        let last = Rc::new(Cell::new(0.0f32));
        let outcome = Rc::new(RefCell::new(None));

        let c = clock.clone();
        let token = cancel.clone();
        let l = last.clone();
        let o = outcome.clone();
        pool.spawner()
            .spawn_local(async move {
                let result = tween_pose(&c, &token, pose_at(0.0), pose_at(10.0), 1.0, |p| {
                    l.set(p.position[0]);
                })
                .await;
                *o.borrow_mut() = Some(result);
            })
            .unwrap();

        clock.tick(0.25);
        pool.run_until_stalled();
        cancel.cancel();
        clock.tick(0.25);
        pool.run_until_stalled();

        assert_eq!(*outcome.borrow(), Some(TweenOutcome::Cancelled));
        // Frozen at the last applied sample, not snapped to 10.
        assert!(last.get() < 5.0);
    }

    #[test]
    fn zero_duration_snaps_immediately() {
        let mut pool = LocalPool::new();
        let clock = FrameClock::new();
        let cancel = CancelToken::new();
        let last = Rc::new(Cell::new(0.0f32));

        let c = clock.clone();
        let l = last.clone();
        pool.spawner()
            .spawn_local(async move {
                tween_pose(&c, &cancel, pose_at(0.0), pose_at(3.0), 0.0, |p| {
                    l.set(p.position[0]);
                })
                .await;
            })
            .unwrap();

        pool.run_until_stalled();
        assert_eq!(last.get(), 3.0);
    }
}
