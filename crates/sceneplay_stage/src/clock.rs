// SPDX-License-Identifier: MIT OR Apache-2.0
//! The cooperative frame clock.
//!
//! Every wait in ScenePlay bottoms out here: a task awaits
//! [`FrameClock::next_frame`], and the host wakes all waiters once per frame
//! by calling [`FrameClock::tick`] with that frame's delta time. There are no
//! threads and no timers; time only moves when the host says so, which is
//! what makes the whole runtime deterministic under test.

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Default)]
struct ClockState {
    frame: u64,
    delta: f32,
    elapsed: f64,
    wakers: Vec<Waker>,
}

/// Shared frame clock, cheap to clone
#[derive(Clone, Default)]
pub struct FrameClock {
    inner: Rc<RefCell<ClockState>>,
}

impl std::fmt::Debug for FrameClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("FrameClock")
            .field("frame", &state.frame)
            .field("delta", &state.delta)
            .field("elapsed", &state.elapsed)
            .finish()
    }
}

impl FrameClock {
    /// Create a new clock at frame zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one frame, waking every pending [`NextFrame`] with `delta`
    pub fn tick(&self, delta: f32) {
        let wakers = {
            let mut state = self.inner.borrow_mut();
            state.frame += 1;
            state.delta = delta;
            state.elapsed += f64::from(delta);
            std::mem::take(&mut state.wakers)
        };
        for waker in wakers {
            waker.wake();
        }
    }

    /// Delta time of the most recent tick, in seconds
    pub fn delta(&self) -> f32 {
        self.inner.borrow().delta
    }

    /// Total time advanced so far, in seconds
    pub fn elapsed(&self) -> f64 {
        self.inner.borrow().elapsed
    }

    /// Current frame number
    pub fn frame(&self) -> u64 {
        self.inner.borrow().frame
    }

    /// Wait for the next tick; resolves with that tick's delta time
    pub fn next_frame(&self) -> NextFrame {
        NextFrame {
            clock: self.clone(),
            after: self.frame(),
        }
    }

    /// Pure time wait: suspend until `seconds` of tick time have accumulated.
    ///
    /// Not cancellable; a zero or negative duration returns immediately
    /// without yielding.
    pub async fn delay(&self, seconds: f32) {
        let mut waited = 0.0f32;
        while waited < seconds {
            waited += self.next_frame().await;
        }
    }
}

/// Future resolving on the tick after it was created
pub struct NextFrame {
    clock: FrameClock,
    after: u64,
}

impl Future for NextFrame {
    type Output = f32;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut state = self.clock.inner.borrow_mut();
        if state.frame > self.after {
            Poll::Ready(state.delta)
        } else {
            state.wakers.push(cx.waker().clone());
            Poll::Pending
        }
    }
}
