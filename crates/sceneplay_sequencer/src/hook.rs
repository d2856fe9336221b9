// SPDX-License-Identifier: MIT OR Apache-2.0
//! Lifecycle hooks and settlement tokens.
//!
//! Hooks are the only way outside systems observe or gate the sequencer.
//! Each invocation hands every listener its own [`SettleToken`]; the
//! sequencer blocks on that specific invocation's token, so rapid successive
//! firings of the same hook cannot cross-signal each other. A hook with zero
//! listeners is satisfied instantly. A hook whose listeners never settle
//! blocks the sequence forever unless a timeout is configured, which is the
//! intended way to wait for human-driven steps.

use crate::script::InteractionId;
use futures::future::{self, Either};
use futures::pin_mut;
use indexmap::IndexMap;
use sceneplay_interact::signal::{completion, resolve_logged, SharedSource};
use sceneplay_stage::FrameClock;
use std::cell::RefCell;
use std::rc::Rc;

/// Settlement handle for one hook invocation.
///
/// Exactly one listener is expected to call [`SettleToken::settle`]; a second
/// settlement is rejected and logged.
#[derive(Clone)]
pub struct SettleToken {
    source: SharedSource,
}

impl SettleToken {
    /// Let the gated sequence proceed
    pub fn settle(&self) {
        resolve_logged(&self.source, true);
    }

    /// Whether this invocation has already been settled
    pub fn is_settled(&self) -> bool {
        self.source.borrow().is_resolved()
    }
}

/// Run-level lifecycle boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunHook {
    /// Before the first interaction of a full run
    Start,
    /// After the last interaction of a full run
    End,
}

/// Per-interaction lifecycle boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionHook {
    /// Before the interaction's first step
    Start,
    /// After the interaction's last step
    End,
    /// After the item step's completion signal resolved
    ItemComplete,
    /// After the camera move finished
    CameraComplete,
    /// After animation playback finished
    AnimationComplete,
    /// A fire-on-click item was clicked
    Clicked,
}

/// Identifies one hook on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKey {
    /// Run-level hook
    Run(RunHook),
    /// Hook of one interaction
    Interaction(InteractionId, InteractionHook),
}

type Listener = Box<dyn FnMut(SettleToken)>;

#[derive(Default)]
struct HookBoard {
    listeners: IndexMap<HookKey, Vec<Listener>>,
    timeout: Option<f32>,
}

/// Shared hook board, cheap to clone
#[derive(Clone, Default)]
pub struct Hooks {
    board: Rc<RefCell<HookBoard>>,
}

impl Hooks {
    /// Create an empty board with no timeout
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener to a hook
    pub fn on(&self, key: HookKey, listener: impl FnMut(SettleToken) + 'static) {
        self.board
            .borrow_mut()
            .listeners
            .entry(key)
            .or_default()
            .push(Box::new(listener));
    }

    /// Number of listeners attached to a hook
    pub fn listener_count(&self, key: &HookKey) -> usize {
        self.board
            .borrow()
            .listeners
            .get(key)
            .map_or(0, Vec::len)
    }

    /// Configure an optional settlement timeout in seconds.
    ///
    /// `None` (the default) blocks forever on unsettled hooks.
    pub fn set_timeout(&self, timeout: Option<f32>) {
        self.board.borrow_mut().timeout = timeout;
    }

    /// Fire a hook and wait until one of its listeners settles it.
    ///
    /// Returns immediately when no listeners are attached. With a timeout
    /// configured, an unsettled hook is abandoned after the timeout elapses
    /// and the sequence proceeds.
    pub async fn fire(&self, clock: &FrameClock, key: HookKey) {
        // Listeners are invoked outside the board borrow so they may attach
        // further listeners.
        let mut listeners = {
            let mut board = self.board.borrow_mut();
            match board.listeners.get_mut(&key) {
                Some(v) if !v.is_empty() => std::mem::take(v),
                _ => return,
            }
        };

        let (source, signal) = completion::<bool>();
        let token = SettleToken {
            source: Rc::new(RefCell::new(source)),
        };
        for listener in &mut listeners {
            listener(token.clone());
        }

        {
            let mut board = self.board.borrow_mut();
            let slot = board.listeners.entry(key).or_default();
            listeners.append(slot);
            *slot = listeners;
        }

        let timeout = self.board.borrow().timeout;
        tracing::debug!(?key, "hook fired, awaiting settlement");
        match timeout {
            None => {
                // The token held here keeps the signal pending even if every
                // listener dropped its copy without settling.
                let _ = signal.wait().await;
            }
            Some(seconds) => {
                let wait = signal.wait();
                let deadline = clock.delay(seconds);
                pin_mut!(wait);
                pin_mut!(deadline);
                if let Either::Right(_) = future::select(wait, deadline).await {
                    tracing::warn!(?key, seconds, "hook settlement timed out, proceeding");
                }
            }
        }
        drop(token);
    }
}
