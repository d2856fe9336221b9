// SPDX-License-Identifier: MIT OR Apache-2.0
//! Single-resolution completion signals.
//!
//! A completion signal bridges pointer/tween/playback events to the
//! sequencer's await points. It resolves exactly once; awaiting after
//! resolution returns the stored result immediately. A second resolution
//! attempt is a contract violation and is rejected rather than silently
//! overwriting the first (several code paths can reach the resolving side,
//! e.g. a click handler and a snap tween completing in the same frame).

use futures::channel::oneshot;
use futures::future::{FutureExt, Shared};
use std::cell::RefCell;
use std::rc::Rc;

/// Completion signal contract violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SignalError {
    /// The signal was already resolved
    #[error("completion signal already resolved")]
    AlreadyResolved,
    /// The awaiting side went away before resolution
    #[error("completion signal abandoned by its consumer")]
    Abandoned,
}

/// Resolving half of a completion signal
pub struct CompletionSource<T> {
    tx: Option<oneshot::Sender<T>>,
}

impl<T> CompletionSource<T> {
    /// Resolve the signal. Fails if it was already resolved or the awaiting
    /// half was dropped; the stored result of an earlier resolution is never
    /// altered.
    pub fn resolve(&mut self, value: T) -> Result<(), SignalError> {
        match self.tx.take() {
            Some(tx) => tx.send(value).map_err(|_| SignalError::Abandoned),
            None => Err(SignalError::AlreadyResolved),
        }
    }

    /// Whether the signal has been resolved
    pub fn is_resolved(&self) -> bool {
        self.tx.is_none()
    }
}

/// Awaiting half of a completion signal, cheap to clone
#[derive(Clone)]
pub struct CompletionSignal<T: Clone> {
    rx: Shared<oneshot::Receiver<T>>,
}

impl<T: Clone> CompletionSignal<T> {
    /// Wait for resolution; returns immediately once resolved
    pub async fn wait(&self) -> Result<T, SignalError> {
        self.rx.clone().await.map_err(|_| SignalError::Abandoned)
    }
}

/// Create a linked source/signal pair
pub fn completion<T: Clone>() -> (CompletionSource<T>, CompletionSignal<T>) {
    let (tx, rx) = oneshot::channel();
    (
        CompletionSource { tx: Some(tx) },
        CompletionSignal { rx: rx.shared() },
    )
}

/// A source shared between a pointer handler and a spawned motion task
pub type SharedSource = Rc<RefCell<CompletionSource<bool>>>;

/// Resolve a shared source, logging (not panicking) on contract violations
pub fn resolve_logged(source: &SharedSource, value: bool) {
    if let Err(e) = source.borrow_mut().resolve(value) {
        tracing::error!("{e}");
    }
}
