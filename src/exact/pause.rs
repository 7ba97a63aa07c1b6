//! Pause checkpoint for long-running exact searches.
//!
//! A [`PauseToken`] is a shared flag that any thread (typically a signal
//! handler) can raise. The search polls it once per permutation; when raised,
//! the flag is cleared and the injected [`PauseHandler`] receives an
//! [`ExactProgress`] snapshot. The handler may block; the search resumes from
//! the same state once it returns.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Snapshot of an exact search handed to a [`PauseHandler`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExactProgress {
    /// Shortest closed length seen so far.
    pub best_length: f64,
    /// Longest closed length seen so far.
    pub worst_length: f64,
    /// Permutations evaluated so far.
    pub evaluated: u64,
}

/// Shared pause request flag.
///
/// Cloning yields another handle to the same flag.
///
/// # Examples
///
/// ```
/// use u_tsp::exact::PauseToken;
///
/// let token = PauseToken::new();
/// let remote = token.clone();
/// remote.request();
/// assert!(token.take());
/// assert!(!token.take());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PauseToken(Arc<AtomicBool>);

impl PauseToken {
    /// Creates a lowered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag. Safe to call from any thread.
    pub fn request(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether a pause is pending, without clearing it.
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Clears the flag, returning whether it was raised.
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }
}

/// Receives progress when a pause is taken.
pub trait PauseHandler {
    /// Called on the search thread with the current progress.
    fn on_pause(&mut self, progress: &ExactProgress);
}

impl<F: FnMut(&ExactProgress)> PauseHandler for F {
    fn on_pause(&mut self, progress: &ExactProgress) {
        self(progress)
    }
}

/// A token paired with the handler that services it.
pub struct Pause<'a> {
    token: &'a PauseToken,
    handler: &'a mut dyn PauseHandler,
}

impl<'a> Pause<'a> {
    /// Pairs `token` with `handler`.
    pub fn new(token: &'a PauseToken, handler: &'a mut dyn PauseHandler) -> Self {
        Self { token, handler }
    }

    /// Services a pending request, if any. Returns whether the handler ran.
    pub(crate) fn poll(&mut self, progress: impl FnOnce() -> ExactProgress) -> bool {
        if !self.token.take() {
            return false;
        }
        let snapshot = progress();
        tracing::debug!(
            evaluated = snapshot.evaluated,
            best = snapshot.best_length,
            "exact search paused"
        );
        self.handler.on_pause(&snapshot);
        true
    }
}
