//! Progress callbacks and cooperative cancellation for the sequencer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::{RouteLeg, RouteResult, StopSet};

/// Callbacks invoked by [`RouteSequencer::sequence_with`][crate::RouteSequencer::sequence_with].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: stop after three legs
///
/// ```rust,ignore
/// struct FirstThree(usize);
///
/// impl SequenceObserver for FirstThree {
///     fn on_leg(&mut self, _leg: &RouteLeg) { self.0 += 1; }
///     fn should_stop(&mut self) -> bool { self.0 >= 3 }
/// }
/// ```
pub trait SequenceObserver {
    /// Called once after validation, before the first shortest-path search.
    fn on_start(&mut self, _stops: &StopSet) {}

    /// Called after each leg is chosen.
    fn on_leg(&mut self, _leg: &RouteLeg) {}

    /// Polled before every nearest-stop search.  Returning `true` aborts the
    /// run with [`RouteError::Cancelled`](crate::RouteError::Cancelled).
    fn should_stop(&mut self) -> bool {
        false
    }

    /// Called once with the finished result.
    fn on_finish(&mut self, _result: &RouteResult) {}
}

impl<T: SequenceObserver + ?Sized> SequenceObserver for &mut T {
    fn on_start(&mut self, stops: &StopSet) {
        (**self).on_start(stops)
    }
    fn on_leg(&mut self, leg: &RouteLeg) {
        (**self).on_leg(leg)
    }
    fn should_stop(&mut self) -> bool {
        (**self).should_stop()
    }
    fn on_finish(&mut self, result: &RouteResult) {
        (**self).on_finish(result)
    }
}

/// A [`SequenceObserver`] that does nothing.
pub struct NoopObserver;

impl SequenceObserver for NoopObserver {}

/// `None` behaves like [`NoopObserver`].
impl<T: SequenceObserver> SequenceObserver for Option<T> {
    fn on_start(&mut self, stops: &StopSet) {
        if let Some(o) = self {
            o.on_start(stops);
        }
    }
    fn on_leg(&mut self, leg: &RouteLeg) {
        if let Some(o) = self {
            o.on_leg(leg);
        }
    }
    fn should_stop(&mut self) -> bool {
        self.as_mut().is_some_and(|o| o.should_stop())
    }
    fn on_finish(&mut self, result: &RouteResult) {
        if let Some(o) = self {
            o.on_finish(result);
        }
    }
}

// ── CancelFlag ────────────────────────────────────────────────────────────────

/// Shared cancellation switch.  Clone it, hand one copy to the sequencer and
/// call [`cancel`](Self::cancel) on another (for example from a UI thread).
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

impl SequenceObserver for CancelFlag {
    fn should_stop(&mut self) -> bool {
        self.is_cancelled()
    }
}

// ── Deadline ──────────────────────────────────────────────────────────────────

/// Stops sequencing once a wall-clock instant has passed.
///
/// Checked only between legs, so a single slow search can overrun it.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn at(at: Instant) -> Self {
        Self { at }
    }

    pub fn after(budget: Duration) -> Self {
        Self::at(Instant::now() + budget)
    }

    pub fn has_passed(&self) -> bool {
        Instant::now() >= self.at
    }
}

impl SequenceObserver for Deadline {
    fn should_stop(&mut self) -> bool {
        self.has_passed()
    }
}
