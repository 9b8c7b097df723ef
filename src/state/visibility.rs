//! The visibility reducer.
//!
//! Folds position-change events from the two boundary watchers into the
//! single authoritative `virtualized` flag. This is the only logic in the
//! crate with real design content; everything else is plumbing around it.
//!
//! # Initialization race
//!
//! The two watchers fire asynchronously in unspecified order at mount. A
//! single boundary crossing is ambiguous on its own, so before both
//! boundaries have reported once, per-boundary decisions are buffered in a
//! two-slot record and the global flag is left untouched. When the second
//! slot fills, the flag initializes to not-virtualized only if *both*
//! boundaries supplied visible evidence: each inbound report is one of the
//! two necessary conditions for the region to intersect the window (top
//! edge at-or-above the window bottom, bottom edge at-or-below the window
//! top). From then on each boundary is independently authoritative for its
//! own edge and the buffered slots are never consulted again.

use tracing::{debug, trace};

use crate::model::{Boundary, Position, PositionChange};

/// Per-boundary opinions buffered before initialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PendingDecisions {
    top: Option<bool>,
    bottom: Option<bool>,
}

impl PendingDecisions {
    fn slot_mut(&mut self, boundary: Boundary) -> &mut Option<bool> {
        match boundary {
            Boundary::Top => &mut self.top,
            Boundary::Bottom => &mut self.bottom,
        }
    }

    /// Both slots, once both boundaries have reported.
    fn complete(self) -> Option<(bool, bool)> {
        Some((self.top?, self.bottom?))
    }
}

/// Classify one event into a virtualization opinion.
///
/// `Some(false)` = evidence of visibility, `Some(true)` = evidence of
/// non-visibility, `None` = no opinion (retain current state).
fn decide(boundary: Boundary, change: PositionChange) -> Option<bool> {
    let outbound = boundary.outbound();
    let visible_side =
        change.current == boundary.inbound() || change.current == Position::Inside;

    match change.previous {
        None if change.current == outbound => Some(true),
        None if visible_side => Some(false),
        Some(prev) if prev == outbound && visible_side => Some(false),
        Some(Position::Inside) if change.current == outbound => Some(true),
        _ => None,
    }
}

/// Authoritative visibility state for one gated region.
///
/// Created with `virtualized = !optimistic`; mutated only through
/// [`observe`](Self::observe); frozen by [`tear_down`](Self::tear_down).
#[derive(Debug)]
pub struct VisibilityTracker {
    virtualized: bool,
    initialized: bool,
    pending: PendingDecisions,
    torn_down: bool,
    only_in: bool,
    ever_visible: bool,
}

impl VisibilityTracker {
    /// Create a tracker.
    ///
    /// `optimistic` sets only the pre-initialization rendering assumption;
    /// it does not bias the reducer. `only_in` arms the one-way latch (see
    /// [`is_settled`](Self::is_settled)).
    pub fn new(optimistic: bool, only_in: bool) -> Self {
        Self {
            virtualized: !optimistic,
            initialized: false,
            pending: PendingDecisions::default(),
            torn_down: false,
            only_in,
            ever_visible: false,
        }
    }

    /// Current flag: `true` means the placeholder should render.
    pub fn is_virtualized(&self) -> bool {
        self.virtualized
    }

    /// Whether both boundaries have reported at least once.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the `only_in` latch has engaged.
    ///
    /// Once the region has been observed visible after initialization, an
    /// `only_in` tracker stops reacting to events entirely; the embedder
    /// should drop its watchers and render the actual content from then on.
    pub fn is_settled(&self) -> bool {
        self.only_in && self.ever_visible
    }

    /// Whether [`tear_down`](Self::tear_down) has been called.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Stop accepting events. Idempotent; pending events become no-ops.
    pub fn tear_down(&mut self) {
        self.torn_down = true;
    }

    /// Fold one boundary event into the state.
    ///
    /// Returns `Some(new_flag)` exactly when the global flag actually
    /// changed, for the embedder to forward to its change callback. No-op
    /// decisions, pre-initialization buffering, and events after teardown
    /// or after the latch has engaged all return `None`.
    pub fn observe(&mut self, boundary: Boundary, change: PositionChange) -> Option<bool> {
        if self.torn_down || self.is_settled() {
            return None;
        }

        let decision = decide(boundary, change);
        trace!(?boundary, ?change, ?decision, "boundary event");

        let emitted = if self.initialized {
            match decision {
                Some(virtualized) => self.update(virtualized),
                None => None,
            }
        } else {
            // A boundary with no opinion on its first report still counts
            // as having reported; it inherits the current assumption.
            *self.pending.slot_mut(boundary) = Some(decision.unwrap_or(self.virtualized));
            match self.pending.complete() {
                Some((top, bottom)) => {
                    self.initialized = true;
                    self.update(top || bottom)
                }
                None => None,
            }
        };

        if self.initialized && !self.virtualized {
            self.ever_visible = true;
        }
        emitted
    }

    fn update(&mut self, virtualized: bool) -> Option<bool> {
        if self.virtualized == virtualized {
            return None;
        }
        self.virtualized = virtualized;
        debug!(virtualized, "visibility changed");
        Some(virtualized)
    }
}

#[cfg(test)]
#[path = "visibility_tests.rs"]
mod tests;
