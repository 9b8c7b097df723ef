//! Gate configuration.

pub mod offset;

pub use offset::Offset;

use tracing::warn;

/// Options recognized by a gate.
///
/// Everything here is defensively defaulted; `GateConfig::new()` (or
/// `Default`) yields a gate that pre-triggers half a viewport away on both
/// edges, starts pessimistic, and tracks in and out indefinitely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateConfig {
    /// Pre-trigger distance for the top boundary.
    pub offset_top: Offset,
    /// Pre-trigger distance for the bottom boundary.
    pub offset_bottom: Offset,
    /// Render the actual content until tracking reports otherwise.
    pub optimistic: bool,
    /// One-way latch: once the region has been seen, stop tracking and
    /// render the actual content forever after.
    pub only_in: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            offset_top: Offset::default(),
            offset_bottom: Offset::default(),
            optimistic: false,
            only_in: false,
        }
    }
}

impl GateConfig {
    /// Default configuration; builder setters refine it.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the top pre-trigger distance.
    pub fn offset_top(mut self, offset: impl Into<Offset>) -> Self {
        self.offset_top = offset.into();
        self
    }

    /// Set the bottom pre-trigger distance.
    pub fn offset_bottom(mut self, offset: impl Into<Offset>) -> Self {
        self.offset_bottom = offset.into();
        self
    }

    /// Set both pre-trigger distances at once.
    pub fn offsets(self, offset: impl Into<Offset> + Copy) -> Self {
        self.offset_top(offset).offset_bottom(offset)
    }

    /// Start from the assumption that the region is visible.
    pub fn optimistic(mut self, optimistic: bool) -> Self {
        self.optimistic = optimistic;
        self
    }

    /// Arm the one-way latch.
    pub fn only_in(mut self, only_in: bool) -> Self {
        self.only_in = only_in;
        self
    }

    /// Log warnings for configurations that are legal but almost certainly
    /// not what the embedder meant.
    pub fn validate(&self) {
        for (label, offset) in [("offset_top", self.offset_top), ("offset_bottom", self.offset_bottom)]
        {
            if let Offset::Percent(percent) = offset {
                if percent > 100 {
                    warn!(
                        offset = label,
                        percent, "pre-trigger exceeds a full viewport height"
                    );
                }
            }
        }
    }
}
