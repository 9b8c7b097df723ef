//! Boundary watchers (waypoints) over viewport geometry.
//!
//! The embedder owns scrolling; each tick it hands the gate a
//! [`ViewportGeometry`] snapshot and the waypoints classify their sentinel
//! rows against the scroll window, emitting a [`PositionChange`] whenever
//! the classification differs from the last report. All math is in signed
//! content-space rows: pre-trigger offsets may displace a sentinel before
//! row zero.

use crate::config::Offset;
use crate::model::{Boundary, Position, PositionChange};

/// Per-tick geometry of the scroll window and the gated region.
///
/// All fields are content-space rows: `scroll_offset` is the first visible
/// row of the scrollable document, `region_top` the first row of the gated
/// region within that document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportGeometry {
    /// First visible content row.
    pub scroll_offset: usize,
    /// Height of the visible window in rows.
    pub viewport_height: u16,
    /// First content row of the gated region.
    pub region_top: usize,
    /// Height of the gated region in rows.
    pub region_height: u16,
}

impl ViewportGeometry {
    /// Bundle a geometry snapshot.
    pub fn new(
        scroll_offset: usize,
        viewport_height: u16,
        region_top: usize,
        region_height: u16,
    ) -> Self {
        Self {
            scroll_offset,
            viewport_height,
            region_top,
            region_height,
        }
    }

    /// Half-open visible window `[start, end)` in signed rows.
    fn window(&self) -> (i64, i64) {
        let start = self.scroll_offset as i64;
        (start, start + i64::from(self.viewport_height))
    }

    /// Last row of the region (equal to `region_top` for empty regions).
    fn region_bottom(&self) -> i64 {
        self.region_top as i64 + i64::from(self.region_height.saturating_sub(1))
    }

    /// Classify a sentinel row against the window.
    ///
    /// A zero-height window contains nothing: every row classifies as
    /// above or below it.
    fn classify(&self, row: i64) -> Position {
        let (start, end) = self.window();
        if row < start {
            Position::Above
        } else if row >= end {
            Position::Below
        } else {
            Position::Inside
        }
    }
}

/// One boundary watcher.
///
/// Registered with a direction and a pre-trigger offset; stateful only in
/// remembering its last classification so transitions fire exactly once.
#[derive(Debug, Clone)]
pub struct Waypoint {
    boundary: Boundary,
    offset: Offset,
    last: Option<Position>,
}

impl Waypoint {
    /// Register a watcher for one edge of the gated region.
    pub fn new(boundary: Boundary, offset: Offset) -> Self {
        Self {
            boundary,
            offset,
            last: None,
        }
    }

    /// The edge this watcher observes.
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Sentinel row for the current geometry: the watched edge displaced
    /// away from the region by the resolved offset, so the boundary
    /// triggers before the edge itself reaches the window.
    fn sentinel(&self, geometry: &ViewportGeometry) -> i64 {
        let displacement = i64::from(self.offset.resolve(geometry.viewport_height));
        match self.boundary {
            Boundary::Top => geometry.region_top as i64 - displacement,
            Boundary::Bottom => geometry.region_bottom() + displacement,
        }
    }

    /// Reclassify against a fresh geometry snapshot.
    ///
    /// Emits a change when the position differs from the last report; the
    /// first call always emits, with `previous = None`.
    pub fn update(&mut self, geometry: &ViewportGeometry) -> Option<PositionChange> {
        let current = geometry.classify(self.sentinel(geometry));
        if self.last == Some(current) {
            return None;
        }
        let previous = self.last.replace(current);
        Some(PositionChange { previous, current })
    }
}
