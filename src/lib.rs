//! lazygate
//!
//! Deferred-rendering gate widget for scrollable ratatui content.
//!
//! A [`LazyGate`] wraps one expensive region of a scrollable view and draws
//! a cheap placeholder until the region nears the visible window. Two
//! boundary waypoints (top and bottom edge, each displaced by a
//! configurable pre-trigger offset) feed a small state machine that is
//! careful about the mount race: neither waypoint's first report alone can
//! flip the rendered output.
//!
//! # Architecture
//!
//! Pure core, impure shell:
//!
//! ```text
//! ViewportGeometry → Waypoint (top/bottom) → PositionChange
//!                  → VisibilityTracker → virtualized flag
//!                  → LazyGate::render → placeholder | content
//! ```
//!
//! - [`model`] - positions, boundaries, events, errors (pure data)
//! - [`state`] - the visibility reducer (pure transitions)
//! - [`watcher`] - sentinel classification over viewport geometry
//! - [`config`] - offsets and gate options
//! - [`view`] - the gate widget (drawing, callbacks)
//! - [`logging`] - optional file-backed subscriber for demos

pub mod config;
pub mod logging;
pub mod model;
pub mod state;
pub mod view;
pub mod watcher;

// Re-export the embedder-facing surface
pub use config::{GateConfig, Offset};
pub use model::{Boundary, GateError, OffsetParseError, Position, PositionChange};
pub use state::VisibilityTracker;
pub use view::LazyGate;
pub use watcher::{ViewportGeometry, Waypoint};
