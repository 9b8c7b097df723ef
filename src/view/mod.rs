//! Gate rendering (impure shell).
//!
//! The reducer in `state` is pure; this module owns everything observable:
//! drawing into ratatui buffers and dispatching change callbacks.

mod gate;
mod placeholder;

pub use gate::LazyGate;
