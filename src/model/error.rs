//! Error types for lazygate.
//!
//! Structured errors via `thiserror`, composing with `?` and `From`
//! conversions. The gate is defensive about almost everything: events after
//! teardown are suppressed, offsets default when omitted, and a missing
//! placeholder falls back to the built-in one. The single hard failure is a
//! gate with nothing to render.

use thiserror::Error;

/// Top-level gate error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    /// Neither a children closure nor a render closure was supplied.
    ///
    /// Raised at render time, regardless of whether the gate would have
    /// drawn the placeholder this frame: a gate that can never show its
    /// content is a configuration bug, and deferring the failure to the
    /// first visible frame would hide it.
    #[error("no content provider: supply a children or render closure")]
    MissingContent,

    /// An offset string could not be parsed.
    #[error(transparent)]
    Offset(#[from] OffsetParseError),
}

/// Errors from parsing pre-trigger offset strings.
///
/// Offsets accept plain row counts (`"12"`) and viewport-height percentages
/// (`"50%"`). The raw input is preserved so embedders can report exactly
/// what was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OffsetParseError {
    /// The offset string was empty or whitespace.
    #[error("empty offset string")]
    Empty,

    /// The offset string was not a row count or percentage.
    #[error("invalid offset '{raw}': expected rows (e.g. \"12\") or a percentage (e.g. \"50%\")")]
    Invalid {
        /// The rejected input, verbatim.
        raw: String,
    },
}
