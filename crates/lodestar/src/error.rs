//! Error types for Lodestar operations.
//!
//! Geometry computations in this crate are total: malformed input
//! (empty selections, zero-area rectangles, stale identifiers) produces
//! empty results, never an error. The one strict-invariant area is the
//! snap-strategy lifecycle — beginning an already-active strategy, or
//! computing/ending/pausing an inactive one, indicates a caller bug in
//! gesture sequencing and fails fast with [`StateError`].

use thiserror::Error;

/// A snap-strategy lifecycle contract violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("snap strategy `{strategy}` is already active")]
    AlreadyActive { strategy: &'static str },

    #[error("snap strategy `{strategy}` is not active")]
    NotActive { strategy: &'static str },
}
