//! Timing for animated exports.

/// Easing curves.
pub mod ease;
/// Per-style frame counts and delays.
pub mod schedule;
