//! Pair alignment: one pure function shared by every render surface.

/// Pair alignment calculator.
pub mod calculator;
/// Tunable alignment constants.
pub mod config;
