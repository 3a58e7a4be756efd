//! Geometry primitives: cover-fit sizing and landmark-derived anchors.

/// Landmarks, anchors, and body height.
pub mod landmark;
/// Draw rectangles and cover-fit.
pub mod rect;
