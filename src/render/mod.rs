//! CPU rendering of aligned pairs onto caller-owned surfaces.

/// Frame buffers and shared render settings.
pub mod backend;
/// `vello_cpu` painter and image paints.
pub mod cpu;
/// Slider, crossfade and toggle frames.
pub mod frames;
/// "Before"/"After" text overlay.
pub mod label;
/// Live preview surface sharing export geometry.
pub mod preview;
/// Side-by-side still compositor.
pub mod still;
