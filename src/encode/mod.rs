//! Encoding sinks.
//!
//! Animation sinks consume frames in order and are driven by `export_animation`.

/// Background-thread GIF encoder.
pub mod gif;
/// Animation sink trait and the in-memory sink.
pub mod sink;
/// PNG / JPEG still encoding.
pub mod still;
