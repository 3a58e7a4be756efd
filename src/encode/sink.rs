use crate::foundation::error::{SplitshotError, SplitshotResult};
use crate::render::backend::FrameRGBA;

/// Configuration provided to an [`AnimationSink`] before the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// Number of frames that will be pushed.
    pub frame_count: usize,
}

/// Consumer of rendered animation frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices starting at 0.
/// Frames are moved in so the sink decides how long a buffer stays alive.
pub trait AnimationSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SplitshotResult<()>;
    /// Push one frame together with its display duration.
    fn push_frame(&mut self, idx: usize, frame: FrameRGBA, delay_ms: u32) -> SplitshotResult<()>;
    /// Called once after the last frame. Blocks until output is complete.
    fn end(&mut self) -> SplitshotResult<()>;
}

/// Keeps every frame. For tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameRGBA, u32)>,
    ended: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<SinkConfig> {
        self.cfg
    }

    /// Captured frames and their delays, in push order.
    pub fn frames(&self) -> &[(FrameRGBA, u32)] {
        &self.frames
    }

    /// Delays of the captured frames.
    pub fn delays_ms(&self) -> Vec<u32> {
        self.frames.iter().map(|(_, d)| *d).collect()
    }

    /// Whether `end` was called.
    pub fn is_finished(&self) -> bool {
        self.ended
    }
}

impl AnimationSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SplitshotResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: FrameRGBA, delay_ms: u32) -> SplitshotResult<()> {
        if idx != self.frames.len() {
            return Err(SplitshotError::encode(format!(
                "frame {idx} pushed out of order (expected {})",
                self.frames.len()
            )));
        }
        self.frames.push((frame, delay_ms));
        Ok(())
    }

    fn end(&mut self) -> SplitshotResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Check a frame against the size announced in `begin`.
pub(crate) fn check_frame(cfg: &SinkConfig, frame: &FrameRGBA) -> SplitshotResult<()> {
    if frame.width != cfg.width || frame.height != cfg.height {
        return Err(SplitshotError::validation(format!(
            "frame is {}x{}, sink expects {}x{}",
            frame.width, frame.height, cfg.width, cfg.height
        )));
    }
    let expected = (cfg.width as usize)
        .saturating_mul(cfg.height as usize)
        .saturating_mul(4);
    if frame.data.len() != expected {
        return Err(SplitshotError::validation(format!(
            "frame has {} bytes, expected {expected}",
            frame.data.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
