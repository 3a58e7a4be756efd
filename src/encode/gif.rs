use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TrySendError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use image::codecs::gif::{GifEncoder, Repeat};

use crate::encode::sink::{AnimationSink, SinkConfig, check_frame};
use crate::foundation::error::{SplitshotError, SplitshotResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::backend::FrameRGBA;

/// Callback invoked on the encoder thread with `(frames_encoded, frames_total)`.
pub type GifProgressFn = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Options for [`GifSink`].
#[derive(Clone)]
pub struct GifSinkOpts {
    /// Frames allowed in flight between the renderer and the encoder thread.
    pub queue_depth: usize,
    /// Quantizer speed, 1 (best) to 30 (fastest).
    pub speed: i32,
    /// Hard deadline for the whole encode, measured from `begin`.
    pub timeout: Duration,
    /// Optional progress callback.
    pub progress: Option<GifProgressFn>,
}

impl Default for GifSinkOpts {
    fn default() -> Self {
        Self {
            queue_depth: 2,
            speed: 10,
            timeout: Duration::from_secs(60),
            progress: None,
        }
    }
}

impl std::fmt::Debug for GifSinkOpts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GifSinkOpts")
            .field("queue_depth", &self.queue_depth)
            .field("speed", &self.speed)
            .field("timeout", &self.timeout)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl GifSinkOpts {
    /// Bound on frames waiting for the encoder.
    pub fn with_queue_depth(mut self, queue_depth: usize) -> Self {
        self.queue_depth = queue_depth;
        self
    }

    /// Quantizer speed.
    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = speed;
        self
    }

    /// Encode deadline.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Progress callback.
    pub fn with_progress(mut self, progress: impl Fn(usize, usize) + Send + Sync + 'static) -> Self {
        self.progress = Some(Arc::new(progress));
        self
    }

    fn validate(&self) -> SplitshotResult<()> {
        if self.queue_depth == 0 {
            return Err(SplitshotError::validation("gif queue_depth must be >= 1"));
        }
        if !(1..=30).contains(&self.speed) {
            return Err(SplitshotError::validation("gif speed must be in 1..=30"));
        }
        Ok(())
    }
}

type FrameMsg = (FrameRGBA, u32);

struct Worker {
    tx: Option<SyncSender<FrameMsg>>,
    done: Receiver<SplitshotResult<Vec<u8>>>,
    handle: Option<JoinHandle<()>>,
    deadline: Instant,
}

/// Looping GIF encoder running on a background thread.
///
/// Frames are moved through a bounded queue and dropped as soon as they are encoded, so memory
/// stays bounded by `queue_depth` regardless of frame count. Every blocking step observes a
/// single deadline set in [`AnimationSink::begin`].
pub struct GifSink {
    opts: GifSinkOpts,
    cfg: Option<SinkConfig>,
    worker: Option<Worker>,
    bytes: Option<Vec<u8>>,
}

impl GifSink {
    /// Create a sink; the encoder thread starts in `begin`.
    pub fn new(opts: GifSinkOpts) -> Self {
        Self {
            opts,
            cfg: None,
            worker: None,
            bytes: None,
        }
    }

    /// Take ownership of the encoded GIF, available after a successful `end`.
    pub fn take_bytes(&mut self) -> Option<Vec<u8>> {
        self.bytes.take()
    }

    fn timeout_error(&self) -> SplitshotError {
        SplitshotError::EncoderTimeout {
            secs: self.opts.timeout.as_secs(),
        }
    }

    /// Error to report once the encoder thread stopped accepting frames.
    fn worker_failure(&mut self) -> SplitshotError {
        let Some(worker) = self.worker.as_mut() else {
            return SplitshotError::encode("gif encoder is not running");
        };
        worker.tx = None;
        let remaining = worker.deadline.saturating_duration_since(Instant::now());
        match worker.done.recv_timeout(remaining) {
            Ok(Err(e)) => e,
            Ok(Ok(_)) => SplitshotError::encode("gif encoder finished before all frames arrived"),
            Err(RecvTimeoutError::Timeout) => self.timeout_error(),
            Err(RecvTimeoutError::Disconnected) => {
                SplitshotError::encode("gif encoder thread exited unexpectedly")
            }
        }
    }
}

impl AnimationSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> SplitshotResult<()> {
        self.opts.validate()?;
        if cfg.width == 0 || cfg.height == 0 {
            return Err(SplitshotError::validation("gif width/height must be non-zero"));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(SplitshotError::validation(format!(
                "gif frames are limited to 65535x65535, got {}x{}",
                cfg.width, cfg.height
            )));
        }

        let (tx, rx) = mpsc::sync_channel::<FrameMsg>(self.opts.queue_depth);
        let (done_tx, done) = mpsc::channel();
        let speed = self.opts.speed;
        let progress = self.opts.progress.clone();
        let handle = std::thread::Builder::new()
            .name("splitshot-gif".to_owned())
            .spawn(move || {
                let res = encode_gif(rx, cfg, speed, progress.as_deref());
                // The sink may have given up on us already.
                let _ = done_tx.send(res);
            })
            .map_err(|e| SplitshotError::encode(format!("failed to spawn gif encoder: {e}")))?;

        tracing::debug!(
            width = cfg.width,
            height = cfg.height,
            frames = cfg.frame_count,
            queue_depth = self.opts.queue_depth,
            "gif encoder started"
        );

        self.cfg = Some(cfg);
        self.bytes = None;
        self.worker = Some(Worker {
            tx: Some(tx),
            done,
            handle: Some(handle),
            deadline: Instant::now() + self.opts.timeout,
        });
        Ok(())
    }

    fn push_frame(&mut self, idx: usize, frame: FrameRGBA, delay_ms: u32) -> SplitshotResult<()> {
        let Some(cfg) = self.cfg else {
            return Err(SplitshotError::encode("push_frame called before begin"));
        };
        check_frame(&cfg, &frame)?;
        if idx >= cfg.frame_count {
            return Err(SplitshotError::encode(format!(
                "frame {idx} exceeds announced frame count {}",
                cfg.frame_count
            )));
        }

        let Some(worker) = self.worker.as_ref() else {
            return Err(SplitshotError::encode("gif encoder is not running"));
        };
        let Some(tx) = worker.tx.as_ref() else {
            return Err(SplitshotError::encode("gif encoder input already closed"));
        };
        let deadline = worker.deadline;

        // `SyncSender` has no stable `send_timeout`; poll so a full queue still honors the
        // deadline.
        let mut msg = (frame, delay_ms);
        loop {
            match tx.try_send(msg) {
                Ok(()) => return Ok(()),
                Err(TrySendError::Full(back)) => {
                    if Instant::now() >= deadline {
                        return Err(self.timeout_error());
                    }
                    msg = back;
                    std::thread::sleep(Duration::from_millis(2));
                }
                Err(TrySendError::Disconnected(_)) => break,
            }
        }
        Err(self.worker_failure())
    }

    fn end(&mut self) -> SplitshotResult<()> {
        let Some(mut worker) = self.worker.take() else {
            return Err(SplitshotError::encode("end called before begin"));
        };
        // Closing the queue tells the encoder no more frames are coming.
        worker.tx = None;

        let remaining = worker.deadline.saturating_duration_since(Instant::now());
        match worker.done.recv_timeout(remaining) {
            Ok(res) => {
                if let Some(handle) = worker.handle.take() {
                    let _ = handle.join();
                }
                let bytes = res?;
                tracing::debug!(bytes = bytes.len(), "gif encoder finished");
                self.bytes = Some(bytes);
                Ok(())
            }
            // The thread is left to finish or fail on its own.
            Err(RecvTimeoutError::Timeout) => Err(self.timeout_error()),
            Err(RecvTimeoutError::Disconnected) => Err(SplitshotError::encode(
                "gif encoder thread exited without a result",
            )),
        }
    }
}

fn encode_gif(
    rx: Receiver<FrameMsg>,
    cfg: SinkConfig,
    speed: i32,
    progress: Option<&(dyn Fn(usize, usize) + Send + Sync)>,
) -> SplitshotResult<Vec<u8>> {
    let mut out = Vec::new();
    let mut encoded = 0usize;
    {
        let mut enc = GifEncoder::new_with_speed(&mut out, speed);
        enc.set_repeat(Repeat::Infinite)
            .map_err(|e| SplitshotError::encode(format!("gif init: {e}")))?;

        for (frame, delay_ms) in rx.iter() {
            let img = to_straight_rgba(frame)?;
            let delay = image::Delay::from_numer_denom_ms(delay_ms, 1);
            enc.encode_frame(image::Frame::from_parts(img, 0, 0, delay))
                .map_err(|e| SplitshotError::encode(format!("gif frame {encoded}: {e}")))?;
            encoded += 1;
            if let Some(cb) = progress {
                cb(encoded, cfg.frame_count);
            }
        }
    }

    if encoded != cfg.frame_count {
        return Err(SplitshotError::encode(format!(
            "gif input closed after {encoded} of {} frames",
            cfg.frame_count
        )));
    }
    Ok(out)
}

fn to_straight_rgba(frame: FrameRGBA) -> SplitshotResult<image::RgbaImage> {
    let FrameRGBA {
        width,
        height,
        mut data,
        premultiplied,
    } = frame;
    if premultiplied {
        unpremultiply_rgba8_in_place(&mut data);
    }
    image::RgbaImage::from_raw(width, height, data)
        .ok_or_else(|| SplitshotError::encode("frame buffer does not match its dimensions"))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
