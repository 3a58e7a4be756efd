use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::align::calculator::AlignmentResult;
use crate::align::config::AlignConfig;
use crate::animation::schedule::{AnimationSchedule, AnimationStyle};
use crate::encode::gif::{GifSink, GifSinkOpts};
use crate::encode::sink::{AnimationSink, SinkConfig};
use crate::export::progress::{ExportProgress, ExportStage, Reporter};
use crate::export::{PhotoSource, load_pair};
use crate::foundation::core::{Canvas, Format};
use crate::foundation::error::{SplitshotError, SplitshotResult};
use crate::render::backend::{FrameRGBA, RenderSettings};
use crate::render::preview::Preview;

/// Everything needed to produce one animated comparison.
#[derive(Clone, Debug)]
pub struct AnimationRequest {
    /// Reference photo.
    pub before: PhotoSource,
    /// Comparison photo.
    pub after: PhotoSource,
    /// Motion model.
    pub style: AnimationStyle,
    /// Total loop duration in seconds.
    pub duration_secs: f64,
    /// Aspect ratio of the canvas.
    pub format: Format,
    /// Canvas width; height follows from `format`.
    pub width: u32,
    /// Background and labels.
    pub settings: RenderSettings,
    /// Alignment tuning.
    pub align: AlignConfig,
    /// Set to `true` from any thread to stop between frames.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl AnimationRequest {
    /// Request using the style's default duration.
    pub fn new(
        before: PhotoSource,
        after: PhotoSource,
        style: AnimationStyle,
        format: Format,
        width: u32,
    ) -> Self {
        Self {
            before,
            after,
            style,
            duration_secs: style.default_duration_secs(),
            format,
            width,
            settings: RenderSettings::default(),
            align: AlignConfig::default(),
            cancel: None,
        }
    }

    /// Override the loop duration.
    pub fn with_duration_secs(mut self, duration_secs: f64) -> Self {
        self.duration_secs = duration_secs;
        self
    }

    /// Replace render settings.
    pub fn with_settings(mut self, settings: RenderSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace alignment tuning.
    pub fn with_align_config(mut self, align: AlignConfig) -> Self {
        self.align = align;
        self
    }

    /// Attach a cancellation flag.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|c| c.load(Ordering::Relaxed))
    }
}

/// Summary of a finished animation export.
#[derive(Clone, Debug)]
pub struct AnimationExport {
    /// Canvas every frame was drawn on.
    pub canvas: Canvas,
    /// The single alignment shared by all frames.
    pub alignment: AlignmentResult,
    /// Frame count and delays handed to the sink.
    pub schedule: AnimationSchedule,
}

/// An encoded GIF plus its export summary.
#[derive(Clone, Debug)]
pub struct GifExport {
    /// GIF bytes.
    pub bytes: Vec<u8>,
    /// Export summary.
    pub summary: AnimationExport,
}

/// Decode both photos in parallel, align once, then render and hand each frame to `sink` in
/// order.
///
/// Only one rendered frame is owned here at a time; buffering beyond that is up to the sink.
#[tracing::instrument(
    skip_all,
    fields(style = ?req.style, format = %req.format, width = req.width)
)]
pub fn export_animation(
    req: &AnimationRequest,
    sink: &mut dyn AnimationSink,
    progress: Option<&mut dyn FnMut(ExportProgress)>,
) -> SplitshotResult<AnimationExport> {
    let started = Instant::now();
    let mut reporter = Reporter::new(progress);

    reporter.report(ExportStage::Loading, 0.0);
    let pair = load_pair(&req.before, &req.after)?;
    if req.cancelled() {
        return Err(SplitshotError::Cancelled);
    }

    reporter.report(ExportStage::Aligning, 0.1);
    let mut preview = Preview::animation(
        &pair,
        &req.align,
        req.style,
        req.duration_secs,
        req.format,
        req.width,
        &req.settings,
    )?;
    drop(pair);
    let alignment = *preview.alignment();
    let schedule = preview
        .schedule()
        .cloned()
        .ok_or_else(|| SplitshotError::surface("animation preview has no schedule"))?;
    let canvas = preview.canvas();
    tracing::debug!(
        frames = schedule.frame_count,
        total_ms = schedule.total_ms(),
        shoulder_anchor = alignment.used_shoulder_anchor,
        "animation prepared"
    );

    sink.begin(SinkConfig {
        width: canvas.width,
        height: canvas.height,
        frame_count: schedule.frame_count,
    })?;

    let mut pixmap = preview.new_pixmap();
    let n = schedule.frame_count;
    for (idx, &delay_ms) in schedule.delays_ms.iter().enumerate() {
        if req.cancelled() {
            tracing::debug!(frame = idx, "animation export cancelled");
            return Err(SplitshotError::Cancelled);
        }
        preview.render_into(idx, &mut pixmap)?;
        let frame = FrameRGBA::from_pixmap(&pixmap);
        sink.push_frame(idx, frame, delay_ms)?;
        reporter.report(ExportStage::Rendering, 0.1 + 0.8 * ((idx + 1) as f64 / n as f64));
    }

    reporter.report(ExportStage::Encoding, 0.9);
    sink.end()?;
    reporter.report(ExportStage::Done, 1.0);

    tracing::info!(
        style = ?req.style,
        frames = n,
        width = canvas.width,
        height = canvas.height,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "animation export complete"
    );
    Ok(AnimationExport {
        canvas,
        alignment,
        schedule,
    })
}

/// [`export_animation`] into a looping GIF.
pub fn export_gif(
    req: &AnimationRequest,
    opts: GifSinkOpts,
    progress: Option<&mut dyn FnMut(ExportProgress)>,
) -> SplitshotResult<GifExport> {
    let mut sink = GifSink::new(opts);
    let summary = export_animation(req, &mut sink, progress)?;
    let bytes = sink
        .take_bytes()
        .ok_or_else(|| SplitshotError::encode("gif encoder produced no output"))?;
    Ok(GifExport { bytes, summary })
}
