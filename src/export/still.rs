use std::time::Instant;

use crate::align::calculator::AlignmentResult;
use crate::align::config::AlignConfig;
use crate::encode::still::{StillFormat, encode_still};
use crate::export::progress::{ExportProgress, ExportStage, Reporter};
use crate::export::{PhotoSource, load_pair};
use crate::foundation::core::Format;
use crate::foundation::error::{SplitshotError, SplitshotResult};
use crate::render::backend::{FrameRGBA, RenderSettings};
use crate::render::preview::Preview;
use crate::render::still::StillLayout;

/// Everything needed to produce one side-by-side still.
#[derive(Clone, Debug)]
pub struct StillRequest {
    /// Reference photo (left panel).
    pub before: PhotoSource,
    /// Comparison photo (right panel).
    pub after: PhotoSource,
    /// Requested aspect ratio of the full canvas.
    pub format: Format,
    /// Requested canvas width; the final width may shrink to keep the ratio.
    pub width: u32,
    /// Background and labels.
    pub settings: RenderSettings,
    /// Alignment tuning.
    pub align: AlignConfig,
    /// Output container.
    pub encoding: StillFormat,
}

impl StillRequest {
    /// Request with default settings, alignment and PNG output.
    pub fn new(before: PhotoSource, after: PhotoSource, format: Format, width: u32) -> Self {
        Self {
            before,
            after,
            format,
            width,
            settings: RenderSettings::default(),
            align: AlignConfig::default(),
            encoding: StillFormat::Png,
        }
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

    /// Replace the output container.
    pub fn with_encoding(mut self, encoding: StillFormat) -> Self {
        self.encoding = encoding;
        self
    }
}

/// A composed still before encoding.
#[derive(Clone, Debug)]
pub struct StillRender {
    /// Composited pixels (premultiplied).
    pub frame: FrameRGBA,
    /// Alignment computed for one panel.
    pub alignment: AlignmentResult,
    /// Final canvas geometry.
    pub layout: StillLayout,
}

/// An encoded still.
#[derive(Clone, Debug)]
pub struct StillExport {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// Final canvas width.
    pub width: u32,
    /// Final canvas height.
    pub height: u32,
    /// Alignment computed for one panel.
    pub alignment: AlignmentResult,
}

/// Decode, align and compose the still without encoding it.
#[tracing::instrument(level = "debug", skip_all, fields(format = %req.format, width = req.width))]
pub fn render_still(
    req: &StillRequest,
    progress: Option<&mut dyn FnMut(ExportProgress)>,
) -> SplitshotResult<StillRender> {
    let mut reporter = Reporter::new(progress);
    render_still_with(req, &mut reporter)
}

fn render_still_with(req: &StillRequest, reporter: &mut Reporter<'_>) -> SplitshotResult<StillRender> {
    reporter.report(ExportStage::Loading, 0.0);
    let pair = load_pair(&req.before, &req.after)?;

    reporter.report(ExportStage::Aligning, 0.4);
    let mut preview = Preview::still(&pair, &req.align, req.format, req.width, &req.settings)?;
    let alignment = *preview.alignment();
    let layout = preview
        .still_layout()
        .copied()
        .ok_or_else(|| SplitshotError::surface("still preview has no layout"))?;

    reporter.report(ExportStage::Rendering, 0.5);
    let frame = preview.render(0)?;
    Ok(StillRender {
        frame,
        alignment,
        layout,
    })
}

/// Decode, align, compose and encode a still. No partial output is produced on failure.
#[tracing::instrument(skip_all, fields(format = %req.format, width = req.width))]
pub fn export_still(
    req: &StillRequest,
    progress: Option<&mut dyn FnMut(ExportProgress)>,
) -> SplitshotResult<StillExport> {
    let started = Instant::now();
    let mut reporter = Reporter::new(progress);
    let render = render_still_with(req, &mut reporter)?;

    reporter.report(ExportStage::Encoding, 0.8);
    let bytes = encode_still(&render.frame, req.encoding, req.settings.background)?;
    reporter.report(ExportStage::Done, 1.0);

    tracing::info!(
        width = render.frame.width,
        height = render.frame.height,
        bytes = bytes.len(),
        shoulder_anchor = render.alignment.used_shoulder_anchor,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "still export complete"
    );
    Ok(StillExport {
        width: render.frame.width,
        height: render.frame.height,
        bytes,
        alignment: render.alignment,
    })
}
