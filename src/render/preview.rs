use crate::align::calculator::{AlignmentResult, PhotoRef, Side, calculate_alignment_with};
use crate::align::config::AlignConfig;
use crate::animation::schedule::{AnimationSchedule, AnimationStyle};
use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Canvas, Format};
use crate::foundation::error::{SplitshotError, SplitshotResult};
use crate::geometry::landmark::Landmark;
use crate::render::backend::{FrameRGBA, RenderSettings};
use crate::render::cpu::{PairPaints, Painter};
use crate::render::frames::FrameRenderer;
use crate::render::label::LabelRenderer;
use crate::render::still::{StillLayout, compose_still, layout_still};

/// Decoded before/after photos with their optional poses.
#[derive(Clone, Debug)]
pub struct PhotoPair {
    /// Reference photo.
    pub before: PreparedImage,
    /// Comparison photo.
    pub after: PreparedImage,
    /// Pose detected on `before`.
    pub before_landmarks: Option<Vec<Landmark>>,
    /// Pose detected on `after`.
    pub after_landmarks: Option<Vec<Landmark>>,
}

impl PhotoPair {
    /// Pair without poses.
    pub fn new(before: PreparedImage, after: PreparedImage) -> Self {
        Self {
            before,
            after,
            before_landmarks: None,
            after_landmarks: None,
        }
    }

    /// Attach (or clear) the pose for one side.
    pub fn with_landmarks(mut self, side: Side, landmarks: Option<Vec<Landmark>>) -> Self {
        match side {
            Side::Before => self.before_landmarks = landmarks,
            Side::After => self.after_landmarks = landmarks,
        }
        self
    }

    /// Geometry-only view of one side, as consumed by the alignment calculator.
    pub fn photo_ref(&self, side: Side) -> PhotoRef {
        let (img, landmarks) = match side {
            Side::Before => (&self.before, &self.before_landmarks),
            Side::After => (&self.after, &self.after_landmarks),
        };
        PhotoRef {
            width: img.width,
            height: img.height,
            landmarks: landmarks.clone(),
        }
    }

    fn align(&self, cfg: &AlignConfig, target: Canvas) -> AlignmentResult {
        calculate_alignment_with(
            cfg,
            &self.photo_ref(Side::Before),
            &self.photo_ref(Side::After),
            target.w(),
            target.h(),
        )
    }
}

enum Surface {
    Still {
        layout: StillLayout,
        painter: Painter,
        labels: Option<LabelRenderer>,
        settings: RenderSettings,
    },
    Animation {
        renderer: FrameRenderer,
        schedule: AnimationSchedule,
    },
}

/// A ready-to-draw comparison: alignment is computed once at construction and every
/// [`Preview::render_into`] call draws onto a caller-owned surface.
///
/// Offscreen exports go through the same type, so a live preview and an export of the same
/// inputs share geometry exactly.
pub struct Preview {
    paints: PairPaints,
    alignment: AlignmentResult,
    surface: Surface,
}

impl Preview {
    /// Side-by-side still. Alignment targets one panel of `format.canvas_for_width(width)`.
    pub fn still(
        pair: &PhotoPair,
        cfg: &AlignConfig,
        format: Format,
        width: u32,
        settings: &RenderSettings,
    ) -> SplitshotResult<Self> {
        let target = format.canvas_for_width(width);
        target.validate()?;
        let panel = target.panel();
        let alignment = pair.align(cfg, panel);
        let layout = layout_still(&alignment, panel, format);
        Ok(Self {
            paints: PairPaints::new(&pair.before, &pair.after)?,
            alignment,
            surface: Surface::Still {
                layout,
                painter: Painter::new(layout.canvas)?,
                labels: settings.labels.clone().map(LabelRenderer::new),
                settings: settings.clone(),
            },
        })
    }

    /// Animation of `style` lasting `duration_secs`. Alignment targets the full canvas.
    pub fn animation(
        pair: &PhotoPair,
        cfg: &AlignConfig,
        style: AnimationStyle,
        duration_secs: f64,
        format: Format,
        width: u32,
        settings: &RenderSettings,
    ) -> SplitshotResult<Self> {
        let target = format.canvas_for_width(width);
        target.validate()?;
        let schedule = style.schedule(duration_secs)?;
        let alignment = pair.align(cfg, target);
        Ok(Self {
            paints: PairPaints::new(&pair.before, &pair.after)?,
            alignment,
            surface: Surface::Animation {
                renderer: FrameRenderer::new(style, alignment, target, settings)?,
                schedule,
            },
        })
    }

    /// Geometry shared by every frame.
    pub fn alignment(&self) -> &AlignmentResult {
        &self.alignment
    }

    /// Still layout, when this preview is a still.
    pub fn still_layout(&self) -> Option<&StillLayout> {
        match &self.surface {
            Surface::Still { layout, .. } => Some(layout),
            Surface::Animation { .. } => None,
        }
    }

    /// Frame schedule, when this preview is an animation.
    pub fn schedule(&self) -> Option<&AnimationSchedule> {
        match &self.surface {
            Surface::Still { .. } => None,
            Surface::Animation { schedule, .. } => Some(schedule),
        }
    }

    /// Size of the surface every frame is drawn onto.
    pub fn canvas(&self) -> Canvas {
        match &self.surface {
            Surface::Still { layout, .. } => layout.canvas,
            Surface::Animation { renderer, .. } => renderer.canvas(),
        }
    }

    /// Number of distinct frames (1 for a still).
    pub fn frame_count(&self) -> usize {
        match &self.surface {
            Surface::Still { .. } => 1,
            Surface::Animation { schedule, .. } => schedule.frame_count,
        }
    }

    /// Allocate a surface of [`Preview::canvas`] size.
    pub fn new_pixmap(&self) -> vello_cpu::Pixmap {
        match &self.surface {
            Surface::Still { painter, .. } => painter.new_pixmap(),
            Surface::Animation { renderer, .. } => renderer.new_pixmap(),
        }
    }

    /// Draw frame `index` into `dst`. A still has the single frame `0`.
    pub fn render_into(&mut self, index: usize, dst: &mut vello_cpu::Pixmap) -> SplitshotResult<()> {
        match &mut self.surface {
            Surface::Still {
                layout,
                painter,
                labels,
                settings,
            } => {
                if index != 0 {
                    return Err(SplitshotError::validation(format!(
                        "still preview has a single frame, got index {index}"
                    )));
                }
                compose_still(painter, &self.paints, layout, settings, labels.as_mut(), dst)
            }
            Surface::Animation { renderer, schedule } => {
                renderer.render_into(&self.paints, index, schedule.frame_count, dst)
            }
        }
    }

    /// Draw frame `index` into a fresh buffer.
    pub fn render(&mut self, index: usize) -> SplitshotResult<FrameRGBA> {
        let mut pixmap = self.new_pixmap();
        self.render_into(index, &mut pixmap)?;
        Ok(FrameRGBA::from_pixmap(&pixmap))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
