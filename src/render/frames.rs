use crate::align::calculator::{AlignmentResult, Side};
use crate::animation::ease::Ease;
use crate::animation::schedule::{AnimationStyle, TOGGLE_PATTERN};
use crate::foundation::core::{Canvas, Rect, Rgba8Premul};
use crate::foundation::error::{SplitshotError, SplitshotResult};
use crate::render::backend::{FrameRGBA, RenderSettings};
use crate::render::cpu::{PairPaints, Painter};
use crate::render::label::LabelRenderer;

/// Width of the slider's wipe line.
pub const DIVIDER_WIDTH: f64 = 3.0;
/// Width of the soft band drawn behind the wipe line.
pub const DIVIDER_SHADOW_WIDTH: f64 = 9.0;

/// What one animation frame shows, independent of any surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameState {
    /// After as the base layer, before visible right of `divider_x`.
    Slider {
        /// Wipe position in canvas pixels.
        divider_x: f64,
        /// Side the label names.
        label: Side,
    },
    /// Both photos blended.
    Crossfade {
        /// Opacity of the before photo.
        before_alpha: f32,
        /// Opacity of the after photo.
        after_alpha: f32,
        /// Side the label names.
        label: Side,
    },
    /// One photo, fully opaque.
    Show(Side),
}

impl FrameState {
    /// Side the overlay label names on this frame.
    pub fn label(self) -> Side {
        match self {
            Self::Slider { label, .. } | Self::Crossfade { label, .. } => label,
            Self::Show(side) => side,
        }
    }
}

fn progress(index: usize, frame_count: usize) -> f64 {
    if frame_count < 2 {
        return 0.0;
    }
    (index.min(frame_count - 1) as f64) / ((frame_count - 1) as f64)
}

/// Frame `index` of `frame_count` for `style` on a canvas `width` pixels wide.
pub fn frame_state(style: AnimationStyle, index: usize, frame_count: usize, width: f64) -> FrameState {
    match style {
        AnimationStyle::Slider => {
            let p = progress(index, frame_count);
            FrameState::Slider {
                divider_x: p * width,
                label: if p < 0.5 { Side::Before } else { Side::After },
            }
        }
        AnimationStyle::Crossfade => {
            let e = Ease::InOutCubic.apply(progress(index, frame_count));
            FrameState::Crossfade {
                before_alpha: (1.0 - e) as f32,
                after_alpha: e as f32,
                label: if e < 0.5 { Side::Before } else { Side::After },
            }
        }
        AnimationStyle::Toggle => {
            FrameState::Show(TOGGLE_PATTERN[index % TOGGLE_PATTERN.len()].side())
        }
    }
}

/// Renders animation frames for one export from a single shared [`AlignmentResult`].
///
/// Owns its drawing context; every frame is drawn into a caller-owned pixmap.
pub struct FrameRenderer {
    style: AnimationStyle,
    alignment: AlignmentResult,
    background: Rgba8Premul,
    painter: Painter,
    labels: Option<LabelRenderer>,
}

impl FrameRenderer {
    /// Prepare a renderer for `canvas`, the box `alignment` was computed for.
    pub fn new(
        style: AnimationStyle,
        alignment: AlignmentResult,
        canvas: Canvas,
        settings: &RenderSettings,
    ) -> SplitshotResult<Self> {
        Ok(Self {
            style,
            alignment,
            background: settings.background,
            painter: Painter::new(canvas)?,
            labels: settings.labels.clone().map(LabelRenderer::new),
        })
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.painter.canvas()
    }

    /// Style being rendered.
    pub fn style(&self) -> AnimationStyle {
        self.style
    }

    /// Geometry shared by every frame.
    pub fn alignment(&self) -> &AlignmentResult {
        &self.alignment
    }

    /// Allocate a surface matching this renderer.
    pub fn new_pixmap(&self) -> vello_cpu::Pixmap {
        self.painter.new_pixmap()
    }

    /// Draw frame `index` of `frame_count` into `dst`.
    pub fn render_into(
        &mut self,
        paints: &PairPaints,
        index: usize,
        frame_count: usize,
        dst: &mut vello_cpu::Pixmap,
    ) -> SplitshotResult<()> {
        if frame_count == 0 || index >= frame_count {
            return Err(SplitshotError::validation(format!(
                "frame index {index} out of range for {frame_count} frames"
            )));
        }
        let canvas = self.canvas();
        let full = Rect::new(0.0, 0.0, canvas.w(), canvas.h());
        let state = frame_state(self.style, index, frame_count, canvas.w());

        self.painter.begin(self.background);
        match state {
            FrameState::Slider { divider_x, .. } => {
                self.painter
                    .draw_image(paints.get(Side::After), self.alignment.after, full, 1.0);
                let right = Rect::new(divider_x, 0.0, canvas.w(), canvas.h());
                self.painter
                    .draw_image(paints.get(Side::Before), self.alignment.before, right, 1.0);
                self.draw_divider(divider_x, canvas);
            }
            FrameState::Crossfade {
                before_alpha,
                after_alpha,
                ..
            } => {
                self.painter.draw_image(
                    paints.get(Side::Before),
                    self.alignment.before,
                    full,
                    before_alpha,
                );
                self.painter.draw_image(
                    paints.get(Side::After),
                    self.alignment.after,
                    full,
                    after_alpha,
                );
            }
            FrameState::Show(side) => {
                self.painter
                    .draw_image(paints.get(side), self.alignment.rect(side), full, 1.0);
            }
        }
        if let Some(labels) = self.labels.as_mut() {
            labels.draw(&mut self.painter, state.label(), full, canvas.w(), canvas)?;
        }
        self.painter.finish_into(dst)
    }

    /// Draw frame `index` into a fresh buffer.
    pub fn render(
        &mut self,
        paints: &PairPaints,
        index: usize,
        frame_count: usize,
    ) -> SplitshotResult<FrameRGBA> {
        let mut pixmap = self.new_pixmap();
        self.render_into(paints, index, frame_count, &mut pixmap)?;
        Ok(FrameRGBA::from_pixmap(&pixmap))
    }

    fn draw_divider(&mut self, x: f64, canvas: Canvas) {
        let h = canvas.h();
        let half_shadow = DIVIDER_SHADOW_WIDTH / 2.0;
        let half_line = DIVIDER_WIDTH / 2.0;
        self.painter.fill_rect(
            Rect::new(x - half_shadow, 0.0, x + half_shadow, h),
            Rgba8Premul::from_straight_rgba(0, 0, 0, 89),
        );
        self.painter.fill_rect(
            Rect::new(x - half_line, 0.0, x + half_line, h),
            Rgba8Premul::WHITE,
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frames.rs"]
mod tests;
