use crate::align::calculator::{AlignmentResult, Side};
use crate::foundation::core::{Canvas, Format, Rect};
use crate::foundation::error::SplitshotResult;
use crate::geometry::rect::DrawRect;
use crate::render::backend::RenderSettings;
use crate::render::cpu::{PairPaints, Painter};
use crate::render::label::LabelRenderer;

/// Final geometry of a side-by-side still, in output canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StillLayout {
    /// Output canvas: two panels wide, visible height tall.
    pub canvas: Canvas,
    /// Width of one panel after trimming to the requested aspect ratio.
    pub panel_width: u32,
    /// Before photo rectangle (left panel).
    pub before: DrawRect,
    /// After photo rectangle (right panel).
    pub after: DrawRect,
}

impl StillLayout {
    /// Draw rectangle for one side.
    pub fn rect(&self, side: Side) -> DrawRect {
        match side {
            Side::Before => self.before,
            Side::After => self.after,
        }
    }

    /// Clip region of one side's panel.
    pub fn clip(&self, side: Side) -> Rect {
        let pw = f64::from(self.panel_width);
        let x0 = match side {
            Side::Before => 0.0,
            Side::After => pw,
        };
        Rect::new(x0, 0.0, x0 + pw, self.canvas.h())
    }
}

/// Crop an alignment computed for `panel` down to the rows both photos cover, then re-derive the
/// panel width so the full canvas keeps `format`'s aspect ratio.
///
/// Equal width is trimmed from both sides of each panel so the subjects stay centered.
pub fn layout_still(alignment: &AlignmentResult, panel: Canvas, format: Format) -> StillLayout {
    let visible = alignment
        .before
        .bottom()
        .min(alignment.after.bottom())
        .min(panel.h());
    let visible_h = if visible.is_finite() {
        (visible.floor() as u32).clamp(1, panel.height.max(1))
    } else {
        panel.height.max(1)
    };

    let panel_width = ((f64::from(visible_h) * format.ratio() / 2.0).round() as u32)
        .clamp(1, panel.width.max(1));
    let trim = (panel.w() - f64::from(panel_width)) / 2.0;

    let before = alignment.before.translated(-trim, 0.0);
    let after = alignment
        .after
        .translated(-trim + f64::from(panel_width), 0.0);

    tracing::debug!(visible_h, panel_width, trim, "still layout");

    StillLayout {
        canvas: Canvas {
            width: panel_width * 2,
            height: visible_h,
        },
        panel_width,
        before,
        after,
    }
}

/// Draw both panels (and labels, when `labels` is given) into `dst`.
///
/// `painter` and `dst` must both match `layout.canvas`.
pub fn compose_still(
    painter: &mut Painter,
    paints: &PairPaints,
    layout: &StillLayout,
    settings: &RenderSettings,
    labels: Option<&mut LabelRenderer>,
    dst: &mut vello_cpu::Pixmap,
) -> SplitshotResult<()> {
    painter.begin(settings.background);
    for side in [Side::Before, Side::After] {
        painter.draw_image(paints.get(side), layout.rect(side), layout.clip(side), 1.0);
    }
    if let Some(labels) = labels {
        let pw = f64::from(layout.panel_width);
        for side in [Side::Before, Side::After] {
            labels.draw(painter, side, layout.clip(side), pw, layout.canvas)?;
        }
    }
    painter.finish_into(dst)
}

#[cfg(test)]
#[path = "../../tests/unit/render/still.rs"]
mod tests;
