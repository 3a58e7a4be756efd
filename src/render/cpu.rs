use std::sync::Arc;

use crate::align::calculator::Side;
use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Affine, Canvas, Rect, Rgba8Premul};
use crate::foundation::error::{SplitshotError, SplitshotResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::geometry::rect::DrawRect;

/// A decoded image ready to be used as a `vello_cpu` paint.
#[derive(Clone)]
pub struct SourcePaint {
    paint: vello_cpu::Image,
    w: u32,
    h: u32,
}

impl SourcePaint {
    /// Wrap premultiplied RGBA8 pixels.
    pub fn from_premul_bytes(bytes: &[u8], width: u32, height: u32) -> SplitshotResult<Self> {
        let pixmap = pixmap_from_premul_bytes(bytes, width, height)?;
        Ok(Self {
            paint: vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
                sampler: vello_cpu::peniko::ImageSampler::default(),
            },
            w: width,
            h: height,
        })
    }

    /// Wrap a decoded photo.
    pub fn from_image(img: &PreparedImage) -> SplitshotResult<Self> {
        Self::from_premul_bytes(&img.rgba8_premul, img.width, img.height)
    }

    /// Source width in pixels.
    pub fn width(&self) -> u32 {
        self.w
    }

    /// Source height in pixels.
    pub fn height(&self) -> u32 {
        self.h
    }
}

/// Paints for both members of the pair. Built once per export or preview.
#[derive(Clone)]
pub struct PairPaints {
    before: SourcePaint,
    after: SourcePaint,
}

impl PairPaints {
    /// Prepare both decoded photos for drawing.
    pub fn new(before: &PreparedImage, after: &PreparedImage) -> SplitshotResult<Self> {
        Ok(Self {
            before: SourcePaint::from_image(before)?,
            after: SourcePaint::from_image(after)?,
        })
    }

    /// Paint for one side.
    pub fn get(&self, side: Side) -> &SourcePaint {
        match side {
            Side::Before => &self.before,
            Side::After => &self.after,
        }
    }
}

/// CPU rasterizer over a reusable `vello_cpu` context.
///
/// Drawing is recorded between [`Painter::begin`] and [`Painter::finish_into`]; the pixels land in
/// a caller-owned [`vello_cpu::Pixmap`] of the same size.
pub struct Painter {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl Painter {
    /// Acquire a drawing context for a `canvas`-sized surface.
    pub fn new(canvas: Canvas) -> SplitshotResult<Self> {
        let (width, height) = surface_dims(canvas)?;
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(width, height),
            width,
            height,
        })
    }

    /// Canvas this painter draws.
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: u32::from(self.width),
            height: u32::from(self.height),
        }
    }

    /// Allocate a surface matching this painter.
    pub fn new_pixmap(&self) -> vello_cpu::Pixmap {
        vello_cpu::Pixmap::new(self.width, self.height)
    }

    /// Start a new frame cleared to `background`.
    pub fn begin(&mut self, background: Rgba8Premul) {
        self.ctx.reset();
        self.ctx
            .set_blend_mode(vello_cpu::peniko::BlendMode::default());
        self.fill_rect(
            Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height)),
            background,
        );
    }

    /// Fill an axis-aligned rectangle in canvas space.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8Premul) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 || color.a == 0 {
            return;
        }
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        // peniko colors are straight alpha.
        let mut c = color.to_array();
        unpremultiply_rgba8_in_place(&mut c);
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(c[0], c[1], c[2], c[3]));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Draw `paint` scaled into `dst`, showing only the part inside `clip`.
    ///
    /// The image is never distorted by the clip: only the visible sub-rectangle of the source is
    /// filled.
    pub fn draw_image(&mut self, paint: &SourcePaint, dst: DrawRect, clip: Rect, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        if opacity <= 0.0 || paint.w == 0 || paint.h == 0 {
            return;
        }
        if !(dst.width > 0.0 && dst.height > 0.0) {
            return;
        }
        let visible = dst.to_rect().intersect(clip);
        if visible.width() <= 0.0 || visible.height() <= 0.0 {
            return;
        }

        let sx = dst.width / f64::from(paint.w);
        let sy = dst.height / f64::from(paint.h);
        let transform = Affine::translate((dst.x, dst.y)) * Affine::scale_non_uniform(sx, sy);
        let local = Rect::new(
            (visible.x0 - dst.x) / sx,
            (visible.y0 - dst.y) / sy,
            (visible.x1 - dst.x) / sx,
            (visible.y1 - dst.y) / sy,
        );

        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(paint.paint.clone());
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        self.ctx.fill_rect(&rect_to_cpu(local));
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
    }

    /// Rasterize everything recorded since [`Painter::begin`] into `dst`.
    pub fn finish_into(&mut self, dst: &mut vello_cpu::Pixmap) -> SplitshotResult<()> {
        if dst.width() != self.width || dst.height() != self.height {
            return Err(SplitshotError::surface(format!(
                "surface is {}x{}, painter expects {}x{}",
                dst.width(),
                dst.height(),
                self.width,
                self.height
            )));
        }
        self.ctx.flush();
        self.ctx.render_to_pixmap(dst);
        Ok(())
    }
}

fn surface_dims(canvas: Canvas) -> SplitshotResult<(u16, u16)> {
    canvas.validate()?;
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| SplitshotError::surface(format!("surface width exceeds u16: {}", canvas.width)))?;
    let h: u16 = canvas.height.try_into().map_err(|_| {
        SplitshotError::surface(format!("surface height exceeds u16: {}", canvas.height))
    })?;
    Ok((w, h))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> SplitshotResult<vello_cpu::Pixmap> {
    let (w, h) = surface_dims(Canvas { width, height })?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(SplitshotError::surface("pixmap byte len mismatch"));
    }
    // Pixmap stores PremulRgba8; our bytes are already premultiplied.
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
