/// Rectangle in target-canvas pixel space that a source image is drawn into.
///
/// May extend past the canvas; negative `x`/`y` means the image is cropped on that side.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DrawRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Drawn width.
    pub width: f64,
    /// Drawn height.
    pub height: f64,
}

impl DrawRect {
    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Same size, shifted by `(dx, dy)`.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Same top-left, size multiplied by `s`.
    pub fn scaled(self, s: f64) -> Self {
        Self {
            width: self.width * s,
            height: self.height * s,
            ..self
        }
    }

    /// Equivalent `kurbo` rectangle.
    pub fn to_rect(self) -> kurbo::Rect {
        kurbo::Rect::new(self.x, self.y, self.right(), self.bottom())
    }
}

/// Size `src` so it fully covers `dst` (never under-fills), centering the overflowing axis.
///
/// Non-positive or non-finite source dimensions are treated as already matching `dst`.
pub fn cover_fit(src_w: f64, src_h: f64, dst_w: f64, dst_h: f64) -> DrawRect {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    let (src_w, src_h) = if valid(src_w) && valid(src_h) {
        (src_w, src_h)
    } else {
        (dst_w, dst_h)
    };

    let scale = (dst_w / src_w).max(dst_h / src_h);
    let width = src_w * scale;
    let height = src_h * scale;
    DrawRect {
        x: (dst_w - width) / 2.0,
        y: (dst_h - height) / 2.0,
        width,
        height,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/rect.rs"]
mod tests;
