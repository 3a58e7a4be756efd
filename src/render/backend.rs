use crate::foundation::core::Rgba8Premul;
use crate::render::label::LabelStyle;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The `premultiplied` flag makes this explicit at API
/// boundaries.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Copy the pixels out of a rendered pixmap.
    pub fn from_pixmap(pixmap: &vello_cpu::Pixmap) -> Self {
        Self {
            width: u32::from(pixmap.width()),
            height: u32::from(pixmap.height()),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    /// Pixel at `(x, y)` as `[r, g, b, a]`, if inside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data
            .get(i..i + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }
}

/// Settings shared by every render surface.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// Color the canvas is cleared to before drawing.
    pub background: Rgba8Premul,
    /// Overlay "Before"/"After" labels when set.
    pub labels: Option<LabelStyle>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: Rgba8Premul::BLACK,
            labels: None,
        }
    }
}

impl RenderSettings {
    /// Return settings with a different background.
    pub fn with_background(mut self, background: Rgba8Premul) -> Self {
        self.background = background;
        self
    }

    /// Return settings with labels enabled (or disabled with `None`).
    pub fn with_labels(mut self, labels: Option<LabelStyle>) -> Self {
        self.labels = labels;
        self
    }
}
