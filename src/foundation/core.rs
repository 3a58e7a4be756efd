use crate::foundation::error::{SplitshotError, SplitshotResult};

pub use kurbo::{Affine, Rect};

/// Output aspect ratio tag.
///
/// Resolution is supplied separately by the caller; the format only fixes `width / height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Format {
    /// Square, `1:1`.
    #[serde(rename = "1:1")]
    Square,
    /// Portrait, `4:5`.
    #[serde(rename = "4:5")]
    Portrait,
    /// Tall story, `9:16`.
    #[serde(rename = "9:16")]
    Story,
}

impl Format {
    /// Numeric `width / height` ratio.
    pub fn ratio(self) -> f64 {
        match self {
            Self::Square => 1.0,
            Self::Portrait => 4.0 / 5.0,
            Self::Story => 9.0 / 16.0,
        }
    }

    /// Canonical tag, e.g. `"4:5"`.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Square => "1:1",
            Self::Portrait => "4:5",
            Self::Story => "9:16",
        }
    }

    /// Canvas of the given width with this format's aspect ratio (height rounded).
    pub fn canvas_for_width(self, width: u32) -> Canvas {
        let height = (f64::from(width) / self.ratio()).round().max(1.0) as u32;
        Canvas { width, height }
    }
}

impl std::str::FromStr for Format {
    type Err = SplitshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1:1" => Ok(Self::Square),
            "4:5" => Ok(Self::Portrait),
            "9:16" => Ok(Self::Story),
            other => Err(SplitshotError::validation(format!(
                "unknown format '{other}' (expected 1:1, 4:5 or 9:16)"
            ))),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Create a canvas, rejecting zero dimensions.
    pub fn new(width: u32, height: u32) -> SplitshotResult<Self> {
        let c = Self { width, height };
        c.validate()?;
        Ok(c)
    }

    /// Reject zero-sized canvases.
    pub fn validate(self) -> SplitshotResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SplitshotError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        Ok(())
    }

    /// One side-by-side panel: half the width, full height.
    pub fn panel(self) -> Self {
        Self {
            width: (self.width / 2).max(1),
            height: self.height,
        }
    }

    /// Width as `f64`.
    pub fn w(self) -> f64 {
        f64::from(self.width)
    }

    /// Height as `f64`.
    pub fn h(self) -> f64 {
        f64::from(self.height)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Opaque black.
    pub const BLACK: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    /// Opaque white.
    pub const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channel array in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
