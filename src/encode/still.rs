use std::path::Path;

use image::ImageEncoder as _;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{SplitshotError, SplitshotResult};
use crate::foundation::math::{flatten_to_opaque_rgba8, premultiply_rgba8_in_place};
use crate::render::backend::FrameRGBA;

/// Still-image container for a composed comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StillFormat {
    /// Lossless PNG.
    #[default]
    Png,
    /// Baseline JPEG.
    Jpeg {
        /// 1..=100.
        quality: u8,
    },
}

impl StillFormat {
    /// JPEG at the default quality of 90.
    pub const JPEG: Self = Self::Jpeg { quality: 90 };

    /// Pick a format from a file extension (`png`, `jpg`, `jpeg`).
    pub fn from_path(path: &Path) -> SplitshotResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::JPEG),
            _ => Err(SplitshotError::validation(format!(
                "cannot infer still format from '{}' (use .png, .jpg or .jpeg)",
                path.display()
            ))),
        }
    }
}

/// Encode a rendered frame, flattening any transparency over `background`.
pub fn encode_still(
    frame: &FrameRGBA,
    format: StillFormat,
    background: Rgba8Premul,
) -> SplitshotResult<Vec<u8>> {
    let expected = (frame.width as usize)
        .saturating_mul(frame.height as usize)
        .saturating_mul(4);
    if frame.width == 0 || frame.height == 0 || frame.data.len() != expected {
        return Err(SplitshotError::validation(format!(
            "frame buffer does not match {}x{}",
            frame.width, frame.height
        )));
    }

    let mut premul;
    let src: &[u8] = if frame.premultiplied {
        &frame.data
    } else {
        premul = frame.data.clone();
        premultiply_rgba8_in_place(&mut premul);
        &premul
    };
    let mut opaque = vec![0u8; src.len()];
    flatten_to_opaque_rgba8(&mut opaque, src, background.to_array())?;

    let mut out = Vec::new();
    match format {
        StillFormat::Png => {
            image::codecs::png::PngEncoder::new(&mut out)
                .write_image(
                    &opaque,
                    frame.width,
                    frame.height,
                    image::ExtendedColorType::Rgba8,
                )
                .map_err(|e| SplitshotError::encode(format!("png: {e}")))?;
        }
        StillFormat::Jpeg { quality } => {
            if !(1..=100).contains(&quality) {
                return Err(SplitshotError::validation("jpeg quality must be in 1..=100"));
            }
            let rgb: Vec<u8> = opaque
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, quality)
                .write_image(&rgb, frame.width, frame.height, image::ExtendedColorType::Rgb8)
                .map_err(|e| SplitshotError::encode(format!("jpeg: {e}")))?;
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/still.rs"]
mod tests;
