use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::foundation::error::{SplitshotError, SplitshotResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Take ownership of a straight-alpha RGBA image and premultiply it.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut rgba8_premul = img.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        }
    }
}

/// Where a photo's encoded bytes come from.
#[derive(Clone, Debug)]
pub enum ImageInput {
    /// Encoded bytes already in memory (PNG, JPEG, ...).
    Bytes(Arc<Vec<u8>>),
    /// A file on disk.
    Path(PathBuf),
    /// An already decoded image.
    Decoded(PreparedImage),
}

impl ImageInput {
    /// Decode into a [`PreparedImage`].
    pub fn load(&self) -> SplitshotResult<PreparedImage> {
        match self {
            Self::Bytes(bytes) => decode_image(bytes),
            Self::Path(path) => load_image_file(path),
            Self::Decoded(img) => Ok(img.clone()),
        }
    }
}

/// Decode encoded image bytes into premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> SplitshotResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| SplitshotError::decode(format!("decode image from memory: {e}")))?;
    Ok(PreparedImage::from_rgba_image(dyn_img.to_rgba8()))
}

/// Read and decode an image file.
pub fn load_image_file(path: &Path) -> SplitshotResult<PreparedImage> {
    let bytes = std::fs::read(path).map_err(|e| {
        SplitshotError::decode(format!("failed to read image '{}': {e}", path.display()))
    })?;
    decode_image(&bytes).map_err(|e| match e {
        SplitshotError::Decode(msg) => {
            SplitshotError::decode(format!("'{}': {msg}", path.display()))
        }
        other => other,
    })
}

/// Decode the before/after pair in parallel and join both results.
///
/// The first failure wins; no partial pair is returned.
pub fn decode_pair(
    before: &ImageInput,
    after: &ImageInput,
) -> SplitshotResult<(PreparedImage, PreparedImage)> {
    let (b, a) = rayon::join(|| before.load(), || after.load());
    Ok((b?, a?))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
