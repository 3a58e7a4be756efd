//! Export orchestration: decode in parallel, align once, render, encode.

/// Animated exports.
pub mod animation;
/// Progress reporting.
pub mod progress;
/// Still exports.
pub mod still;

use crate::assets::decode::{ImageInput, decode_pair};
use crate::foundation::error::SplitshotResult;
use crate::geometry::landmark::Landmark;
use crate::render::preview::PhotoPair;

/// One photo of an export request: where to load it from plus its optional pose.
#[derive(Clone, Debug)]
pub struct PhotoSource {
    /// Encoded or decoded image.
    pub input: ImageInput,
    /// Pose detected on this photo, normalized to its own size.
    pub landmarks: Option<Vec<Landmark>>,
}

impl PhotoSource {
    /// Photo without a pose.
    pub fn new(input: ImageInput) -> Self {
        Self {
            input,
            landmarks: None,
        }
    }

    /// Attach a pose.
    pub fn with_landmarks(mut self, landmarks: Vec<Landmark>) -> Self {
        self.landmarks = Some(landmarks);
        self
    }
}

/// Decode both photos in parallel and pair them with their poses.
pub(crate) fn load_pair(before: &PhotoSource, after: &PhotoSource) -> SplitshotResult<PhotoPair> {
    let (b, a) = decode_pair(&before.input, &after.input)?;
    Ok(PhotoPair {
        before: b,
        after: a,
        before_landmarks: before.landmarks.clone(),
        after_landmarks: after.landmarks.clone(),
    })
}
