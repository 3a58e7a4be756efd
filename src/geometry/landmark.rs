//! Pose landmark types and the derived quantities alignment consumes.
//!
//! Landmarks are normalized to `[0, 1]` inside their own source image. Every derived quantity
//! here degrades to `None` or a fallback constant; nothing in this module fails.

use crate::align::config::AlignConfig;

/// One detected body keypoint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Landmark {
    /// Normalized x in the source image.
    pub x: f64,
    /// Normalized y in the source image (0 = top edge).
    pub y: f64,
    /// Relative depth. Carried through, never consumed.
    #[serde(default)]
    pub z: f64,
    /// Detector confidence in `[0, 1]`.
    #[serde(default)]
    pub visibility: f64,
}

impl Landmark {
    /// Landmark with zero depth.
    pub fn new(x: f64, y: f64, visibility: f64) -> Self {
        Self {
            x,
            y,
            z: 0.0,
            visibility,
        }
    }

    fn is_trusted(&self, min_visibility: f64) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.visibility.is_finite()
            && self.visibility >= min_visibility
    }
}

/// Number of points in a full pose.
pub const POSE_LANDMARK_COUNT: usize = 33;

/// The pose indices alignment reads. All other points are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoseIndex {
    /// Index 0.
    Nose = 0,
    /// Index 11.
    LeftShoulder = 11,
    /// Index 12.
    RightShoulder = 12,
    /// Index 23.
    LeftHip = 23,
    /// Index 24.
    RightHip = 24,
}

/// Which landmark-derived point anchors the pair vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    /// The nose (head).
    Nose,
    /// Shoulder center.
    Shoulder,
}

/// Which rung of the body-height fallback ladder produced a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyHeightSource {
    /// Nose to hip center.
    NoseToHip,
    /// Shoulder center to hip center (head unusable).
    ShoulderToHip,
    /// Pose present but torso not measurable.
    Undetected,
    /// No landmarks at all.
    NoPose,
}

/// Normalized subject extent used as the scale proxy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BodyHeight {
    /// Normalized vertical extent.
    pub value: f64,
    /// Ladder rung used.
    pub source: BodyHeightSource,
}

/// Trusted landmark at `idx`, or `None` when out of range, non-finite, or below threshold.
pub fn visible_point(landmarks: &[Landmark], idx: PoseIndex, cfg: &AlignConfig) -> Option<Landmark> {
    landmarks
        .get(idx as usize)
        .copied()
        .filter(|p| p.is_trusted(cfg.visibility_threshold))
}

fn pair_mean(
    landmarks: &[Landmark],
    left: PoseIndex,
    right: PoseIndex,
    cfg: &AlignConfig,
    coord: impl Fn(&Landmark) -> f64,
) -> Option<f64> {
    match (
        visible_point(landmarks, left, cfg),
        visible_point(landmarks, right, cfg),
    ) {
        (Some(l), Some(r)) => Some((coord(&l) + coord(&r)) / 2.0),
        (Some(p), None) | (None, Some(p)) => Some(coord(&p)),
        (None, None) => None,
    }
}

fn present(landmarks: Option<&[Landmark]>) -> Option<&[Landmark]> {
    landmarks.filter(|l| !l.is_empty())
}

/// Normalized y of the requested anchor.
///
/// Shoulder anchors average both sides when both are visible and fall back to whichever single
/// side is visible.
pub fn anchor_y(landmarks: Option<&[Landmark]>, kind: AnchorKind, cfg: &AlignConfig) -> Option<f64> {
    let lm = present(landmarks)?;
    match kind {
        AnchorKind::Nose => visible_point(lm, PoseIndex::Nose, cfg).map(|p| p.y),
        AnchorKind::Shoulder => pair_mean(
            lm,
            PoseIndex::LeftShoulder,
            PoseIndex::RightShoulder,
            cfg,
            |p| p.y,
        ),
    }
}

/// Normalized x of the shoulder center.
pub fn anchor_x(landmarks: Option<&[Landmark]>, cfg: &AlignConfig) -> Option<f64> {
    let lm = present(landmarks)?;
    pair_mean(
        lm,
        PoseIndex::LeftShoulder,
        PoseIndex::RightShoulder,
        cfg,
        |p| p.x,
    )
}

fn hip_center_y(landmarks: &[Landmark], cfg: &AlignConfig) -> Option<f64> {
    pair_mean(landmarks, PoseIndex::LeftHip, PoseIndex::RightHip, cfg, |p| p.y)
}

/// `true` when a pose is present but its head cannot anchor: the nose is missing, below the
/// visibility threshold, or sits above the head-crop line.
///
/// Absent or empty landmark arrays are not evidence of a crop.
pub fn head_cropped(landmarks: Option<&[Landmark]>, cfg: &AlignConfig) -> bool {
    let Some(lm) = present(landmarks) else {
        return false;
    };
    match visible_point(lm, PoseIndex::Nose, cfg) {
        Some(nose) => nose.y < cfg.head_crop_y,
        None => true,
    }
}

/// Subject scale proxy, resolved through the fallback ladder:
///
/// 1. nose to hip center, when the head is usable
/// 2. shoulder center to hip center
/// 3. `cfg.undetected_body_height` when a pose exists but the torso is unmeasurable
/// 4. `cfg.missing_pose_body_height` when there are no landmarks
pub fn body_height(landmarks: Option<&[Landmark]>, cfg: &AlignConfig) -> BodyHeight {
    let Some(lm) = present(landmarks) else {
        return BodyHeight {
            value: cfg.missing_pose_body_height,
            source: BodyHeightSource::NoPose,
        };
    };

    let usable = |v: f64| v.is_finite() && v > 0.0;
    let hip = hip_center_y(lm, cfg);

    if !head_cropped(Some(lm), cfg)
        && let (Some(nose), Some(hip)) = (anchor_y(Some(lm), AnchorKind::Nose, cfg), hip)
        && usable(hip - nose)
    {
        return BodyHeight {
            value: hip - nose,
            source: BodyHeightSource::NoseToHip,
        };
    }

    if let (Some(shoulder), Some(hip)) = (anchor_y(Some(lm), AnchorKind::Shoulder, cfg), hip)
        && usable(hip - shoulder)
    {
        return BodyHeight {
            value: hip - shoulder,
            source: BodyHeightSource::ShoulderToHip,
        };
    }

    BodyHeight {
        value: cfg.undetected_body_height,
        source: BodyHeightSource::Undetected,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/landmark.rs"]
mod tests;
