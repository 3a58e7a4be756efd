use crate::align::config::AlignConfig;
use crate::geometry::landmark::{
    AnchorKind, Landmark, anchor_x, anchor_y, body_height, head_cropped,
};
use crate::geometry::rect::{DrawRect, cover_fit};

/// One photo of the pair: pixel dimensions plus optional detected pose.
///
/// Zero dimensions mean "unknown" and are treated as matching the target box.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhotoRef {
    /// Source width in pixels.
    #[serde(default)]
    pub width: u32,
    /// Source height in pixels.
    #[serde(default)]
    pub height: u32,
    /// Up to 33 pose landmarks normalized to this photo.
    #[serde(default)]
    pub landmarks: Option<Vec<Landmark>>,
}

impl PhotoRef {
    /// Photo with known size and no pose.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            landmarks: None,
        }
    }

    /// Attach a pose.
    pub fn with_landmarks(mut self, landmarks: Vec<Landmark>) -> Self {
        self.landmarks = Some(landmarks);
        self
    }

    /// Borrow the pose, if any.
    pub fn landmarks(&self) -> Option<&[Landmark]> {
        self.landmarks.as_deref()
    }
}

/// Which member of the pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    /// The reference photo.
    Before,
    /// The photo scaled to match.
    After,
}

impl Side {
    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Before => "Before",
            Self::After => "After",
        }
    }
}

/// Per-image draw geometry for one target box. The only output of alignment.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AlignmentResult {
    /// Where to draw the before photo.
    pub before: DrawRect,
    /// Where to draw the after photo.
    pub after: DrawRect,
    /// Both images were anchored on shoulders because at least one head is cropped.
    pub used_shoulder_anchor: bool,
    /// Downward shift applied to equalize top crop (0 when nose-anchored).
    pub top_crop_offset: f64,
    /// Shared target row of vertical placement, inside the headroom band.
    ///
    /// With nose anchoring, an image whose anchor sits closer to its own top edge than this row
    /// cannot reach it without exposing blank canvas above it; that image keeps offset 0 and its
    /// anchor lands higher. See [`AlignmentResult::before_anchor_row`].
    pub anchor_row: f64,
    /// Canvas row the before anchor actually lands on.
    pub before_anchor_row: f64,
    /// Canvas row the after anchor actually lands on.
    pub after_anchor_row: f64,
    /// Clamped body scale applied to the after photo.
    pub body_scale: f64,
}

impl AlignmentResult {
    /// Draw rectangle for one side.
    pub fn rect(&self, side: Side) -> DrawRect {
        match side {
            Side::Before => self.before,
            Side::After => self.after,
        }
    }

    /// Canvas row the anchor of one side lands on.
    pub fn landed_anchor_row(&self, side: Side) -> f64 {
        match side {
            Side::Before => self.before_anchor_row,
            Side::After => self.after_anchor_row,
        }
    }
}

/// Clamp without panicking on an inverted band.
fn clamp_to(v: f64, lo: f64, hi: f64) -> f64 {
    v.max(lo).min(hi)
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v >= 1.0 { v } else { 1.0 }
}

/// [`calculate_alignment_with`] using the default [`AlignConfig`].
pub fn calculate_alignment(
    before: &PhotoRef,
    after: &PhotoRef,
    target_w: f64,
    target_h: f64,
) -> AlignmentResult {
    calculate_alignment_with(&AlignConfig::default(), before, after, target_w, target_h)
}

/// Compute draw geometry that frames `before` and `after` identically inside a
/// `target_w x target_h` box.
///
/// Phases run in order, each consuming the previous one's output:
///
/// 1. body scale: ratio of body heights, clamped, applied to `after` only
/// 2. overflow normalization: cover-fit both, then scale up to a common overflow with a floor
/// 3. vertical placement on a shared anchor row inside the headroom band
/// 4. horizontal centering on shoulder center with a bounded side crop
///
/// Never fails; unusable landmarks resolve to the constants in `cfg`. The result is a pure
/// function of the inputs.
#[tracing::instrument(level = "debug", skip(cfg, before, after))]
pub fn calculate_alignment_with(
    cfg: &AlignConfig,
    before: &PhotoRef,
    after: &PhotoRef,
    target_w: f64,
    target_h: f64,
) -> AlignmentResult {
    let tw = sanitize_extent(target_w);
    let th = sanitize_extent(target_h);

    // Phase 1: body scale.
    let bh_before = body_height(before.landmarks(), cfg);
    let bh_after = body_height(after.landmarks(), cfg);
    let raw_scale = bh_before.value / bh_after.value;
    let body_scale = if raw_scale.is_finite() {
        clamp_to(raw_scale, cfg.min_body_scale, cfg.max_body_scale)
    } else {
        1.0
    };

    // Phase 2: overflow normalization.
    let cover_before = cover_fit(
        f64::from(before.width),
        f64::from(before.height),
        tw,
        th,
    );
    let cover_after = cover_fit(f64::from(after.width), f64::from(after.height), tw, th);
    let overflow_before = cover_before.height / th;
    let overflow_after = cover_after.height / th;
    let target_overflow = overflow_before
        .max(overflow_after)
        .max(cfg.min_overflow);

    let mut size_before = (
        cover_before.width * (target_overflow / overflow_before),
        cover_before.height * (target_overflow / overflow_before),
    );
    let after_scale = (target_overflow / overflow_after) * body_scale;
    let mut size_after = (
        cover_after.width * after_scale,
        cover_after.height * after_scale,
    );

    // A shrinking body scale can pull `after` under the floor or narrower than the box; lift
    // the pair together so the relative scale survives.
    let lift = [size_before, size_after]
        .iter()
        .map(|&(w, h)| (cfg.min_overflow * th / h).max(tw / w))
        .fold(1.0_f64, f64::max);
    if lift > 1.0 {
        size_before = (size_before.0 * lift, size_before.1 * lift);
        size_after = (size_after.0 * lift, size_after.1 * lift);
    }

    // Phase 3: vertical placement.
    let used_shoulder_anchor =
        head_cropped(before.landmarks(), cfg) || head_cropped(after.landmarks(), cfg);
    let (kind, default_anchor) = if used_shoulder_anchor {
        (AnchorKind::Shoulder, cfg.default_shoulder_y)
    } else {
        (AnchorKind::Nose, cfg.default_nose_y)
    };
    let anchor_px_before =
        anchor_y(before.landmarks(), kind, cfg).unwrap_or(default_anchor) * size_before.1;
    let anchor_px_after =
        anchor_y(after.landmarks(), kind, cfg).unwrap_or(default_anchor) * size_after.1;

    let min_row = cfg.min_headroom * th;
    let max_row = cfg.max_headroom * th;
    let mut anchor_row = clamp_to(anchor_px_before.min(anchor_px_after), min_row, max_row);
    let mut y_before = anchor_row - anchor_px_before;
    let mut y_after = anchor_row - anchor_px_after;

    let top_crop_offset = if used_shoulder_anchor {
        let crop_before = (-y_before).max(0.0);
        let crop_after = (-y_after).max(0.0);
        let shift = (crop_before.max(crop_after) - crop_before.min(crop_after))
            .min((max_row - anchor_row).max(0.0));
        y_before += shift;
        y_after += shift;
        anchor_row += shift;
        shift
    } else {
        for (y, anchor_px) in [
            (&mut y_before, anchor_px_before),
            (&mut y_after, anchor_px_after),
        ] {
            let landing = *y + anchor_px;
            if landing < min_row {
                *y += min_row - landing;
            }
            *y = y.min(0.0);
        }
        0.0
    };

    let before_anchor_row = y_before + anchor_px_before;
    let after_anchor_row = y_after + anchor_px_after;

    // Phase 4: horizontal placement.
    let place_x = |photo: &PhotoRef, w: f64| -> f64 {
        let center = anchor_x(photo.landmarks(), cfg).unwrap_or(cfg.default_center_x);
        let desired = tw / 2.0 - center * w;
        let no_blank_lo = (tw - w).min(0.0);
        let lo = (-cfg.max_horizontal_crop * w).max(no_blank_lo);
        let hi = (tw - (1.0 - cfg.max_horizontal_crop) * w).min(0.0);
        if lo <= hi {
            clamp_to(desired, lo, hi)
        } else {
            clamp_to(desired, no_blank_lo, 0.0)
        }
    };
    let x_before = place_x(before, size_before.0);
    let x_after = place_x(after, size_after.0);

    tracing::debug!(
        before_body = bh_before.value,
        before_body_source = ?bh_before.source,
        after_body = bh_after.value,
        after_body_source = ?bh_after.source,
        body_scale,
        target_overflow,
        lift,
        used_shoulder_anchor,
        anchor_row,
        before_anchor_row,
        after_anchor_row,
        top_crop_offset,
        "alignment resolved"
    );

    AlignmentResult {
        before: DrawRect {
            x: x_before,
            y: y_before,
            width: size_before.0,
            height: size_before.1,
        },
        after: DrawRect {
            x: x_after,
            y: y_after,
            width: size_after.0,
            height: size_after.1,
        },
        used_shoulder_anchor,
        top_crop_offset,
        anchor_row,
        before_anchor_row,
        after_anchor_row,
        body_scale,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/align/calculator.rs"]
mod tests;
