use crate::foundation::error::{SplitshotError, SplitshotResult};

/// Every constant the alignment calculator and its landmark primitives consult.
///
/// `Default` carries the production values. Deserializing a partial JSON object fills the rest
/// from `Default`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Lower bound of the body-scale clamp applied to the after image.
    pub min_body_scale: f64,
    /// Upper bound of the body-scale clamp applied to the after image.
    pub max_body_scale: f64,
    /// Minimum `drawHeight / targetHeight` for both images.
    pub min_overflow: f64,
    /// Lowest anchor row as a fraction of target height.
    pub min_headroom: f64,
    /// Highest anchor row as a fraction of target height.
    pub max_headroom: f64,
    /// Landmarks below this visibility are not trusted for anchoring.
    pub visibility_threshold: f64,
    /// A nose above this normalized y marks the head as cropped.
    pub head_crop_y: f64,
    /// Largest fraction of an image's width that may be cropped on one side.
    pub max_horizontal_crop: f64,
    /// Body height when a pose exists but the torso cannot be measured.
    pub undetected_body_height: f64,
    /// Body height when no landmarks exist.
    pub missing_pose_body_height: f64,
    /// Nose y used when the nose is not detected.
    pub default_nose_y: f64,
    /// Shoulder y used when no shoulder is detected.
    pub default_shoulder_y: f64,
    /// Shoulder-center x used when no shoulder is detected.
    pub default_center_x: f64,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            min_body_scale: 0.65,
            max_body_scale: 1.60,
            min_overflow: 1.15,
            min_headroom: 0.05,
            max_headroom: 0.20,
            visibility_threshold: 0.5,
            head_crop_y: 0.02,
            max_horizontal_crop: 0.20,
            undetected_body_height: 0.35,
            missing_pose_body_height: 0.5,
            default_nose_y: 0.15,
            default_shoulder_y: 0.30,
            default_center_x: 0.5,
        }
    }
}

impl AlignConfig {
    /// Return a copy with a different body-scale clamp band.
    pub fn with_body_scale_band(mut self, min: f64, max: f64) -> Self {
        self.min_body_scale = min;
        self.max_body_scale = max;
        self
    }

    /// Return a copy with a different headroom band.
    pub fn with_headroom(mut self, min: f64, max: f64) -> Self {
        self.min_headroom = min;
        self.max_headroom = max;
        self
    }

    /// Return a copy with a different overflow floor.
    pub fn with_min_overflow(mut self, min_overflow: f64) -> Self {
        self.min_overflow = min_overflow;
        self
    }

    /// Check band ordering and ranges.
    pub fn validate(&self) -> SplitshotResult<()> {
        let finite_pos = |v: f64| v.is_finite() && v > 0.0;
        if !finite_pos(self.min_body_scale)
            || !finite_pos(self.max_body_scale)
            || self.min_body_scale > self.max_body_scale
        {
            return Err(SplitshotError::validation(
                "body scale band must be positive and ordered",
            ));
        }
        if !(self.min_overflow.is_finite() && self.min_overflow >= 1.0) {
            return Err(SplitshotError::validation("min_overflow must be >= 1"));
        }
        if !(0.0..=1.0).contains(&self.min_headroom)
            || !(0.0..=1.0).contains(&self.max_headroom)
            || self.min_headroom > self.max_headroom
        {
            return Err(SplitshotError::validation(
                "headroom band must be ordered within [0, 1]",
            ));
        }
        if !(0.0..0.5).contains(&self.max_horizontal_crop) {
            return Err(SplitshotError::validation(
                "max_horizontal_crop must be within [0, 0.5)",
            ));
        }
        Ok(())
    }

    /// Load from a JSON object. Missing keys keep their defaults.
    pub fn from_json(s: &str) -> SplitshotResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| SplitshotError::validation(format!("invalid align config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/align/config.rs"]
mod tests;
