use crate::align::calculator::Side;
use crate::foundation::error::{SplitshotError, SplitshotResult};

/// Frame rate used by the continuous styles (slider and crossfade).
pub const CONTINUOUS_FPS: u32 = 15;
/// Frame-count bounds for the continuous styles.
pub const MIN_CONTINUOUS_FRAMES: usize = 2;
/// Frame-count bounds for the continuous styles.
pub const MAX_CONTINUOUS_FRAMES: usize = 240;
/// Delay granularity. GIF stores frame delays in hundredths of a second.
pub const DELAY_STEP_MS: u32 = 10;

/// Display state of each toggle frame. Cuts are shown for 0 ms.
pub const TOGGLE_PATTERN: [ToggleFrame; 12] = [
    ToggleFrame::Hold(Side::Before),
    ToggleFrame::Hold(Side::Before),
    ToggleFrame::Hold(Side::Before),
    ToggleFrame::Hold(Side::Before),
    ToggleFrame::Cut(Side::After),
    ToggleFrame::Hold(Side::After),
    ToggleFrame::Hold(Side::After),
    ToggleFrame::Hold(Side::After),
    ToggleFrame::Hold(Side::After),
    ToggleFrame::Hold(Side::After),
    ToggleFrame::Cut(Side::Before),
    ToggleFrame::Hold(Side::Before),
];

/// One entry of the toggle state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleFrame {
    /// Show `Side` for one hold slot.
    Hold(Side),
    /// Switch instantly to `Side`.
    Cut(Side),
}

impl ToggleFrame {
    /// Side displayed on this frame.
    pub fn side(self) -> Side {
        match self {
            Self::Hold(s) | Self::Cut(s) => s,
        }
    }
}

/// Motion model of an animated export.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationStyle {
    /// Vertical wipe from before to after.
    Slider,
    /// Eased alpha blend.
    Crossfade,
    /// Discrete flip to after and back.
    Toggle,
}

impl AnimationStyle {
    /// Duration used when the caller does not pick one.
    pub fn default_duration_secs(self) -> f64 {
        match self {
            Self::Slider | Self::Crossfade => 3.0,
            Self::Toggle => 8.0,
        }
    }

    /// Frame count and per-frame delays for `duration_secs` of animation.
    pub fn schedule(self, duration_secs: f64) -> SplitshotResult<AnimationSchedule> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(SplitshotError::validation(
                "animation duration must be finite and > 0",
            ));
        }
        let total_steps = (duration_secs * 1000.0 / f64::from(DELAY_STEP_MS)).round() as u64;

        let delays_ms = match self {
            Self::Slider | Self::Crossfade => {
                let frames = (duration_secs * f64::from(CONTINUOUS_FPS)).round() as usize;
                let frames = frames.clamp(MIN_CONTINUOUS_FRAMES, MAX_CONTINUOUS_FRAMES);
                distribute_ms(total_steps, frames)
            }
            Self::Toggle => {
                let holds = TOGGLE_PATTERN
                    .iter()
                    .filter(|f| matches!(f, ToggleFrame::Hold(_)))
                    .count();
                let mut hold_ms = distribute_ms(total_steps, holds).into_iter();
                TOGGLE_PATTERN
                    .iter()
                    .map(|f| match f {
                        ToggleFrame::Hold(_) => hold_ms.next().unwrap_or(0),
                        ToggleFrame::Cut(_) => 0,
                    })
                    .collect()
            }
        };

        Ok(AnimationSchedule {
            frame_count: delays_ms.len(),
            delays_ms,
        })
    }
}

impl std::str::FromStr for AnimationStyle {
    type Err = SplitshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slider" | "wipe" => Ok(Self::Slider),
            "crossfade" | "fade" => Ok(Self::Crossfade),
            "toggle" | "flip" => Ok(Self::Toggle),
            other => Err(SplitshotError::validation(format!(
                "unknown animation style '{other}'"
            ))),
        }
    }
}

/// Frame count plus display duration of each frame, in encoder order.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnimationSchedule {
    /// Number of frames.
    pub frame_count: usize,
    /// Display duration per frame; not necessarily uniform.
    pub delays_ms: Vec<u32>,
}

impl AnimationSchedule {
    /// Sum of all delays.
    pub fn total_ms(&self) -> u64 {
        self.delays_ms.iter().map(|&d| u64::from(d)).sum()
    }
}

/// Split `total_steps` delay steps over `slots` delays in milliseconds. Every delay is a
/// multiple of [`DELAY_STEP_MS`] and the delays sum to `total_steps * DELAY_STEP_MS`.
fn distribute_ms(total_steps: u64, slots: usize) -> Vec<u32> {
    if slots == 0 {
        return Vec::new();
    }
    let base = total_steps / slots as u64;
    let rem = (total_steps % slots as u64) as usize;
    let max_steps = u64::from(u32::MAX / DELAY_STEP_MS);
    (0..slots)
        .map(|i| (base + u64::from(i < rem)).min(max_steps) as u32 * DELAY_STEP_MS)
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/schedule.rs"]
mod tests;
