// Recolor parameters.
// `Parameters` is the immutable snapshot one frame is processed with.
// `Controls` is the mutable state the input layer edits between frames;
// the frame loop asks it for a fresh snapshot before each frame.

use crate::color::{rgb_to_hsv, wrap_hue};
use crate::recolor::{MAX_HUE_DISTANCE, hue_delta};
use crate::types::Rgb;

/// Snapshot of everything the recolor pass reads for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parameters {
    /// Hue to match, in [0,1).
    pub mask_hue: f32,
    /// Shortest signed rotation from the mask hue to the replace hue, in [-0.5, 0.5].
    pub hue_delta: f32,
    /// Pixels strictly closer than this (circular hue distance) are recolored;
    /// 0.5 or more recolors every pixel.
    pub threshold: f32,
}

impl Parameters {
    pub fn new(mask_hue: f32, replace_hue: f32, threshold: f32) -> Self {
        let mask_hue = wrap_hue(mask_hue);
        Self {
            mask_hue,
            hue_delta: hue_delta(mask_hue, wrap_hue(replace_hue)),
            threshold,
        }
    }

    /// Derive hues from picked colors.
    pub fn from_colors(mask: Rgb, replace: Rgb, threshold: f32) -> Self {
        Self::new(rgb_to_hsv(mask).h, rgb_to_hsv(replace).h, threshold)
    }
}

/// Hue step for one arrow-key press: 10 degrees.
pub const HUE_STEP: f32 = 1.0 / 36.0;
/// Threshold step for one arrow-key press.
pub const THRESHOLD_STEP: f32 = 0.01;
/// At this threshold every hue matches, so the controls stop there.
pub const THRESHOLD_MAX: f32 = MAX_HUE_DISTANCE;

/// User-adjustable state, owned by the input layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Controls {
    pub mask_hue: f32,
    pub replace_hue: f32,
    pub threshold: f32,
    /// Show the raw feed without recoloring.
    pub bypass: bool,
}

impl Controls {
    pub fn from_colors(mask: Rgb, replace: Rgb, threshold: f32) -> Self {
        Self {
            mask_hue: rgb_to_hsv(mask).h,
            replace_hue: rgb_to_hsv(replace).h,
            threshold,
            bypass: false,
        }
    }

    /// The snapshot the next frame is processed with.
    pub fn snapshot(&self) -> Parameters {
        Parameters::new(self.mask_hue, self.replace_hue, self.threshold)
    }

    /// Eyedropper: take the mask hue from a sampled color.
    pub fn pick_mask(&mut self, c: Rgb) {
        self.mask_hue = rgb_to_hsv(c).h;
    }

    /// Rotate the replace hue by `steps` * [`HUE_STEP`] (negative = backwards).
    pub fn rotate_replace(&mut self, steps: i32) {
        self.replace_hue = wrap_hue(self.replace_hue + steps as f32 * HUE_STEP);
    }

    /// Nudge the threshold by `steps` * [`THRESHOLD_STEP`], clamped to [0, 0.5].
    pub fn nudge_threshold(&mut self, steps: i32) {
        let t = self.threshold + steps as f32 * THRESHOLD_STEP;
        // snap to the step grid so repeated presses don't accumulate drift
        let t = (t / THRESHOLD_STEP).round() * THRESHOLD_STEP;
        self.threshold = t.clamp(0.0, THRESHOLD_MAX);
    }

    pub fn toggle_bypass(&mut self) {
        self.bypass = !self.bypass;
    }
}
