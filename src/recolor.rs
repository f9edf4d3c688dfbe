// Hue-selective recolor pass.
// Every pixel whose hue is within `threshold` of the mask hue (measured
// around the hue circle) has its hue rotated by `hue_delta`. A threshold of
// 0.5 or more matches every pixel, including the hue opposite the mask.
// Saturation, value and the 4th channel are left as they were; pixels that
// don't match are not written at all.

use crate::color::{rgb_to_hsv, wrap_hue};
use crate::params::Parameters;
use crate::types::{CHANNELS, Hsv, Pixel, PixelBuffer, Rgb};
use rayon::prelude::*;

/// Largest possible circular hue distance; a threshold at or above it matches every hue.
pub const MAX_HUE_DISTANCE: f32 = 0.5;

/// Circular distance between two hues in [0,1). Result is in [0, 0.5].
/// 0.98 and 0.02 are 0.04 apart, not 0.96.
#[inline]
pub fn hue_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).abs();
    d.min(1.0 - d)
}

/// Shortest signed rotation taking `from` to `to`, in [-0.5, 0.5].
/// 0.1 -> 0.9 is -0.2 (backwards), not +0.8.
#[inline]
pub fn hue_delta(from: f32, to: f32) -> f32 {
    let mut d = to - from;
    if d > 0.5 {
        d -= 1.0;
    }
    if d < -0.5 {
        d += 1.0;
    }
    d
}

/// `(h + delta) mod 1`, handling negative deltas.
#[inline]
pub fn rotate_hue(h: f32, delta: f32) -> f32 {
    wrap_hue(h + delta)
}

/// True if a hue is close enough to the mask to be recolored.
/// Strictly closer than the threshold, except that a threshold of 0.5 or
/// more also takes the hue directly opposite the mask.
#[inline]
pub fn hue_matches(h: f32, params: &Parameters) -> bool {
    params.threshold >= MAX_HUE_DISTANCE || hue_distance(h, params.mask_hue) < params.threshold
}

/// Recolor one pixel in place if its hue matches. Alpha is never written.
#[inline]
pub fn recolor_pixel(px: &mut Pixel, params: &Parameters) {
    let hsv = rgb_to_hsv(Rgb::from_pixel(px));
    if !hue_matches(hsv.h, params) {
        return;
    }
    let out = Hsv { h: rotate_hue(hsv.h, params.hue_delta), ..hsv }.to_rgb8();
    px[0] = out.r;
    px[1] = out.g;
    px[2] = out.b;
}

/// Recolor a whole frame in place, single-threaded.
pub fn process_frame(buf: &mut PixelBuffer, params: &Parameters) {
    for px in buf.pixels_mut() {
        recolor_pixel(px, params);
    }
}

/// Same output as [`process_frame`], with rows spread across the rayon pool.
/// Each pixel only reads itself, so row order doesn't matter.
pub fn process_frame_par(buf: &mut PixelBuffer, params: &Parameters) {
    let stride = buf.width() * CHANNELS;
    if stride == 0 {
        return;
    }
    buf.as_bytes_mut()
        .par_chunks_exact_mut(stride)
        .for_each(|row| recolor_row(row, params));
}

fn recolor_row(row: &mut [u8], params: &Parameters) {
    for chunk in row.chunks_exact_mut(CHANNELS) {
        if let Ok(px) = <&mut Pixel>::try_from(chunk) {
            recolor_pixel(px, params);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn distance_wraps_around_zero() {
        assert_abs_diff_eq!(hue_distance(0.0, 0.99), 0.01, epsilon = 1e-6);
        assert_abs_diff_eq!(hue_distance(0.98, 0.02), 0.04, epsilon = 1e-6);
        assert_abs_diff_eq!(hue_distance(0.0, 0.5), 0.5);
        assert_abs_diff_eq!(hue_distance(0.25, 0.75), 0.5);
    }

    #[test]
    fn distance_is_symmetric_and_bounded() {
        let hues: Vec<f32> = (0..50).map(|i| i as f32 / 50.0).collect();
        for &a in &hues {
            assert_eq!(hue_distance(a, a), 0.0);
            for &b in &hues {
                let d = hue_distance(a, b);
                assert_eq!(d, hue_distance(b, a));
                assert!((0.0..=0.5).contains(&d), "d({a}, {b}) = {d}");
            }
        }
    }

    #[test]
    fn delta_takes_the_shorter_arc() {
        assert_abs_diff_eq!(hue_delta(0.1, 0.9), -0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(hue_delta(0.9, 0.1), 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(hue_delta(0.2, 0.4), 0.2, epsilon = 1e-6);
        assert_abs_diff_eq!(hue_delta(0.3, 0.3), 0.0);
        // exactly opposite hues keep the sign of the raw difference
        assert_abs_diff_eq!(hue_delta(0.0, 0.5), 0.5);
        assert_abs_diff_eq!(hue_delta(0.75, 0.25), -0.5);
    }

    #[test]
    fn rotation_wraps_both_directions() {
        assert_abs_diff_eq!(rotate_hue(0.05, -0.1), 0.95, epsilon = 1e-6);
        assert_abs_diff_eq!(rotate_hue(0.95, 0.1), 0.05, epsilon = 1e-6);
        assert_abs_diff_eq!(rotate_hue(0.5, 0.0), 0.5);
        // a hair below zero must not come back as exactly 1.0
        assert_eq!(rotate_hue(0.0, -1e-9), 0.0);
    }

    #[test]
    fn red_pixel_turns_green() {
        let mut px: Pixel = [255, 0, 0, 42];
        let params = Parameters { mask_hue: 0.0, hue_delta: 1.0 / 3.0, threshold: 0.1 };
        recolor_pixel(&mut px, &params);
        assert_eq!(px, [0, 255, 0, 42]);
    }

    #[test]
    fn zero_threshold_matches_nothing() {
        let mut px: Pixel = [255, 0, 0, 255];
        let params = Parameters { mask_hue: 0.0, hue_delta: 0.25, threshold: 0.0 };
        recolor_pixel(&mut px, &params);
        assert_eq!(px, [255, 0, 0, 255]);
    }

    #[test]
    fn gray_matches_achromatic_mask_and_stays_gray() {
        let mut px: Pixel = [128, 128, 128, 7];
        let params = Parameters { mask_hue: 0.0, hue_delta: 0.4, threshold: 1e-6 };
        recolor_pixel(&mut px, &params);
        assert_eq!(px, [128, 128, 128, 7]);
    }

    #[test]
    fn saturation_and_value_survive_rotation() {
        let src = Rgb::new(200, 120, 80);
        let before = rgb_to_hsv(src);
        let mut px: Pixel = [src.r, src.g, src.b, 255];
        let params = Parameters { mask_hue: before.h, hue_delta: 0.3, threshold: 0.05 };
        recolor_pixel(&mut px, &params);
        let after = rgb_to_hsv(Rgb::from_pixel(&px));
        assert_abs_diff_eq!(after.s, before.s, epsilon = 0.01);
        assert_abs_diff_eq!(after.v, before.v, epsilon = 0.005);
        assert_abs_diff_eq!(hue_distance(after.h, rotate_hue(before.h, 0.3)), 0.0, epsilon = 0.01);
    }

    #[test]
    fn half_threshold_takes_the_opposite_hue() {
        // cyan sits exactly 0.5 away from a red mask
        let mut px: Pixel = [0, 255, 255, 9];
        let params = Parameters { mask_hue: 0.0, hue_delta: 1.0 / 3.0, threshold: 0.5 };
        recolor_pixel(&mut px, &params);
        assert_eq!(px, [255, 0, 255, 9]);
    }

    #[test]
    fn just_below_half_misses_the_opposite_hue() {
        let params = Parameters { mask_hue: 0.0, hue_delta: 0.25, threshold: 0.49 };
        assert!(!hue_matches(0.5, &params));
        assert!(hue_matches(0.48, &params));
    }

    #[test]
    fn outside_threshold_is_untouched() {
        let mut px: Pixel = [0, 0, 255, 255];
        let params = Parameters { mask_hue: 0.0, hue_delta: 0.5, threshold: 0.3 };
        recolor_pixel(&mut px, &params);
        assert_eq!(px, [0, 0, 255, 255]);
    }
}
