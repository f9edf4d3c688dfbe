// RGB <-> HSV conversion.
// Hue is normalized to [0,1) so a full revolution is 1.0; saturation and
// value are in [0,1]. An achromatic color (max == min) has hue 0.

use crate::types::{Hsv, Rgb};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Wrap any finite hue into [0,1).
#[inline]
pub fn wrap_hue(h: f32) -> f32 {
    let w = h.rem_euclid(1.0);
    // rem_euclid of a tiny negative rounds up to exactly 1.0 in f32
    if w >= 1.0 { 0.0 } else { w }
}

/// Convert an 8-bit RGB triple to normalized HSV.
pub fn rgb_to_hsv(c: Rgb) -> Hsv {
    let r = c.r as f32 / 255.0;
    let g = c.g as f32 / 255.0;
    let b = c.b as f32 / 255.0;

    // Branch on the integer channels so ties pick a sector deterministically.
    let max8 = c.r.max(c.g).max(c.b);
    let min8 = c.r.min(c.g).min(c.b);
    let max = max8 as f32 / 255.0;
    let d = (max8 - min8) as f32 / 255.0;

    let s = if max8 == 0 { 0.0 } else { d / max };

    let h = if max8 == min8 {
        0.0
    } else if max8 == c.r {
        (g - b) / d + if c.g < c.b { 6.0 } else { 0.0 }
    } else if max8 == c.g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsv { h: wrap_hue(h / 6.0), s, v: max }
}

/// Convert normalized HSV back to RGB channels in [0,255] as reals.
/// Use [`quantize`] (or [`Hsv::to_rgb8`]) before storing into a `u8` buffer.
pub fn hsv_to_rgb(c: Hsv) -> [f32; 3] {
    let h6 = wrap_hue(c.h) * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let (s, v) = (c.s, c.v);

    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match (sector as i32).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    [r * 255.0, g * 255.0, b * 255.0]
}

/// Round and clamp real channels to 8 bits. Rounding (not truncation) avoids banding.
#[inline]
pub fn quantize(c: [f32; 3]) -> Rgb {
    #[inline]
    fn q(v: f32) -> u8 {
        v.round().clamp(0.0, 255.0) as u8
    }
    Rgb { r: q(c[0]), g: q(c[1]), b: q(c[2]) }
}

impl Hsv {
    /// HSV -> rounded, clamped 8-bit RGB.
    #[inline]
    pub fn to_rgb8(self) -> Rgb {
        quantize(hsv_to_rgb(self))
    }
}

/// Malformed `#rrggbb` string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{input}': expected #rrggbb")]
pub struct ColorParseError {
    pub input: String,
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    /// Parse `#rrggbb` (the `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError { input: s.to_string() };
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let packed = u32::from_str_radix(hex, 16).map_err(|_| err())?;
        Ok(Rgb {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        })
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
