// hue-swap: live hue substitution on a camera feed.
//
// Pixels whose hue is close to a mask hue get their hue rotated toward a
// replace hue; saturation and value are kept. The library holds the color
// conversions, the per-frame recolor pass and still-image recoloring; the
// binary wires them to a webcam and a window.

pub mod color;
pub mod config;
pub mod error;
pub mod params;
pub mod recolor;
pub mod still;
pub mod types;

pub use error::Error;
pub use params::{Controls, Parameters};
pub use recolor::{process_frame, process_frame_par};
pub use types::{Hsv, Pixel, PixelBuffer, Rgb};
