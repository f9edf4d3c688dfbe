// Core types shared by the color conversions, the recolor pass and the window.

use crate::error::Error;
use image::RgbaImage;

/// Bytes per pixel in a `PixelBuffer`: R, G, B and an alpha/unused channel.
pub const CHANNELS: usize = 4;

/// One RGBA pixel as stored in the buffer.
pub type Pixel = [u8; CHANNELS];

/// 8-bit RGB triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Read the color channels of a pixel, ignoring alpha.
    #[inline]
    pub fn from_pixel(px: &Pixel) -> Self {
        Self { r: px[0], g: px[1], b: px[2] }
    }
}

/// Normalized HSV triple.
/// Hue is in [0,1) and covers a full revolution; saturation and value are in [0,1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Hsv {
    pub h: f32,
    pub s: f32,
    pub v: f32,
}

impl Hsv {
    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }
}

/// Row-major RGBA frame, 8 bits per channel.
/// The 4th channel is carried through untouched by the recolor pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>, // length = width * height * 4
}

impl PixelBuffer {
    /// Opaque black frame.
    pub fn new(width: usize, height: usize) -> Self {
        let mut data = vec![0u8; width * height * CHANNELS];
        for px in data.chunks_exact_mut(CHANNELS) {
            px[3] = 255;
        }
        Self { width, height, data }
    }

    /// Wrap raw RGBA bytes. Fails if the length is not `width * height * 4`.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, Error> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(CHANNELS))
            .unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(Error::BufferSize { expected, actual: data.len() });
        }
        Ok(Self { width, height, data })
    }

    /// Copy packed RGB bytes (3 per pixel) in, setting alpha to 255.
    pub fn from_rgb_bytes(width: usize, height: usize, rgb: &[u8]) -> Result<Self, Error> {
        let expected = width.checked_mul(height).and_then(|n| n.checked_mul(3)).unwrap_or(usize::MAX);
        if rgb.len() != expected {
            return Err(Error::BufferSize { expected, actual: rgb.len() });
        }
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for px in rgb.chunks_exact(3) {
            data.extend_from_slice(&[px[0], px[1], px[2], 255]);
        }
        Ok(Self { width, height, data })
    }

    /// Take ownership of an RGBA image's bytes.
    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (w, h) = img.dimensions();
        Self { width: w as usize, height: h as usize, data: img.into_raw() }
    }

    /// Hand the bytes back as an `image` buffer (for saving).
    /// Fails only when a side does not fit in `u32`.
    pub fn into_rgba_image(self) -> Result<RgbaImage, Error> {
        let (width, height) = (self.width, self.height);
        let dims = u32::try_from(width).ok().zip(u32::try_from(height).ok());
        dims.and_then(|(w, h)| RgbaImage::from_raw(w, h, self.data))
            .ok_or(Error::Dimensions { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels (not bytes).
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) * CHANNELS)
    }

    /// Pixel at (x,y), or `None` outside the frame.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        let i = self.offset(x, y)?;
        let mut px = [0u8; CHANNELS];
        px.copy_from_slice(&self.data[i..i + CHANNELS]);
        Some(px)
    }

    /// Overwrite the color channels at (x,y), keeping alpha. Returns false outside the frame.
    pub fn set_rgb(&mut self, x: usize, y: usize, c: Rgb) -> bool {
        match self.offset(x, y) {
            Some(i) => {
                self.data[i] = c.r;
                self.data[i + 1] = c.g;
                self.data[i + 2] = c.b;
                true
            }
            None => false,
        }
    }

    /// Every pixel in row-major order.
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut Pixel> {
        self.data
            .chunks_exact_mut(CHANNELS)
            .filter_map(|c| <&mut Pixel>::try_from(c).ok())
    }

    /// Raw RGBA bytes. The length is fixed; only contents can change.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Pack into 0x00RRGGBB words for the window, reusing `out`'s allocation.
    pub fn pack_u32(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(
            self.data
                .chunks_exact(CHANNELS)
                .map(|px| ((px[0] as u32) << 16) | ((px[1] as u32) << 8) | px[2] as u32),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_wrong_length() {
        let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        match err {
            Error::BufferSize { expected, actual } => {
                assert_eq!(expected, 16);
                assert_eq!(actual, 15);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn accessors_are_bounds_checked() {
        let mut buf = PixelBuffer::new(3, 2);
        assert_eq!(buf.pixel(2, 1), Some([0, 0, 0, 255]));
        assert_eq!(buf.pixel(3, 0), None);
        assert_eq!(buf.pixel(0, 2), None);
        assert!(!buf.set_rgb(3, 1, Rgb::new(1, 2, 3)));
        assert!(buf.set_rgb(1, 1, Rgb::new(1, 2, 3)));
        assert_eq!(buf.pixel(1, 1), Some([1, 2, 3, 255]));
    }

    #[test]
    fn layout_is_row_major() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.set_rgb(1, 0, Rgb::new(9, 9, 9));
        assert_eq!(&buf.as_bytes()[4..8], &[9, 9, 9, 255]);
        buf.set_rgb(0, 1, Rgb::new(7, 7, 7));
        assert_eq!(&buf.as_bytes()[8..12], &[7, 7, 7, 255]);
    }

    #[test]
    fn pack_u32_drops_alpha() {
        let buf = PixelBuffer::from_raw(2, 1, vec![0x12, 0x34, 0x56, 0x00, 0xff, 0x00, 0x01, 0x80]).unwrap();
        let mut out = Vec::new();
        buf.pack_u32(&mut out);
        assert_eq!(out, vec![0x0012_3456, 0x00ff_0001]);
    }

    #[test]
    fn rgba_image_keeps_dimensions_and_bytes() {
        let bytes = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let buf = PixelBuffer::from_raw(3, 1, bytes.clone()).unwrap();
        let img = buf.into_rgba_image().unwrap();
        assert_eq!(img.dimensions(), (3, 1));
        assert_eq!(img.into_raw(), bytes);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn oversized_frame_reports_its_dimensions() {
        let width = u32::MAX as usize + 1;
        let buf = PixelBuffer { width, height: 0, data: Vec::new() };
        match buf.into_rgba_image().unwrap_err() {
            Error::Dimensions { width: w, height: h } => assert_eq!((w, h), (width, 0)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rgb_bytes_get_opaque_alpha() {
        let buf = PixelBuffer::from_rgb_bytes(2, 1, &[10, 20, 30, 40, 50, 60]).unwrap();
        assert_eq!(buf.pixel(0, 0), Some([10, 20, 30, 255]));
        assert_eq!(buf.pixel(1, 0), Some([40, 50, 60, 255]));
        assert!(PixelBuffer::from_rgb_bytes(2, 1, &[0; 5]).is_err());
    }
}
