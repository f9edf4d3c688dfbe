// Window + software drawing utilities.
// Visual effects provided here:
// 1) A window that shows the recolored camera image.
// 2) A crosshair that follows your mouse (the eyedropper).
// 3) A tiny 5x7 bitmap font and color swatches for the HUD.

use hue_swap::{Controls, Error, Hsv, PixelBuffer, Rgb};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window,   // the on-screen window you see
    packed: Vec<u32>, // 0x00RRGGBB staging buffer for minifb, reused every frame
    lmb_was_down: bool,
}

impl Drawer {
    /// Create a window sized to the camera feed.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        log::info!("Window open at {width}x{height}");
        Ok(Self {
            window,
            packed: Vec::with_capacity(width * height),
            lmb_was_down: false,
        })
    }

    /// Push the pixels for this frame to the screen (alpha is dropped).
    pub fn present(&mut self, frame: &PixelBuffer) -> Result<(), Error> {
        frame.pack_u32(&mut self.packed);
        self.window
            .update_with_buffer(&self.packed, frame.width(), frame.height())
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current mouse position in window pixel coordinates (clamped to the window).
    pub fn mouse_pos(&self) -> Option<(usize, usize)> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| (x.max(0.0) as usize, y.max(0.0) as usize))
    }

    /// True on the frame the left button goes down (not while held).
    pub fn left_clicked(&mut self) -> bool {
        let down = self.window.get_mouse_down(MouseButton::Left);
        let clicked = down && !self.lmb_was_down;
        self.lmb_was_down = down;
        clicked
    }

    /// -1 for Left, +1 for Right, 0 otherwise. Repeats while held.
    pub fn horizontal_steps(&self) -> i32 {
        self.held_steps(Key::Left, Key::Right)
    }

    /// -1 for Down, +1 for Up, 0 otherwise. Repeats while held.
    pub fn vertical_steps(&self) -> i32 {
        self.held_steps(Key::Down, Key::Up)
    }

    fn held_steps(&self, minus: Key, plus: Key) -> i32 {
        let mut steps = 0;
        if self.window.is_key_pressed(minus, KeyRepeat::Yes) { steps -= 1; }
        if self.window.is_key_pressed(plus, KeyRepeat::Yes) { steps += 1; }
        steps
    }

    // we flip a boolean in main to show the raw feed.
    pub fn space_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::Space, KeyRepeat::No)
    }

    // restores the configured mask/replace/threshold.
    pub fn r_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::R, KeyRepeat::No)
    }
}

/* ---------- Software drawing: pixels, crosshair, swatches, tiny bitmap font ---------- */

/// Put a pixel on the frame if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut PixelBuffer, x: i32, y: i32, color: Rgb) {
    if x < 0 || y < 0 {
        return;
    }
    fb.set_rgb(x as usize, y as usize, color);
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut PixelBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Draw a small crosshair centered at (cx,cy).
/// Visual: a "+" shape (with a tiny gap at the center) marks the pixel a click would sample.
pub fn draw_crosshair(fb: &mut PixelBuffer, cx: i32, cy: i32, size: i32, color: Rgb) {
    draw_line(fb, cx - size, cy, cx - 2, cy, color);
    draw_line(fb, cx + 2, cy, cx + size, cy, color);
    draw_line(fb, cx, cy - size, cx, cy - 2, color);
    draw_line(fb, cx, cy + 2, cx, cy + size, color);
    put_pixel(fb, cx, cy, color);
}

/// Filled square showing a fully saturated, full-value hue, with a 1px black border.
pub fn draw_hue_swatch(fb: &mut PixelBuffer, x: i32, y: i32, size: i32, hue: f32) {
    let fill = Hsv::new(hue, 1.0, 1.0).to_rgb8();
    let border = Rgb::new(0, 0, 0);
    for sy in y..y + size {
        for sx in x..x + size {
            let edge = sx == x || sy == y || sx == x + size - 1 || sy == y + size - 1;
            put_pixel(fb, sx, sy, if edge { border } else { fill });
        }
    }
}

/* ---------- 5x7 bitmap font (uppercase ASCII, digits, a little punctuation) ---------- */

/// Return a 5x7 glyph bitmap. Lowercase letters map to uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    // Helper macro to define a glyph quickly
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '/' => g!(0b00001,0b00010,0b00010,0b00100,0b01000,0b01000,0b10000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), with a 1-pixel black shadow for contrast.
fn draw_char_5x7(fb: &mut PixelBuffer, x: i32, y: i32, ch: char, color: Rgb) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (offset, c) in [(1, Rgb::new(0, 0, 0)), (0, color)] {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx + offset, y + ry as i32 + offset, c);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs; each glyph advances 6 pixels.
pub fn draw_text_5x7(fb: &mut PixelBuffer, mut x: i32, y: i32, text: &str, color: Rgb) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6; // 5 pixels glyph width + 1 pixel spacing
    }
}

/// The HUD text, one entry per line: (x, y, text).
fn hud_lines(controls: &Controls, fps: &str) -> [(i32, i32, String); 3] {
    let degrees = |h: f32| ((h * 360.0).round() as u32) % 360;
    let mode = if controls.bypass { "BYPASS" } else { "LIVE" };
    [
        (24, 11, format!("MASK {:03}", degrees(controls.mask_hue))),
        (106, 11, format!("REPLACE {:03}", degrees(controls.replace_hue))),
        (8, 26, format!("THRESHOLD {:.2} | {} | {}", controls.threshold, mode, fps)),
    ]
}

/// Overlay the mask/replace swatches and the current control values.
pub fn draw_hud(fb: &mut PixelBuffer, controls: &Controls, fps: &str) {
    let white = Rgb::new(0xFF, 0xFF, 0xFF);
    draw_hue_swatch(fb, 8, 8, 12, controls.mask_hue);
    draw_hue_swatch(fb, 90, 8, 12, controls.replace_hue);
    for (x, y, text) in hud_lines(controls, fps) {
        draw_text_5x7(fb, x, y, &text, white);
    }
}
