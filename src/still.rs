// Still-image recoloring: decode a file, run the same pass a camera frame
// gets, encode the result. The output format follows the output extension.

use crate::error::Error;
use crate::params::Parameters;
use crate::recolor::{process_frame, process_frame_par};
use crate::types::PixelBuffer;
use std::path::Path;
use std::time::Instant;

/// Recolor `input` into `output` and return the image size.
pub fn recolor_file(
    input: &Path,
    output: &Path,
    params: &Parameters,
    parallel: bool,
) -> Result<(usize, usize), Error> {
    let img = image::open(input)?.to_rgba8();
    let mut frame = PixelBuffer::from_rgba_image(img);
    let size = (frame.width(), frame.height());

    let start = Instant::now();
    if parallel {
        process_frame_par(&mut frame, params);
    } else {
        process_frame(&mut frame, params);
    }
    log::debug!("Recolor of {}x{} took {:?}", size.0, size.1, start.elapsed());

    frame.into_rgba_image()?.save(output)?;
    Ok(size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgb;
    use image::{Rgba, RgbaImage};

    fn write_red_and_blue(path: &Path) {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 200]));
        img.put_pixel(1, 0, Rgba([0, 0, 255, 77]));
        img.save(path).unwrap();
    }

    #[test]
    fn recolors_a_png_and_keeps_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        write_red_and_blue(&input);

        let params = Parameters::from_colors(Rgb::new(255, 0, 0), Rgb::new(0, 255, 0), 0.1);
        for parallel in [false, true] {
            let size = recolor_file(&input, &output, &params, parallel).unwrap();
            assert_eq!(size, (2, 1));

            let out = image::open(&output).unwrap().to_rgba8();
            assert_eq!(out.dimensions(), (2, 1));
            assert_eq!(out.get_pixel(0, 0), &Rgba([0, 255, 0, 200]));
            assert_eq!(out.get_pixel(1, 0), &Rgba([0, 0, 255, 77]));
        }
    }

    #[test]
    fn missing_input_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let params = Parameters::new(0.0, 0.5, 0.1);
        let err = recolor_file(
            &dir.path().join("missing.png"),
            &dir.path().join("out.png"),
            &params,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Image(_)), "{err}");
        assert!(!dir.path().join("out.png").exists());
    }
}
