// ------------------------------------------------------------
// Decoding helpers: image bytes -> flat pixel buffer
// ------------------------------------------------------------

use image::{DynamicImage, imageops::FilterType};
use palette::Srgb;

use crate::color::Pixel;
use crate::error::PaletteError;

/// Side length images are squashed to before clustering.
pub const DEFAULT_WORKING_SIDE: u32 = 300;

/// Flatten an image into RGB pixels, dropping fully transparent ones.
pub fn pixels_from_image(img: &DynamicImage) -> Vec<Pixel> {
    let raw = img.to_rgba8().into_raw();
    raw.chunks(4)
        .filter(|chunk| chunk[3] != 0)
        .map(|chunk| Srgb::new(chunk[0], chunk[1], chunk[2]))
        .collect()
}

/// Resize to a `side x side` working copy (aspect ratio is not kept) and
/// flatten it. `side == 0` keeps the original size.
pub fn prepare_image(img: &DynamicImage, side: u32) -> Vec<Pixel> {
    if side == 0 {
        return pixels_from_image(img);
    }
    let working = img.resize_exact(side, side, FilterType::Triangle);
    pixels_from_image(&working)
}

/// Decode `input` and return the working pixel buffer.
pub fn load_pixels(input: &[u8], side: u32) -> Result<Vec<Pixel>, PaletteError> {
    let img = image::load_from_memory(input)?;
    Ok(prepare_image(&img, side))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn test_transparent_pixels_are_skipped() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([10, 10, 200, 255]));
        img.put_pixel(1, 1, Rgba([0, 0, 0, 0]));
        let pixels = pixels_from_image(&DynamicImage::ImageRgba8(img));
        assert_eq!(pixels.len(), 3);
        assert!(pixels.iter().all(|&p| p == Srgb::new(10, 10, 200)));
    }

    #[test]
    fn test_prepare_resizes_to_square() {
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(40, 10, Rgba([1, 2, 3, 255])));
        assert_eq!(prepare_image(&img, 8).len(), 64);
        assert_eq!(prepare_image(&img, 0).len(), 400);
    }

    #[test]
    fn test_load_rejects_garbage() {
        assert!(matches!(
            load_pixels(b"not an image", 10),
            Err(PaletteError::Decode(_))
        ));
    }
}
