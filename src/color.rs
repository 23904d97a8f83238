//! RGB / HSV helpers shared by the clustering and layout stages.
//!
//! HSV is only ever used as a sort key. Clustering distances are measured in
//! plain 8-bit RGB space.

use palette::{Clamp, FromColor, Hsv, Srgb};

/// An 8-bit RGB pixel, as decoded from the source image.
pub type Pixel = Srgb<u8>;

/// Reserved filler color used to pad short palettes before the near-white purge.
pub const FILLER: Pixel = Srgb::new(255, 255, 255);

/// Convert a pixel to `(hue, saturation, value)`, each normalised to `[0, 1]`.
///
/// Hue is expressed as a fraction of a full turn, so pure red is `0.0` and
/// greys (which have no hue) also report `0.0`.
pub fn to_hsv(pixel: Pixel) -> (f32, f32, f32) {
    let hsv: Hsv = Hsv::from_color(pixel.into_format::<f32>());
    let hue = hsv.hue.into_positive_degrees() / 360.0;
    // `into_positive_degrees` can land on exactly 360 after rounding.
    let hue = if hue >= 1.0 { 0.0 } else { hue };
    (hue, hsv.saturation, hsv.value)
}

/// Inverse of [`to_hsv`]. Channels are clamped to the RGB gamut and rounded to
/// the nearest 8-bit value.
pub fn to_rgb((hue, saturation, value): (f32, f32, f32)) -> Pixel {
    let hsv: Hsv = Hsv::new(hue * 360.0, saturation, value);
    let rgb: Srgb = Srgb::from_color(hsv).clamp();
    rgb.into_format::<u8>()
}

/// Squared Euclidean distance between two pixels in 0-255 RGB units.
#[inline(always)]
pub fn distance_sq(a: Pixel, b: Pixel) -> u32 {
    let dr = a.red as i32 - b.red as i32;
    let dg = a.green as i32 - b.green as i32;
    let db = a.blue as i32 - b.blue as i32;
    (dr * dr + dg * dg + db * db) as u32
}

/// True when every channel is strictly above `threshold`.
#[inline]
pub fn is_near_white(pixel: Pixel, threshold: u8) -> bool {
    pixel.red > threshold && pixel.green > threshold && pixel.blue > threshold
}

/// Upper-case `RRGGBB` hex string, without the leading `#`.
pub fn to_hex(pixel: Pixel) -> String {
    format!("{:02X}{:02X}{:02X}", pixel.red, pixel.green, pixel.blue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Pixel, b: Pixel) -> bool {
        (a.red as i16 - b.red as i16).abs() <= 1
            && (a.green as i16 - b.green as i16).abs() <= 1
            && (a.blue as i16 - b.blue as i16).abs() <= 1
    }

    #[test]
    fn test_hsv_primaries() {
        let (h, s, v) = to_hsv(Srgb::new(255, 0, 0));
        assert!(h.abs() < 1e-4);
        assert!((s - 1.0).abs() < 1e-4);
        assert!((v - 1.0).abs() < 1e-4);

        let (h, _, _) = to_hsv(Srgb::new(0, 255, 0));
        assert!((h - 1.0 / 3.0).abs() < 1e-3);

        let (h, _, _) = to_hsv(Srgb::new(0, 0, 255));
        assert!((h - 2.0 / 3.0).abs() < 1e-3);
    }

    #[test]
    fn test_hsv_grey_has_no_hue_or_saturation() {
        let (h, s, v) = to_hsv(Srgb::new(128, 128, 128));
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((v - 128.0 / 255.0).abs() < 1e-4);
    }

    #[test]
    fn test_round_trip_within_one() {
        // Stride through the cube; every step hits a different hue sector.
        for r in (0..=255u16).step_by(15) {
            for g in (0..=255u16).step_by(17) {
                for b in (0..=255u16).step_by(13) {
                    let p = Srgb::new(r as u8, g as u8, b as u8);
                    let back = to_rgb(to_hsv(p));
                    assert!(close(p, back), "{p:?} came back as {back:?}");
                }
            }
        }
        for p in [Srgb::new(0, 0, 0), Srgb::new(255, 255, 255), Srgb::new(255, 0, 1)] {
            assert!(close(p, to_rgb(to_hsv(p))));
        }
    }

    #[test]
    fn test_distance_and_near_white() {
        assert_eq!(distance_sq(Srgb::new(0, 0, 0), Srgb::new(3, 4, 0)), 25);
        assert_eq!(distance_sq(Srgb::new(10, 10, 10), Srgb::new(10, 10, 10)), 0);

        assert!(is_near_white(FILLER, 240));
        assert!(is_near_white(Srgb::new(241, 250, 255), 240));
        assert!(!is_near_white(Srgb::new(240, 250, 255), 240));
        assert!(!is_near_white(Srgb::new(10, 10, 200), 240));
    }

    #[test]
    fn test_hex() {
        assert_eq!(to_hex(Srgb::new(10, 10, 200)), "0A0AC8");
        assert_eq!(to_hex(FILLER), "FFFFFF");
    }
}
