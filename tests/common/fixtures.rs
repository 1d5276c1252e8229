//! Test fixtures and constants.

use image::{DynamicImage, Rgb, RgbImage};

/// Palette colors used to build inputs that quantize without ambiguity
pub mod colors {
    /// GRAPHICS 8 background (index 0)
    pub const GR8_DARK: [u8; 3] = [0x03, 0x46, 0x53];
    /// GRAPHICS 8 foreground (index 1)
    pub const GR8_LIGHT: [u8; 3] = [0x59, 0x9b, 0xa9];
    /// GRAPHICS 14 background (index 0)
    pub const GR14_BLACK: [u8; 3] = [0x04, 0x04, 0x04];
    /// GRAPHICS 14 foreground (index 1)
    pub const GR14_BROWN: [u8; 3] = [0x9b, 0x54, 0x46];
}

/// Image already at the target resolution with a centered box of `fg`
/// on `bg`. Nothing is resampled, so every pixel maps to a palette entry.
pub fn framed_box(width: u32, height: u32, bg: [u8; 3], fg: [u8; 3]) -> DynamicImage {
    let (x0, x1) = (width / 4, width * 3 / 4);
    let (y0, y1) = (height / 4, height * 3 / 4);
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        if (x0..x1).contains(&x) && (y0..y1).contains(&y) {
            Rgb(fg)
        } else {
            Rgb(bg)
        }
    }))
}

/// Vertical stripes of `a` and `b`, `period` pixels each
pub fn stripes(width: u32, height: u32, period: u32, a: [u8; 3], b: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, _| {
        if (x / period) % 2 == 0 {
            Rgb(a)
        } else {
            Rgb(b)
        }
    }))
}

/// Smooth RGB gradient, for exercising every mode's palette
pub fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(2).saturating_sub(1)) as u8,
            (y * 255 / height.max(2).saturating_sub(1)) as u8,
            128,
        ])
    }))
}

/// Sample config file contents
pub const SAMPLE_CONFIG: &str = r#"
out_dir: previews
program: build/picture.pas
default_mode: 14
compression: hline
occlusion: overdraw
write_layers: true
"#;
