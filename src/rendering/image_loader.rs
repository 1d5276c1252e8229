use std::path::Path;

use gr_pack::{GraphicsMode, PixelBuffer};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};

use crate::error::AppError;

/// Decode an image file from disk.
pub fn open_image(path: &Path) -> Result<DynamicImage, AppError> {
    let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Decoded image"
    );
    Ok(image)
}

/// Scale `image` to the resolution of `mode` and convert it to sRGB pixels.
///
/// The aspect ratio is not preserved; the Atari modes use non-square pixels
/// and the source is stretched to fill the whole screen.
pub fn fit_to_mode(image: &DynamicImage, mode: &GraphicsMode) -> Result<PixelBuffer, AppError> {
    let (width, height) = (mode.width() as u32, mode.height() as u32);
    let rgb = if image.width() == width && image.height() == height {
        image.to_rgb8()
    } else {
        image
            .resize_exact(width, height, FilterType::Triangle)
            .to_rgb8()
    };
    Ok(PixelBuffer::from_rgb8(
        rgb.as_raw(),
        mode.width(),
        mode.height(),
    )?)
}
