//! Nearest-color quantization against a mode's palette.

use crate::api::PackError;
use crate::color::Lab;
use crate::input::PixelBuffer;
use crate::output::IndexGrid;
use crate::palette::GraphicsMode;

/// Result of [`quantize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Quantized {
    /// One palette index per pixel.
    pub grid: IndexGrid,
    /// Sum over all pixels of the distance to the chosen palette entry.
    ///
    /// Lower is a closer match; only meaningful when comparing modes or
    /// source images of the same size.
    pub delta_sum: f64,
}

/// Map every pixel to its nearest palette entry under CIEDE2000.
///
/// Ties resolve to the lower palette index.
///
/// # Errors
///
/// Returns [`PackError::MalformedBuffer`] if the buffer's dimensions differ
/// from the mode's resolution.
///
/// # Example
///
/// ```
/// use gr_pack::{quantize, GraphicsMode, PixelBuffer, Srgb};
///
/// let mode = GraphicsMode::from_id(9).unwrap().with_resolution(2, 2).unwrap();
/// let buffer = PixelBuffer::filled(Srgb::from_u8(0, 0, 0), 2, 2);
///
/// let quantized = quantize(&buffer, &mode).unwrap();
/// assert!(quantized.grid.indices().iter().all(|&i| i == 0));
/// ```
pub fn quantize(buffer: &PixelBuffer, mode: &GraphicsMode) -> Result<Quantized, PackError> {
    if buffer.width() != mode.width() || buffer.height() != mode.height() {
        return Err(PackError::MalformedBuffer {
            mode: mode.id(),
            expected_width: mode.width(),
            expected_height: mode.height(),
            width: buffer.width(),
            height: buffer.height(),
        });
    }

    let mut delta_sum = 0.0;
    let indices = buffer
        .pixels()
        .iter()
        .map(|&p| {
            let (idx, dist) = mode.find_nearest(Lab::from(p));
            delta_sum += dist;
            idx
        })
        .collect();

    tracing::debug!(
        mode = mode.id(),
        pixels = buffer.pixels().len(),
        delta_sum,
        "quantized pixel buffer"
    );

    Ok(Quantized {
        grid: IndexGrid::new(indices, mode.clone())?,
        delta_sum,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{lab_distance, Srgb};

    #[test]
    fn test_rejects_wrong_dimensions() {
        let mode = GraphicsMode::from_id(8).unwrap();
        let buffer = PixelBuffer::filled(Srgb::from_u8(0, 0, 0), 2, 2);
        let err = quantize(&buffer, mode).unwrap_err();
        assert!(matches!(
            err,
            PackError::MalformedBuffer {
                mode: 8,
                expected_width: 320,
                expected_height: 192,
                width: 2,
                height: 2
            }
        ));
    }

    #[test]
    fn test_exact_palette_colors_have_zero_delta() {
        let mode = GraphicsMode::from_id(15).unwrap().with_resolution(4, 1).unwrap();
        let buffer = PixelBuffer::new(mode.colors().to_vec(), 4, 1).unwrap();
        let q = quantize(&buffer, &mode).unwrap();
        assert_eq!(q.grid.indices(), &[0, 1, 2, 3]);
        assert_eq!(q.delta_sum, 0.0);
    }

    #[test]
    fn test_chosen_index_is_a_minimum() {
        let mode = GraphicsMode::from_id(11).unwrap().with_resolution(8, 1).unwrap();
        let pixels = [
            0xff0000, 0x00ff00, 0x0000ff, 0x808080, 0xffffff, 0x123456, 0xc0ffee, 0x000000,
        ]
        .iter()
        .map(|&c| Srgb::from_rgb24(c))
        .collect::<Vec<_>>();
        let buffer = PixelBuffer::new(pixels.clone(), 8, 1).unwrap();
        let q = quantize(&buffer, &mode).unwrap();

        for (x, &p) in pixels.iter().enumerate() {
            let lab = Lab::from(p);
            let chosen = q.grid.get(x, 0) as usize;
            let chosen_dist = lab_distance(mode.lab(chosen), lab);
            for i in 0..mode.len() {
                assert!(chosen_dist <= lab_distance(mode.lab(i), lab));
            }
        }
    }

    #[test]
    fn test_delta_sum_accumulates_per_call() {
        let mode = GraphicsMode::from_id(14).unwrap().with_resolution(1, 1).unwrap();
        let buffer = PixelBuffer::filled(Srgb::from_u8(60, 60, 60), 1, 1);
        let first = quantize(&buffer, &mode).unwrap();
        let second = quantize(&buffer, &mode).unwrap();
        assert!(first.delta_sum > 0.0);
        assert_eq!(first.delta_sum, second.delta_sum);
    }
}
