use crate::api::PackError;
use crate::color::Srgb;

/// A width×height grid of sRGB pixels in row-major order.
///
/// # Example
///
/// ```
/// use gr_pack::PixelBuffer;
///
/// let buffer = PixelBuffer::from_rgb8(&[0, 0, 0, 255, 255, 255], 2, 1).unwrap();
/// assert_eq!(buffer.pixel(1, 0).r, 255);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    pixels: Vec<Srgb>,
    width: usize,
    height: usize,
}

impl PixelBuffer {
    /// Wrap pixels in a buffer.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::BufferLength`] if `pixels.len() != width * height`.
    pub fn new(pixels: Vec<Srgb>, width: usize, height: usize) -> Result<Self, PackError> {
        if pixels.len() != width * height {
            return Err(PackError::BufferLength {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Build a buffer from packed `[R, G, B, R, G, B, ...]` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::BufferLength`] if `bytes.len() != width * height * 3`.
    pub fn from_rgb8(bytes: &[u8], width: usize, height: usize) -> Result<Self, PackError> {
        if bytes.len() != width * height * 3 {
            return Err(PackError::BufferLength {
                expected: width * height * 3,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|p| Srgb::from_u8(p[0], p[1], p[2]))
            .collect();
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// Buffer filled with a single color.
    pub fn filled(color: Srgb, width: usize, height: usize) -> Self {
        Self {
            pixels: vec![color; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Srgb] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Srgb {
        self.pixels[y * self.width + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_length() {
        let err = PixelBuffer::new(vec![Srgb::from_u8(0, 0, 0); 3], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            PackError::BufferLength {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_from_rgb8_row_major() {
        let bytes = [1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4];
        let buffer = PixelBuffer::from_rgb8(&bytes, 2, 2).unwrap();
        assert_eq!(buffer.pixel(1, 0), Srgb::from_u8(2, 2, 2));
        assert_eq!(buffer.pixel(0, 1), Srgb::from_u8(3, 3, 3));
    }

    #[test]
    fn test_from_rgb8_checks_length() {
        assert!(matches!(
            PixelBuffer::from_rgb8(&[0; 11], 2, 2),
            Err(PackError::BufferLength {
                expected: 12,
                actual: 11
            })
        ));
    }

    #[test]
    fn test_filled() {
        let buffer = PixelBuffer::filled(Srgb::from_u8(9, 9, 9), 3, 2);
        assert_eq!(buffer.pixels().len(), 6);
        assert!(buffer.pixels().iter().all(|&p| p == Srgb::from_u8(9, 9, 9)));
    }
}
