use crate::api::PackError;
use crate::palette::GraphicsMode;

/// Palette indices of a quantized image, row-major.
///
/// # Example
///
/// ```
/// use gr_pack::{GraphicsMode, IndexGrid};
///
/// let mode = GraphicsMode::from_id(14).unwrap().with_resolution(2, 1).unwrap();
/// let grid = IndexGrid::new(vec![0, 1], mode).unwrap();
///
/// assert_eq!(grid.get(1, 0), 1);
/// assert_eq!(grid.to_rgb(), vec![0x04, 0x04, 0x04, 0x9b, 0x54, 0x46]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IndexGrid {
    indices: Vec<u8>,
    mode: GraphicsMode,
}

impl IndexGrid {
    /// Wrap quantized indices.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::BufferLength`] if `indices` does not hold one
    /// entry per pixel of `mode`, and [`PackError::IndexOutOfPalette`] for
    /// an index past the end of its palette.
    pub fn new(indices: Vec<u8>, mode: GraphicsMode) -> Result<Self, PackError> {
        let expected = mode.width() * mode.height();
        if indices.len() != expected {
            return Err(PackError::BufferLength {
                expected,
                actual: indices.len(),
            });
        }
        if let Some(&index) = indices.iter().find(|&&i| i as usize >= mode.len()) {
            return Err(PackError::IndexOutOfPalette {
                index,
                len: mode.len(),
            });
        }
        Ok(Self { indices, mode })
    }

    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.mode.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.mode.height()
    }

    /// The mode the grid was quantized against.
    #[inline]
    pub fn mode(&self) -> &GraphicsMode {
        &self.mode
    }

    /// Index at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.indices[y * self.width() + x]
    }

    /// Render through the palette as packed RGB bytes (`width * height * 3`).
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.indices.len() * 3);
        for &i in &self.indices {
            rgb.extend_from_slice(&self.mode.color(i as usize).to_bytes());
        }
        rgb
    }
}
