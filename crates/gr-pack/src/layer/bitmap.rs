/// A width×height grid of booleans, row-major.
///
/// Used for layer occupancy, for the claim overlay shared across layers and
/// for replaying packed primitives in tests and previews.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    bits: Vec<bool>,
    width: usize,
    height: usize,
}

impl Bitmap {
    /// An all-clear bitmap.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            bits: vec![false; width * height],
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
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.bits[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        self.bits[y * self.width + x] = value;
    }

    /// Set every cell of the inclusive region `(x1, y1)..=(x2, y2)`.
    pub fn fill_region(&mut self, x1: usize, y1: usize, x2: usize, y2: usize, value: bool) {
        for y in y1..=y2 {
            let row = y * self.width;
            self.bits[row + x1..=row + x2].fill(value);
        }
    }

    /// True when every cell of the inclusive region satisfies `pred`.
    pub fn region_all(
        &self,
        x1: usize,
        y1: usize,
        x2: usize,
        y2: usize,
        pred: impl Fn(bool) -> bool,
    ) -> bool {
        (y1..=y2).all(|y| {
            let row = y * self.width;
            self.bits[row + x1..=row + x2].iter().all(|&b| pred(b))
        })
    }

    /// Set every cell that is set in `other`.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts equal dimensions.
    pub fn union_with(&mut self, other: &Bitmap) {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        for (dst, &src) in self.bits.iter_mut().zip(&other.bits) {
            *dst |= src;
        }
    }

    /// Number of set cells.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Raw cells, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}
