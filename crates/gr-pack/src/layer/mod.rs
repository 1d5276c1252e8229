//! Splitting an index grid into per-color layers.
//!
//! Layers come out in draw order: the most populous color first. A renderer
//! replaying the packed primitives must paint layers in exactly this order,
//! because every later layer's primitives were computed around the pixels
//! already owned by earlier ones.

mod bitmap;

pub use bitmap::Bitmap;

use serde::Serialize;

use crate::output::IndexGrid;

/// The pixels holding one palette index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layer {
    index: u8,
    pixel_count: usize,
    #[serde(skip)]
    occupancy: Bitmap,
}

impl Layer {
    /// Palette index this layer is drawn with.
    #[inline]
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Number of pixels in the layer.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    /// Which pixels hold this layer's index.
    #[inline]
    pub fn occupancy(&self) -> &Bitmap {
        &self.occupancy
    }
}

/// Split `grid` into one [`Layer`] per palette index that actually occurs.
///
/// Layers are sorted by pixel count, largest first; equal counts keep
/// palette order (lower index first).
///
/// # Example
///
/// ```
/// use gr_pack::{layerize, GraphicsMode, IndexGrid};
///
/// let mode = GraphicsMode::from_id(15).unwrap().with_resolution(3, 1).unwrap();
/// let layers = layerize(&IndexGrid::new(vec![2, 0, 2], mode).unwrap());
///
/// assert_eq!(layers.len(), 2);
/// assert_eq!((layers[0].index(), layers[0].pixel_count()), (2, 2));
/// assert_eq!((layers[1].index(), layers[1].pixel_count()), (0, 1));
/// ```
pub fn layerize(grid: &IndexGrid) -> Vec<Layer> {
    let (width, height) = (grid.width(), grid.height());
    let mut layers: Vec<Layer> = (0..grid.mode().len())
        .map(|i| Layer {
            index: i as u8,
            pixel_count: 0,
            occupancy: Bitmap::new(width, height),
        })
        .collect();

    for y in 0..height {
        for x in 0..width {
            let layer = &mut layers[grid.get(x, y) as usize];
            layer.occupancy.set(x, y, true);
            layer.pixel_count += 1;
        }
    }

    layers.retain(|l| l.pixel_count > 0);
    // Stable: ties stay in palette order.
    layers.sort_by(|a, b| b.pixel_count.cmp(&a.pixel_count));

    tracing::debug!(
        layers = layers.len(),
        background = layers.first().map(|l| l.index),
        "layerized index grid"
    );
    layers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::GraphicsMode;

    fn grid(id: u8, width: usize, height: usize, indices: Vec<u8>) -> IndexGrid {
        let mode = GraphicsMode::from_id(id).unwrap().with_resolution(width, height).unwrap();
        IndexGrid::new(indices, mode).unwrap()
    }

    #[test]
    fn test_counts_sum_to_area() {
        let g = grid(9, 4, 2, vec![0, 1, 1, 5, 5, 5, 9, 0]);
        let layers = layerize(&g);
        let total: usize = layers.iter().map(|l| l.pixel_count()).sum();
        assert_eq!(total, 8);
    }

    #[test]
    fn test_every_pixel_in_exactly_one_layer() {
        let g = grid(9, 4, 2, vec![0, 1, 1, 5, 5, 5, 9, 0]);
        let layers = layerize(&g);
        for y in 0..2 {
            for x in 0..4 {
                let owners: Vec<u8> = layers
                    .iter()
                    .filter(|l| l.occupancy().get(x, y))
                    .map(|l| l.index())
                    .collect();
                assert_eq!(owners, vec![g.get(x, y)]);
            }
        }
    }

    #[test]
    fn test_absent_indices_dropped() {
        let g = grid(9, 2, 1, vec![3, 3]);
        let layers = layerize(&g);
        assert_eq!(layers.len(), 1);
        assert_eq!(layers[0].index(), 3);
    }

    #[test]
    fn test_order_descending_with_index_tiebreak() {
        let g = grid(9, 3, 2, vec![7, 2, 7, 2, 4, 4]);
        let order: Vec<(u8, usize)> = layerize(&g)
            .iter()
            .map(|l| (l.index(), l.pixel_count()))
            .collect();
        assert_eq!(order, vec![(2, 2), (4, 2), (7, 2)]);
    }
}
