//! Greedy rectangle decomposition of layers.

use serde::Serialize;

use super::Occlusion;
use crate::layer::{Bitmap, Layer};

/// An axis-aligned rectangle with inclusive corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x1: usize,
    pub y1: usize,
    pub x2: usize,
    pub y2: usize,
}

impl Rect {
    #[inline]
    pub fn new(x1: usize, y1: usize, x2: usize, y2: usize) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.x2 - self.x1 + 1
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.y2 - self.y1 + 1
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width() * self.height()
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// True when the two rectangles share at least one pixel.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x1 <= other.x2 && other.x1 <= self.x2 && self.y1 <= other.y2 && other.y1 <= self.y2
    }
}

/// Rectangles of one layer, in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerRects {
    /// Palette index the rectangles are filled with.
    pub index: u8,
    pub rects: Vec<Rect>,
}

/// Output of [`pack_rectangles`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackedRects {
    /// One entry per packed layer, in draw order.
    pub layers: Vec<LayerRects>,
    /// Number of rectangles over all layers.
    pub total: usize,
}

/// Working state for one layer.
struct Growth<'a> {
    layer: &'a Bitmap,
    covered: Bitmap,
    claims: &'a Bitmap,
    occlusion: Occlusion,
}

impl Growth<'_> {
    #[inline]
    fn open(&self, x: usize, y: usize) -> bool {
        !self.covered.get(x, y)
            && self
                .occlusion
                .is_open(self.layer.get(x, y), self.claims.get(x, y))
    }

    fn column_open(&self, x: usize, y1: usize, y2: usize) -> bool {
        (y1..=y2).all(|y| self.open(x, y))
    }

    fn row_open(&self, y: usize, x1: usize, x2: usize) -> bool {
        (x1..=x2).all(|x| self.open(x, y))
    }

    /// Grow a 1×1 seed until no direction can extend it.
    ///
    /// Directions are tried left, up, right, down; any success starts the
    /// round over at left, so horizontal growth is preferred.
    fn grow(&self, x: usize, y: usize) -> Rect {
        let (width, height) = (self.layer.width(), self.layer.height());
        let mut r = Rect::new(x, y, x, y);

        loop {
            if r.x1 > 0 && self.column_open(r.x1 - 1, r.y1, r.y2) {
                r.x1 -= 1;
            } else if r.y1 > 0 && self.row_open(r.y1 - 1, r.x1, r.x2) {
                r.y1 -= 1;
            } else if r.x2 + 1 < width && self.column_open(r.x2 + 1, r.y1, r.y2) {
                r.x2 += 1;
            } else if r.y2 + 1 < height && self.row_open(r.y2 + 1, r.x1, r.x2) {
                r.y2 += 1;
            } else {
                return r;
            }
        }
    }
}

/// Decompose one layer into rectangles.
///
/// Columns are scanned right to left, each top to bottom. Every pixel of
/// the layer that is neither claimed nor covered yet seeds a rectangle,
/// which is grown greedily and committed once it is stuck. Committing
/// marks the layer's own pixels inside the rectangle in `claims`.
///
/// Under [`Occlusion::Exact`] a rectangle only ever covers the layer's
/// pixels. Under [`Occlusion::Overdraw`] it may also cover unclaimed pixels
/// of other layers; those are left unclaimed so their own layer repaints
/// them later.
///
/// # Example
///
/// ```
/// use gr_pack::pack::{squareify, Occlusion, Rect};
/// use gr_pack::{layerize, Bitmap, GraphicsMode, IndexGrid};
///
/// let mode = GraphicsMode::from_id(14).unwrap().with_resolution(2, 2).unwrap();
/// let layers = layerize(&IndexGrid::new(vec![1; 4], mode).unwrap());
/// let mut claims = Bitmap::new(2, 2);
///
/// let rects = squareify(&layers[0], &mut claims, Occlusion::Exact);
/// assert_eq!(rects, vec![Rect::new(0, 0, 1, 1)]);
/// ```
pub fn squareify(layer: &Layer, claims: &mut Bitmap, occlusion: Occlusion) -> Vec<Rect> {
    let occupancy = layer.occupancy();
    let (width, height) = (occupancy.width(), occupancy.height());

    let rects = {
        let mut growth = Growth {
            layer: occupancy,
            covered: Bitmap::new(width, height),
            claims,
            occlusion,
        };
        let mut rects = Vec::new();

        for x in (0..width).rev() {
            for y in 0..height {
                if !occupancy.get(x, y) || growth.covered.get(x, y) || growth.claims.get(x, y) {
                    continue;
                }
                let r = growth.grow(x, y);
                growth.covered.fill_region(r.x1, r.y1, r.x2, r.y2, true);
                rects.push(r);
            }
        }
        rects
    };

    for r in &rects {
        for y in r.y1..=r.y2 {
            for x in r.x1..=r.x2 {
                if occupancy.get(x, y) {
                    claims.set(x, y, true);
                }
            }
        }
    }

    debug_assert!(
        (0..height).all(|y| (0..width).all(|x| !occupancy.get(x, y) || claims.get(x, y))),
        "layer {} left pixels unclaimed",
        layer.index()
    );

    rects
}

/// Run [`squareify`] over `layers` in draw order, sharing `claims`.
///
/// Pixels already set in `claims` (for instance an elided background) are
/// treated as owned by an earlier layer.
pub fn pack_rectangles(layers: &[Layer], claims: &mut Bitmap, occlusion: Occlusion) -> PackedRects {
    let mut out = Vec::with_capacity(layers.len());
    let mut total = 0;

    for layer in layers {
        let rects = squareify(layer, claims, occlusion);
        tracing::debug!(
            index = layer.index(),
            pixels = layer.pixel_count(),
            rects = rects.len(),
            "packed layer into rectangles"
        );
        total += rects.len();
        out.push(LayerRects {
            index: layer.index(),
            rects,
        });
    }

    PackedRects { layers: out, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::layerize;
    use crate::output::IndexGrid;
    use crate::palette::GraphicsMode;
    use pretty_assertions::assert_eq;

    fn layers_of(id: u8, width: usize, height: usize, indices: Vec<u8>) -> Vec<Layer> {
        let mode = GraphicsMode::from_id(id).unwrap().with_resolution(width, height).unwrap();
        layerize(&IndexGrid::new(indices, mode).unwrap())
    }

    fn layer_with(layers: &[Layer], index: u8) -> &Layer {
        layers.iter().find(|l| l.index() == index).unwrap()
    }

    #[test]
    fn test_rect_geometry() {
        let r = Rect::new(2, 1, 4, 1);
        assert_eq!((r.width(), r.height(), r.area()), (3, 1, 3));
        assert!(r.contains(3, 1));
        assert!(!r.contains(3, 0));
        assert!(r.intersects(&Rect::new(4, 0, 5, 5)));
        assert!(!r.intersects(&Rect::new(5, 0, 5, 5)));
    }

    #[test]
    fn test_full_layer_is_one_rect() {
        let layers = layers_of(14, 3, 2, vec![0; 6]);
        let mut claims = Bitmap::new(3, 2);
        let rects = squareify(&layers[0], &mut claims, Occlusion::Exact);
        assert_eq!(rects, vec![Rect::new(0, 0, 2, 1)]);
        assert_eq!(claims.count_ones(), 6);
    }

    #[test]
    fn test_growth_prefers_left_then_down() {
        // 1 1
        // 1 1
        // 0 1
        let layers = layers_of(14, 2, 3, vec![1, 1, 1, 1, 0, 1]);
        let mut claims = Bitmap::new(2, 3);
        let rects = squareify(layer_with(&layers, 1), &mut claims, Occlusion::Exact);
        assert_eq!(rects, vec![Rect::new(0, 0, 1, 1), Rect::new(1, 2, 1, 2)]);
    }

    #[test]
    fn test_scan_starts_at_rightmost_column() {
        // 1 0 1
        let layers = layers_of(14, 3, 1, vec![1, 0, 1]);
        let mut claims = Bitmap::new(3, 1);
        let rects = squareify(layer_with(&layers, 1), &mut claims, Occlusion::Exact);
        assert_eq!(rects, vec![Rect::new(2, 0, 2, 0), Rect::new(0, 0, 0, 0)]);
    }

    #[test]
    fn test_claimed_pixels_block_growth() {
        let layers = layers_of(14, 3, 1, vec![1, 1, 1]);
        let mut claims = Bitmap::new(3, 1);
        claims.set(1, 0, true);
        let rects = squareify(&layers[0], &mut claims, Occlusion::Exact);
        assert_eq!(rects, vec![Rect::new(2, 0, 2, 0), Rect::new(0, 0, 0, 0)]);
    }

    #[test]
    fn test_overdraw_spans_lower_layers() {
        // 0 1 0 : layer 0 first (2 px), then layer 1
        let layers = layers_of(14, 3, 1, vec![0, 1, 0]);
        let mut claims = Bitmap::new(3, 1);
        let packed = pack_rectangles(&layers, &mut claims, Occlusion::Overdraw);
        assert_eq!(packed.layers[0].index, 0);
        assert_eq!(packed.layers[0].rects, vec![Rect::new(0, 0, 2, 0)]);
        assert_eq!(packed.layers[1].rects, vec![Rect::new(1, 0, 1, 0)]);
        assert_eq!(packed.total, 2);
    }

    #[test]
    fn test_exact_never_leaves_layer() {
        let layers = layers_of(14, 3, 1, vec![0, 1, 0]);
        let mut claims = Bitmap::new(3, 1);
        let packed = pack_rectangles(&layers, &mut claims, Occlusion::Exact);
        assert_eq!(packed.total, 3);
        for lr in &packed.layers {
            let layer = layer_with(&layers, lr.index);
            for r in &lr.rects {
                assert!(layer.occupancy().region_all(r.x1, r.y1, r.x2, r.y2, |b| b));
            }
        }
    }

    #[test]
    fn test_overdraw_does_not_cross_claims() {
        // 1 1 0 0 : layer 0 and 1 tie, layer 0 goes first and claims x=2..3
        let layers = layers_of(14, 4, 1, vec![1, 1, 0, 0]);
        let mut claims = Bitmap::new(4, 1);
        let packed = pack_rectangles(&layers, &mut claims, Occlusion::Overdraw);
        assert_eq!(packed.layers[0].index, 0);
        assert_eq!(packed.layers[0].rects, vec![Rect::new(0, 0, 3, 0)]);
        assert_eq!(packed.layers[1].rects, vec![Rect::new(0, 0, 1, 0)]);
    }
}
