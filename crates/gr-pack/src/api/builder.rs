//! Packer builder -- the primary entry point of the crate.
//!
//! [`Packer`] runs the whole pipeline: quantize, layerize, then compress
//! the layers with the selected [`Strategy`].

use serde::Serialize;

use super::PackError;
use crate::input::PixelBuffer;
use crate::layer::{layerize, Bitmap, Layer};
use crate::output::IndexGrid;
use crate::pack::{
    encode_runs, pack_rectangles, Occlusion, PackedRects, PackedRuns, SkipCoalescing, Strategy,
};
use crate::palette::GraphicsMode;
use crate::quantize::{quantize, Quantized};

/// Packed primitives, one variant per [`Strategy`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum Primitives {
    Rect(PackedRects),
    Hline(PackedRuns),
}

impl Primitives {
    /// Rectangles, or run entries including terminators.
    pub fn count(&self) -> usize {
        match self {
            Primitives::Rect(r) => r.total,
            Primitives::Hline(r) => r.total_entries,
        }
    }
}

/// Everything [`Packer::pack`] produces for one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackedImage {
    /// GRAPHICS mode number.
    pub mode: u8,
    /// Quantized image, for previews.
    #[serde(skip)]
    pub grid: IndexGrid,
    /// Sum of per-pixel quantization distances.
    pub delta_sum: f64,
    /// All layers in draw order, including the background if elided.
    pub layers: Vec<Layer>,
    /// Palette index the screen is cleared to before drawing, if elided.
    pub background: Option<u8>,
    /// Primitives for every layer after the background.
    pub primitives: Primitives,
}

/// High-level packing builder.
///
/// - Constructor requires a [`GraphicsMode`] (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`pack()`](Self::pack) takes `&self` so the builder is reusable
///
/// Defaults: rectangles, [`Occlusion::Exact`], background elided, skip
/// coalescing decided by the mode's width.
///
/// # Example
///
/// ```
/// use gr_pack::{Packer, PixelBuffer, Primitives, Srgb};
/// use gr_pack::pack::Strategy;
///
/// let packer = Packer::for_mode(15).unwrap().strategy(Strategy::Hline);
/// let buffer = PixelBuffer::filled(Srgb::from_u8(0, 0, 0), 160, 192);
///
/// let packed = packer.pack(&buffer).unwrap();
/// assert_eq!(packed.background, Some(0));
/// assert!(matches!(packed.primitives, Primitives::Hline(ref r) if r.layers.is_empty()));
/// ```
#[derive(Debug, Clone)]
pub struct Packer {
    mode: GraphicsMode,
    strategy: Strategy,
    occlusion: Occlusion,
    elide_background: bool,
    coalescing: Option<SkipCoalescing>,
}

impl Packer {
    /// Create a packer for `mode`.
    pub fn new(mode: GraphicsMode) -> Self {
        Self {
            mode,
            strategy: Strategy::default(),
            occlusion: Occlusion::default(),
            elide_background: true,
            coalescing: None,
        }
    }

    /// Create a packer for one of the built-in modes.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::InvalidMode`] for an unknown id.
    pub fn for_mode(id: u8) -> Result<Self, PackError> {
        Ok(Self::new(GraphicsMode::from_id(id)?.clone()))
    }

    /// Set the compression strategy.
    #[inline]
    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the occlusion policy shared by both strategies.
    #[inline]
    pub fn occlusion(mut self, occlusion: Occlusion) -> Self {
        self.occlusion = occlusion;
        self
    }

    /// Draw the most populous layer as a full-screen clear instead of
    /// packing it.
    #[inline]
    pub fn elide_background(mut self, enabled: bool) -> Self {
        self.elide_background = enabled;
        self
    }

    /// Override the skip coalescing policy derived from the mode width.
    #[inline]
    pub fn skip_coalescing(mut self, coalescing: SkipCoalescing) -> Self {
        self.coalescing = Some(coalescing);
        self
    }

    /// The mode this packer quantizes against.
    #[inline]
    pub fn mode(&self) -> &GraphicsMode {
        &self.mode
    }

    /// Quantize and pack `buffer`.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::MalformedBuffer`] if the buffer's resolution
    /// differs from the mode's.
    pub fn pack(&self, buffer: &PixelBuffer) -> Result<PackedImage, PackError> {
        let Quantized { grid, delta_sum } = quantize(buffer, &self.mode)?;
        let layers = layerize(&grid);

        let mut claims = Bitmap::new(grid.width(), grid.height());
        let (background, drawn): (Option<u8>, &[Layer]) = match layers.split_first() {
            Some((bg, rest)) if self.elide_background => {
                claims.union_with(bg.occupancy());
                (Some(bg.index()), rest)
            }
            _ => (None, layers.as_slice()),
        };

        let primitives = match self.strategy {
            Strategy::Rect => Primitives::Rect(pack_rectangles(drawn, &mut claims, self.occlusion)),
            Strategy::Hline => {
                let coalescing = self
                    .coalescing
                    .unwrap_or_else(|| SkipCoalescing::for_width(self.mode.width()));
                Primitives::Hline(encode_runs(drawn, &mut claims, self.occlusion, coalescing))
            }
        };

        tracing::debug!(
            mode = self.mode.id(),
            strategy = %self.strategy,
            occlusion = %self.occlusion,
            background = ?background,
            primitives = primitives.count(),
            "packed image"
        );

        Ok(PackedImage {
            mode: self.mode.id(),
            grid,
            delta_sum,
            layers,
            background,
            primitives,
        })
    }
}
