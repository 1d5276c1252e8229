//! Output of the quantizer.
//!
//! [`IndexGrid`] holds one palette index per pixel together with the mode
//! it was quantized against, so previews can be rendered without carrying
//! the palette separately.

mod index_grid;

pub use index_grid::IndexGrid;
