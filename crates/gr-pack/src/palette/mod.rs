//! Graphics modes and their fixed palettes
//!
//! Each [`GraphicsMode`] pairs a screen resolution with an ordered list of
//! colors. The order is significant: a color's position is the index stored
//! in the [`IndexGrid`](crate::IndexGrid) and the label a layer is drawn
//! with.

mod error;
mod mode;

pub use error::ParseColorError;
pub use mode::GraphicsMode;
