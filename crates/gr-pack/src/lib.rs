//! gr-pack: palette quantization and primitive packing for Atari 8-bit
//! graphics modes
//!
//! This library turns an image that has already been resized to one of the
//! GRAPHICS 8–15 resolutions into draw-ordered primitives: filled
//! rectangles or horizontal line spans, one list per palette color.
//!
//! # Quick Start
//!
//! ```
//! use gr_pack::{Packer, PixelBuffer, Srgb};
//!
//! let packer = Packer::for_mode(9).unwrap().elide_background(false);
//! let buffer = PixelBuffer::filled(Srgb::from_u8(0, 0, 0), 80, 192);
//!
//! let packed = packer.pack(&buffer).unwrap();
//! assert_eq!(packed.layers.len(), 1);
//! assert_eq!(packed.primitives.count(), 1);
//! ```
//!
//! # Pipeline
//!
//! 1. [`quantize`]: every pixel goes to the palette entry with the smallest
//!    CIEDE2000 difference ([`lab_distance`]), lowest index on ties.
//! 2. [`layerize`]: one [`Layer`] per color present, most populous first.
//!    This is the draw order.
//! 3. [`pack::pack_rectangles`] or [`pack::encode_runs`]: each layer is
//!    compressed around the pixels claimed by layers drawn before it.
//!
//! Optionally the first layer is not packed at all and becomes the color
//! the screen is cleared to ([`Packer::elide_background`]).
//!
//! # Color Science
//!
//! Matching happens in CIELAB (D65) rather than RGB. The palettes are tiny
//! and dark; Euclidean RGB distance sends most mid-tones to whichever entry
//! happens to be brightest. CIEDE2000 weights lightness, chroma and hue
//! separately and keeps near-neutral pixels on the grey ramp of
//! GRAPHICS 9.
//!
//! The hue angle follows the convention documented on
//! [`hue_angle_degrees`], which differs from `atan2` in two quadrants.
//! Existing conversions were made with it, and changing it moves palette
//! decisions for strongly green and purple pixels.

mod api;
mod color;
mod input;
mod layer;
mod output;
pub mod pack;
mod palette;
mod quantize;

pub use api::{PackError, PackedImage, Packer, Primitives};
pub use color::{hue_angle_degrees, lab_distance, rgb_to_lab, Lab, Srgb};
pub use input::PixelBuffer;
pub use layer::{layerize, Bitmap, Layer};
pub use output::IndexGrid;
pub use palette::{GraphicsMode, ParseColorError};
pub use quantize::{quantize, Quantized};
