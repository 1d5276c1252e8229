//! Input pixel data.
//!
//! Decoding and resizing happen outside this crate; the packer receives a
//! [`PixelBuffer`] already sized to the target mode.

mod pixel_buffer;

pub use pixel_buffer::PixelBuffer;
