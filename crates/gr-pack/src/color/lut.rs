//! Gamma lookup table access
//!
//! Palette entries and input pixels are both 8-bit, so the sRGB transfer
//! function is only ever evaluated at 256 points. build.rs tabulates them.

// Include the generated LUT from build.rs
include!(concat!(env!("OUT_DIR"), "/srgb8_lut.rs"));

/// Convert an 8-bit sRGB channel to linear light (0.0..=1.0).
#[inline]
pub fn srgb8_to_linear(value: u8) -> f64 {
    SRGB8_TO_LINEAR[value as usize]
}
