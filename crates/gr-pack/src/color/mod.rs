//! Color types and conversion utilities
//!
//! - [`Srgb`]: 8-bit gamma-encoded color, used for pixels and palettes.
//! - [`Lab`]: CIELAB, the space nearest-color matching happens in.
//!
//! ```
//! use gr_pack::{lab_distance, Lab, Srgb};
//!
//! let pixel = Lab::from(Srgb::from_u8(120, 120, 120));
//! let grey = Lab::from(Srgb::from_rgb24(0x787878));
//! assert_eq!(lab_distance(grey, pixel), 0.0);
//! ```

mod lab;
mod lut;
mod srgb;

pub use lab::{hue_angle_degrees, lab_distance, rgb_to_lab, Lab};
pub use srgb::Srgb;
