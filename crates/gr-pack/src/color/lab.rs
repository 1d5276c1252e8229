//! CIELAB conversion and the CIEDE2000 color difference.
//!
//! Nearest-color decisions against the tiny fixed palettes are made here, so
//! every constant below is load-bearing. Palette indices chosen by
//! [`lab_distance`] (including how ties break between near-identical
//! greys) change if the arithmetic changes.

use serde::{Deserialize, Serialize};

use super::lut::srgb8_to_linear;
use super::srgb::Srgb;

/// D65 reference white, 2° observer, scaled to Y = 100.
const WHITE_X: f64 = 95.047;
const WHITE_Y: f64 = 100.0;
const WHITE_Z: f64 = 108.883;

/// CIE epsilon for the cube-root segment of f(t).
const LAB_EPSILON: f64 = 0.008856;

/// Slope of the linear segment of f(t).
const LAB_KAPPA_SLOPE: f64 = 7.787;

/// 25^7, the chroma pivot of the G and R_C terms.
const POW25_7: f64 = 6_103_515_625.0;

/// A color in CIELAB space (L* in 0..=100, a*/b* unbounded).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Lab {
    /// Lightness
    pub l: f64,
    /// Green (negative) to red (positive) axis
    pub a: f64,
    /// Blue (negative) to yellow (positive) axis
    pub b: f64,
}

impl Lab {
    /// Create a new Lab color.
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Chroma, the distance from the neutral axis.
    #[inline]
    pub fn chroma(self) -> f64 {
        (self.a * self.a + self.b * self.b).sqrt()
    }
}

impl From<Srgb> for Lab {
    fn from(color: Srgb) -> Self {
        rgb_to_lab(color)
    }
}

fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.powf(1.0 / 3.0)
    } else {
        LAB_KAPPA_SLOPE * t + 16.0 / 116.0
    }
}

/// Convert an 8-bit sRGB color to CIELAB (D65).
///
/// # Example
/// ```
/// use gr_pack::{rgb_to_lab, Srgb};
///
/// let lab = rgb_to_lab(Srgb::from_rgb24(0x034653));
/// assert!((lab.l - 26.8036).abs() < 1e-4);
/// ```
pub fn rgb_to_lab(color: Srgb) -> Lab {
    let r = srgb8_to_linear(color.r) * 100.0;
    let g = srgb8_to_linear(color.g) * 100.0;
    let b = srgb8_to_linear(color.b) * 100.0;

    let x = r * 0.4124 + g * 0.3576 + b * 0.1805;
    let y = r * 0.2126 + g * 0.7152 + b * 0.0722;
    let z = r * 0.0193 + g * 0.1192 + b * 0.9505;

    let fx = lab_f(x / WHITE_X);
    let fy = lab_f(y / WHITE_Y);
    let fz = lab_f(z / WHITE_Z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Hue angle in degrees of the (a, b) chromaticity.
///
/// Quadrants are resolved from the sign of `a` first:
///
/// - `a > 0`: `atan(b/a)`
/// - `a < 0, b >= 0`: `atan(b/a) + 360`
/// - `a < 0, b < 0`: `atan(b/a) + 180`
/// - `a == 0`: `180`, whatever the sign of `b`
///
/// Note that this is not `atan2`: the second and fourth quadrants land on
/// different angles than the textbook CIEDE2000 hue. Palette decisions of
/// existing conversions depend on these exact values.
pub fn hue_angle_degrees(a: f64, b: f64) -> f64 {
    if a > 0.0 {
        (b / a).atan().to_degrees()
    } else if a < 0.0 && b >= 0.0 {
        360.0 + (b / a).atan().to_degrees()
    } else if a < 0.0 && b < 0.0 {
        180.0 + (b / a).atan().to_degrees()
    } else {
        180.0
    }
}

/// Round to 12 decimal places, used before comparing hue differences
/// against ±180° so that float noise does not flip the branch.
#[inline]
fn round12(x: f64) -> f64 {
    (x * 1e12).round() / 1e12
}

/// sqrt(C^7 / (C^7 + 25^7))
#[inline]
fn chroma_pivot(c: f64) -> f64 {
    let c7 = c.powi(7);
    (c7 / (c7 + POW25_7)).sqrt()
}

/// CIEDE2000 color difference with unity weights (kL = kC = kH = 1).
///
/// `reference` is the palette entry, `sample` the pixel being matched. The
/// formula is symmetric up to float rounding, but the argument order is kept
/// fixed so tie-breaks stay reproducible.
///
/// # Example
/// ```
/// use gr_pack::{lab_distance, Lab};
///
/// let a = Lab::new(50.0, 2.5, 0.0);
/// let b = Lab::new(50.0, 3.2972, 0.0);
/// assert!((lab_distance(a, b) - 1.0).abs() < 1e-4);
/// assert_eq!(lab_distance(a, a), 0.0);
/// ```
pub fn lab_distance(reference: Lab, sample: Lab) -> f64 {
    // a' adjustment
    let c_bar = (reference.chroma() + sample.chroma()) / 2.0;
    let g = 0.5 * (1.0 - chroma_pivot(c_bar));

    let a1 = (1.0 + g) * reference.a;
    let a2 = (1.0 + g) * sample.a;
    let c1 = (a1 * a1 + reference.b * reference.b).sqrt();
    let c2 = (a2 * a2 + sample.b * sample.b).sqrt();
    let h1 = hue_angle_degrees(a1, reference.b);
    let h2 = hue_angle_degrees(a2, sample.b);

    let delta_l = sample.l - reference.l;
    let delta_c = c2 - c1;

    let chroma_product = c1 * c2;
    let delta_h_deg = if chroma_product == 0.0 {
        0.0
    } else {
        let diff = h2 - h1;
        let rounded = round12(diff);
        if rounded.abs() <= 180.0 {
            diff
        } else if rounded > 180.0 {
            diff - 360.0
        } else {
            diff + 360.0
        }
    };
    let delta_h = 2.0 * chroma_product.sqrt() * (delta_h_deg / 2.0).to_radians().sin();

    let l_bar = (reference.l + sample.l) / 2.0;
    let c_bar_prime = (c1 + c2) / 2.0;
    let h_bar = if chroma_product == 0.0 {
        // Neither half-sum nor wrap correction applies here.
        h1 + h2
    } else {
        let sum = h1 + h2;
        if round12(h1 - h2).abs() > 180.0 {
            if sum < 360.0 {
                (sum + 360.0) / 2.0
            } else {
                (sum - 360.0) / 2.0
            }
        } else {
            sum / 2.0
        }
    };

    let t = 1.0 - 0.17 * (h_bar - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_bar).to_radians().cos()
        + 0.32 * (3.0 * h_bar + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_bar - 63.0).to_radians().cos();

    let rotation = 30.0 * (-((h_bar - 275.0) / 25.0).powi(2)).exp();
    let r_c = 2.0 * chroma_pivot(c_bar_prime);

    let l50 = (l_bar - 50.0) * (l_bar - 50.0);
    let s_l = 1.0 + (0.015 * l50) / (20.0 + l50).sqrt();
    let s_c = 1.0 + 0.045 * c_bar_prime;
    let s_h = 1.0 + 0.015 * c_bar_prime * t;
    let r_t = -(2.0 * rotation).to_radians().sin() * r_c;

    let dl = delta_l / s_l;
    let dc = delta_c / s_c;
    let dh = delta_h / s_h;

    // |R_T| <= 2 keeps the radicand non-negative; clamp away rounding noise.
    (dl * dl + dc * dc + dh * dh + r_t * dc * dh).max(0.0).sqrt()
}
