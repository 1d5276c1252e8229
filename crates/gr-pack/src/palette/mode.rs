//! The six Atari 8-bit graphics modes supported by the packer.

use std::sync::OnceLock;

use crate::api::PackError;
use crate::color::{lab_distance, Lab, Srgb};

struct ModeSpec {
    id: u8,
    width: usize,
    height: usize,
    colors: &'static [u32],
}

/// GRAPHICS 8..15 as seen on a PAL machine with the default color registers.
///
/// GRAPHICS 10 reports its first four registers as black; they stay in the
/// palette so that indices line up with the hardware registers.
const MODE_TABLE: [ModeSpec; 6] = [
    ModeSpec {
        id: 8,
        width: 320,
        height: 192,
        colors: &[0x034653, 0x599ba9],
    },
    ModeSpec {
        id: 9,
        width: 80,
        height: 192,
        colors: &[
            0x040404, 0x0f0f0f, 0x1b1b1b, 0x272727, 0x333333, 0x414141, 0x4f4f4f, 0x5e5e5e,
            0x686868, 0x787878, 0x898989, 0x9a9a9a, 0xababab, 0xbfbfbf, 0xd3d3d3, 0xeaeaea,
        ],
    },
    ModeSpec {
        id: 10,
        width: 80,
        height: 192,
        colors: &[
            0x040404, 0x040404, 0x040404, 0x040404, 0x9b5446, 0x74a52f, 0x034653, 0x80306f,
        ],
    },
    ModeSpec {
        id: 11,
        width: 80,
        height: 192,
        colors: &[
            0x040404, 0x77480b, 0x833c2d, 0x84373f, 0x80306f, 0x752f8f, 0x6434a4, 0x3b49a4,
            0x29568f, 0x1e626f, 0x1a6d3f, 0x27710b, 0x396c00, 0x4f6200, 0x655600, 0x77480b,
        ],
    },
    ModeSpec {
        id: 14,
        width: 160,
        height: 192,
        colors: &[0x040404, 0x9b5446],
    },
    ModeSpec {
        id: 15,
        width: 160,
        height: 192,
        colors: &[0x040404, 0x9b5446, 0x74a52f, 0x034653],
    },
];

static CATALOG: OnceLock<Vec<GraphicsMode>> = OnceLock::new();

fn catalog() -> &'static [GraphicsMode] {
    CATALOG.get_or_init(|| {
        MODE_TABLE
            .iter()
            .map(|spec| {
                let colors: Vec<Srgb> = spec.colors.iter().map(|&c| Srgb::from_rgb24(c)).collect();
                GraphicsMode::build(spec.id, spec.width, spec.height, colors)
            })
            .collect()
    })
}

/// A display configuration: resolution plus an ordered palette.
///
/// CIELAB values of the palette are computed once at construction so that
/// quantization only converts the pixel side.
///
/// # Example
///
/// ```
/// use gr_pack::GraphicsMode;
///
/// let mode = GraphicsMode::from_id(15).unwrap();
/// assert_eq!((mode.width(), mode.height()), (160, 192));
/// assert_eq!(mode.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsMode {
    id: u8,
    width: usize,
    height: usize,
    colors: Vec<Srgb>,
    lab: Vec<Lab>,
}

fn check_resolution(width: usize, height: usize) -> Result<(), PackError> {
    if width == 0 || height == 0 {
        return Err(PackError::EmptyResolution { width, height });
    }
    Ok(())
}

impl GraphicsMode {
    fn build(id: u8, width: usize, height: usize, colors: Vec<Srgb>) -> Self {
        let lab = colors.iter().map(|&c| Lab::from(c)).collect();
        Self {
            id,
            width,
            height,
            colors,
            lab,
        }
    }

    /// Create a custom mode.
    ///
    /// Duplicate colors are allowed; the lower index wins when matching.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::EmptyResolution`] if either dimension is zero,
    /// and [`PackError::InvalidPalette`] if `colors` is empty or holds more
    /// than 256 entries (indices are stored as `u8`).
    pub fn new(id: u8, width: usize, height: usize, colors: &[Srgb]) -> Result<Self, PackError> {
        check_resolution(width, height)?;
        if colors.is_empty() || colors.len() > 256 {
            return Err(PackError::InvalidPalette { len: colors.len() });
        }
        Ok(Self::build(id, width, height, colors.to_vec()))
    }

    /// Create a custom mode from hex color strings.
    ///
    /// # Example
    ///
    /// ```
    /// use gr_pack::GraphicsMode;
    ///
    /// let mode = GraphicsMode::from_hex(0, 4, 4, &["#000000", "#ffffff"]).unwrap();
    /// assert_eq!(mode.len(), 2);
    /// ```
    pub fn from_hex(id: u8, width: usize, height: usize, colors: &[&str]) -> Result<Self, PackError> {
        let parsed = colors
            .iter()
            .map(|s| s.parse::<Srgb>())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(id, width, height, &parsed)
    }

    /// Look up one of the built-in modes by its GRAPHICS number.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::InvalidMode`] for anything but 8, 9, 10, 11, 14
    /// or 15.
    pub fn from_id(id: u8) -> Result<&'static GraphicsMode, PackError> {
        catalog()
            .iter()
            .find(|m| m.id == id)
            .ok_or(PackError::InvalidMode(id))
    }

    /// All built-in modes, ordered by id.
    pub fn all() -> &'static [GraphicsMode] {
        catalog()
    }

    /// The same mode at a different resolution.
    ///
    /// Id and palette are kept; useful for previews and small test images.
    ///
    /// # Errors
    ///
    /// Returns [`PackError::EmptyResolution`] if either dimension is zero.
    pub fn with_resolution(&self, width: usize, height: usize) -> Result<GraphicsMode, PackError> {
        check_resolution(width, height)?;
        Ok(Self {
            width,
            height,
            ..self.clone()
        })
    }

    /// GRAPHICS mode number.
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Horizontal resolution in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Vertical resolution in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of palette entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed mode.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Palette color at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn color(&self, idx: usize) -> Srgb {
        self.colors[idx]
    }

    /// The whole palette in index order.
    #[inline]
    pub fn colors(&self) -> &[Srgb] {
        &self.colors
    }

    /// Precomputed CIELAB value of palette entry `idx`.
    #[inline]
    pub fn lab(&self, idx: usize) -> Lab {
        self.lab[idx]
    }

    /// Find the palette entry closest to `pixel` under [`lab_distance`].
    ///
    /// Returns `(index, distance)`. Only a strictly smaller distance
    /// replaces the current best, so the lowest index wins ties.
    pub fn find_nearest(&self, pixel: Lab) -> (u8, f64) {
        let mut best_idx = 0usize;
        let mut best_dist = f64::INFINITY;

        for (i, &entry) in self.lab.iter().enumerate() {
            let dist = lab_distance(entry, pixel);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        (best_idx as u8, best_dist)
    }
}
