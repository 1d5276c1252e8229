//! Unified error type for the gr-pack public API.

use crate::palette::ParseColorError;

/// Unified error type for the gr-pack public API.
///
/// # Example
///
/// ```
/// use gr_pack::{GraphicsMode, PackError};
///
/// fn lookup(id: u8) -> Result<usize, PackError> {
///     Ok(GraphicsMode::from_id(id)?.len())
/// }
///
/// assert_eq!(lookup(9).unwrap(), 16);
/// assert!(matches!(lookup(12), Err(PackError::InvalidMode(12))));
/// ```
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    /// Mode id is not one of the supported GRAPHICS modes
    #[error("unknown graphics mode {0} (supported: 8, 9, 10, 11, 14, 15)")]
    InvalidMode(u8),

    /// Pixel buffer resolution differs from the mode's
    #[error(
        "pixel buffer is {width}x{height} but GRAPHICS {mode} needs {expected_width}x{expected_height}"
    )]
    MalformedBuffer {
        mode: u8,
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },

    /// Pixel data length does not match the declared dimensions
    #[error("pixel data has {actual} elements, expected {expected}")]
    BufferLength { expected: usize, actual: usize },

    /// Palette is empty or too large for `u8` indices
    #[error("palette must hold 1 to 256 colors, got {len}")]
    InvalidPalette { len: usize },

    /// A mode needs at least one row and one column
    #[error("resolution {width}x{height} has no pixels")]
    EmptyResolution { width: usize, height: usize },

    /// Grid holds an index the mode's palette does not have
    #[error("palette index {index} out of range for a {len}-color palette")]
    IndexOutOfPalette { index: u8, len: usize },

    /// Run markers for this width do not fit in a 16-bit literal
    #[error("scan line width {width} leaves no room for run markers")]
    SentinelOverflow { width: usize },

    /// A coordinate does not fit in a 16-bit literal
    #[error("value {value} does not fit in a 16-bit literal")]
    LiteralOverflow { value: usize },

    /// Unrecognized name for an option
    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// Invalid hex color string
    #[error("invalid color: {0}")]
    ParseColor(#[from] ParseColorError),
}
