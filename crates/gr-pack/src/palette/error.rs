//! Error type for hex color parsing.

/// Error type for parsing hex color strings.
///
/// Returned when parsing a hex color string fails, either due to
/// invalid length or a character that is not a hex digit.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 characters)")]
    InvalidLength,
    /// A character that is not an ASCII hex digit
    #[error("invalid hex character: {0:?}")]
    InvalidDigit(char),
}
