//! Flat numeric form of packed primitives, as stored in generated programs.
//!
//! Runs reserve two values just past the last column of a scan line:
//!
//! | entry            | pair                       |
//! |------------------|----------------------------|
//! | `Span{s, len}`   | `(s, s + len - 1)`         |
//! | `EndOfScan`      | `(width + 1, width + 1)`   |
//! | `SkipLines(n)`   | `(width + 2, n)`           |
//!
//! For the 80-column modes this gives the familiar 81 and 82 markers.

use serde::Serialize;

use super::rect::Rect;
use super::runs::Run;
use crate::api::PackError;

/// Storage type of a literal array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ElementType {
    Byte,
    Word,
}

impl ElementType {
    /// Smallest type that can hold `max`, or `None` above 16 bits.
    pub fn for_max(max: usize) -> Option<Self> {
        if max <= u8::MAX as usize {
            Some(ElementType::Byte)
        } else if max <= u16::MAX as usize {
            Some(ElementType::Word)
        } else {
            None
        }
    }

    /// Size of one element in bytes.
    #[inline]
    pub fn size_bytes(self) -> usize {
        match self {
            ElementType::Byte => 1,
            ElementType::Word => 2,
        }
    }
}

/// A literal array ready to be written out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Literals {
    pub values: Vec<u16>,
    pub element: ElementType,
}

impl Literals {
    /// Bytes the array occupies on the target machine.
    pub fn byte_len(&self) -> usize {
        self.values.len() * self.element.size_bytes()
    }
}

fn literal(value: usize) -> Result<u16, PackError> {
    u16::try_from(value).map_err(|_| PackError::LiteralOverflow { value })
}

/// Flatten rectangles into `x1, y1, x2, y2` quadruples.
///
/// The element type follows the screen size, not the data, so every layer
/// of one image shares it.
pub fn rect_literals(rects: &[Rect], width: usize, height: usize) -> Result<Literals, PackError> {
    let max = width.max(height).saturating_sub(1);
    let element = ElementType::for_max(max).ok_or(PackError::LiteralOverflow { value: max })?;

    let mut values = Vec::with_capacity(rects.len() * 4);
    for r in rects {
        for v in [r.x1, r.y1, r.x2, r.y2] {
            values.push(literal(v)?);
        }
    }
    Ok(Literals { values, element })
}

/// Flatten runs into pairs using the reserved markers above.
///
/// # Errors
///
/// Returns [`PackError::SentinelOverflow`] if `width + 2` does not fit in
/// 16 bits.
pub fn run_literals(runs: &[Run], width: usize, height: usize) -> Result<Literals, PackError> {
    let end_of_scan = literal(width + 1).map_err(|_| PackError::SentinelOverflow { width })?;
    let skip = literal(width + 2).map_err(|_| PackError::SentinelOverflow { width })?;
    let element = ElementType::for_max((width + 2).max(height))
        .ok_or(PackError::SentinelOverflow { width })?;

    let mut values = Vec::with_capacity(runs.len() * 2);
    for run in runs {
        match *run {
            Run::Span { start, length } => {
                values.push(literal(start)?);
                values.push(literal(start + length.saturating_sub(1))?);
            }
            Run::EndOfScan => {
                values.push(end_of_scan);
                values.push(end_of_scan);
            }
            Run::SkipLines(n) => {
                values.push(skip);
                values.push(literal(n)?);
            }
        }
    }
    Ok(Literals { values, element })
}
