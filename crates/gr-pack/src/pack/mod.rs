//! Compression of layers into drawing primitives.
//!
//! Two strategies share one occlusion model:
//!
//! - [`rect`]: greedy rectangle growth per layer ([`squareify`]).
//! - [`runs`]: horizontal run-length spans per layer ([`encode_runs`]).
//!
//! Layers are processed in draw order. Pixels committed by a layer are
//! marked in a claim overlay (a [`Bitmap`](crate::Bitmap)) that every later
//! layer must route around, so replaying the primitives in the same order
//! paints each pixel with its quantized color.

mod literals;
pub mod rect;
pub mod runs;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::PackError;

pub use literals::{rect_literals, run_literals, ElementType, Literals};
pub use rect::{pack_rectangles, squareify, LayerRects, PackedRects, Rect};
pub use runs::{encode_runs, replay_runs, LayerRuns, PackedRuns, Run, SkipCoalescing};

/// Which primitive the layers are compressed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Filled rectangles
    #[default]
    Rect,
    /// Horizontal line spans
    Hline,
}

/// How far a primitive may reach beyond its own layer's pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occlusion {
    /// Primitives cover only pixels of their own layer.
    #[default]
    Exact,
    /// Primitives may also cover unclaimed pixels of layers drawn later,
    /// which repaint them. Fewer, larger primitives; same final image.
    Overdraw,
}

impl Occlusion {
    /// Whether `claimed`/`own` describe a cell a primitive may cover.
    ///
    /// `own` is whether the cell still belongs to the current layer's
    /// uncovered pixels; `claimed` whether an earlier layer owns it.
    #[inline]
    pub(crate) fn is_open(self, own: bool, claimed: bool) -> bool {
        match self {
            Occlusion::Exact => own && !claimed,
            Occlusion::Overdraw => !claimed,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Rect => write!(f, "rect"),
            Strategy::Hline => write!(f, "hline"),
        }
    }
}

impl FromStr for Strategy {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rect" => Ok(Strategy::Rect),
            "hline" => Ok(Strategy::Hline),
            _ => Err(PackError::UnknownVariant {
                kind: "compression",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Occlusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occlusion::Exact => write!(f, "exact"),
            Occlusion::Overdraw => write!(f, "overdraw"),
        }
    }
}

impl FromStr for Occlusion {
    type Err = PackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Occlusion::Exact),
            "overdraw" => Ok(Occlusion::Overdraw),
            _ => Err(PackError::UnknownVariant {
                kind: "occlusion",
                value: s.to_string(),
            }),
        }
    }
}
