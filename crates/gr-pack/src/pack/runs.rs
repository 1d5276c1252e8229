//! Horizontal run-length encoding of layers.
//!
//! Each layer becomes a flat list of [`Run`]s that a renderer walks with a
//! single cursor: spans draw on the current scan line, terminators move the
//! cursor down. Empty scan lines cost one entry, or less when
//! [`SkipCoalescing`] folds consecutive ones together.

use serde::Serialize;

use super::Occlusion;
use crate::layer::{Bitmap, Layer};

/// Scan line width of GRAPHICS 9, 10 and 11.
const COALESCING_WIDTH: usize = 80;

/// One entry of a run list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Run {
    /// `length` pixels starting at column `start` on the current scan line.
    Span { start: usize, length: usize },
    /// Advance to the next scan line.
    EndOfScan,
    /// Advance by `n` scan lines.
    SkipLines(usize),
}

/// Whether an empty scan line may be folded into the previous terminator.
///
/// With coalescing on, an empty line that follows a terminator turns
/// `EndOfScan` into `SkipLines(2)` and `SkipLines(n)` into
/// `SkipLines(n + 1)`. The 80-column modes have always been encoded this
/// way; wider modes write one `EndOfScan` per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipCoalescing {
    Enabled,
    Disabled,
}

impl SkipCoalescing {
    /// Coalescing policy for a scan line width.
    pub fn for_width(width: usize) -> Self {
        if width == COALESCING_WIDTH {
            SkipCoalescing::Enabled
        } else {
            SkipCoalescing::Disabled
        }
    }

    /// Terminate a scan line without spans.
    fn terminate_empty(self, runs: &mut Vec<Run>) {
        if self == SkipCoalescing::Enabled {
            match runs.last_mut() {
                Some(last) if *last == Run::EndOfScan => {
                    *last = Run::SkipLines(2);
                    return;
                }
                Some(Run::SkipLines(n)) => {
                    *n += 1;
                    return;
                }
                _ => {}
            }
        }
        runs.push(Run::EndOfScan);
    }
}

/// Runs of one layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerRuns {
    /// Palette index the spans are drawn with.
    pub index: u8,
    pub runs: Vec<Run>,
}

impl LayerRuns {
    /// Number of [`Run::Span`] entries.
    pub fn span_count(&self) -> usize {
        self.runs
            .iter()
            .filter(|r| matches!(r, Run::Span { .. }))
            .count()
    }
}

/// Output of [`encode_runs`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PackedRuns {
    /// One entry per encoded layer, in draw order.
    pub layers: Vec<LayerRuns>,
    /// Number of run entries over all layers, terminators included.
    pub total_entries: usize,
}

fn encode_layer(
    layer: &Layer,
    claims: &Bitmap,
    occlusion: Occlusion,
    coalescing: SkipCoalescing,
) -> Vec<Run> {
    let occupancy = layer.occupancy();
    let (width, height) = (occupancy.width(), occupancy.height());
    let mut runs = Vec::new();

    for y in 0..height {
        let mut start: Option<usize> = None;
        let mut row_has_span = false;

        for x in 0..width {
            let own = occupancy.get(x, y);
            let claimed = claims.get(x, y);
            let extends = if start.is_some() {
                occlusion.is_open(own, claimed)
            } else {
                own && !claimed
            };

            if extends {
                start.get_or_insert(x);
            } else if let Some(s) = start.take() {
                runs.push(Run::Span {
                    start: s,
                    length: x - s,
                });
                row_has_span = true;
            }
        }

        if let Some(s) = start {
            runs.push(Run::Span {
                start: s,
                length: width - s,
            });
            row_has_span = true;
        }

        if row_has_span {
            runs.push(Run::EndOfScan);
        } else {
            coalescing.terminate_empty(&mut runs);
        }
    }

    runs
}

/// Encode `layers` in draw order, sharing `claims`.
///
/// A span grows over consecutive unclaimed pixels of its layer. Under
/// [`Occlusion::Overdraw`] a started span also continues across unclaimed
/// pixels of other layers. After a layer is encoded its pixels are claimed.
///
/// # Example
///
/// ```
/// use gr_pack::pack::{encode_runs, Occlusion, Run, SkipCoalescing};
/// use gr_pack::{layerize, Bitmap, GraphicsMode, IndexGrid};
///
/// let mode = GraphicsMode::from_id(14).unwrap().with_resolution(4, 1).unwrap();
/// let layers = layerize(&IndexGrid::new(vec![0, 1, 1, 0], mode).unwrap());
/// let mut claims = Bitmap::new(4, 1);
///
/// let packed = encode_runs(&layers, &mut claims, Occlusion::Exact, SkipCoalescing::Disabled);
/// assert_eq!(
///     packed.layers[0].runs,
///     vec![Run::Span { start: 0, length: 1 }, Run::Span { start: 3, length: 1 }, Run::EndOfScan]
/// );
/// ```
pub fn encode_runs(
    layers: &[Layer],
    claims: &mut Bitmap,
    occlusion: Occlusion,
    coalescing: SkipCoalescing,
) -> PackedRuns {
    let mut out = Vec::with_capacity(layers.len());
    let mut total_entries = 0;

    for layer in layers {
        let runs = encode_layer(layer, claims, occlusion, coalescing);
        claims.union_with(layer.occupancy());

        let encoded = LayerRuns {
            index: layer.index(),
            runs,
        };
        tracing::debug!(
            index = layer.index(),
            pixels = layer.pixel_count(),
            spans = encoded.span_count(),
            entries = encoded.runs.len(),
            "encoded layer into runs"
        );
        total_entries += encoded.runs.len();
        out.push(encoded);
    }

    PackedRuns {
        layers: out,
        total_entries,
    }
}

/// Paint a run list onto an empty bitmap, the way a renderer would.
///
/// Spans on lines past `height` are ignored and spans are clipped at `width`.
pub fn replay_runs(runs: &[Run], width: usize, height: usize) -> Bitmap {
    let mut canvas = Bitmap::new(width, height);
    let mut y = 0;

    for run in runs {
        match *run {
            Run::Span { start, length } => {
                let end = start.saturating_add(length).min(width);
                if y < height && start < end {
                    canvas.fill_region(start, y, end - 1, y, true);
                }
            }
            Run::EndOfScan => y += 1,
            Run::SkipLines(n) => y += n,
        }
    }

    canvas
}
