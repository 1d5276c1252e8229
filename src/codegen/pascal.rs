use std::fmt;

use gr_pack::pack::{rect_literals, run_literals, ElementType, Literals};
use gr_pack::{IndexGrid, PackedImage, Primitives};
use sha2::{Digest, Sha256};

use crate::error::AppError;

/// Values per line inside a constant array.
const VALUES_PER_LINE: usize = 16;

/// A generated Mad-Pascal program and the numbers reported alongside it.
#[derive(Debug, Clone, PartialEq)]
pub struct PascalProgram {
    /// Program text.
    pub source: String,
    /// Identifier fragment shared by all data arrays.
    pub tag: String,
    /// Bytes of raw coordinate data in the constant arrays.
    pub data_bytes: usize,
}

/// Short identifier derived from the quantized image.
///
/// First 8 hex digits of SHA-256 over the mode id and the index grid.
pub fn program_tag(grid: &IndexGrid) -> String {
    let mut hasher = Sha256::new();
    hasher.update([grid.mode().id()]);
    hasher.update(b"|");
    hasher.update(grid.indices());
    let result = hasher.finalize();
    hex::encode(&result[..4])
}

/// One `data_<tag>_<index>` constant.
struct DataArray {
    index: u8,
    /// Number of primitives or run entries the array holds.
    entries: usize,
    literals: Literals,
}

impl DataArray {
    fn name(&self, tag: &str) -> String {
        format!("data_{tag}_{}", self.index)
    }
}

/// Render `packed` as a Pascal program for the `crt` and `fastgraph` units.
///
/// Layers with nothing to draw get no array and no drawing code.
///
/// # Errors
///
/// Returns [`AppError::Pack`] if a coordinate cannot be stored in a 16-bit
/// literal.
pub fn generate(packed: &PackedImage) -> Result<PascalProgram, AppError> {
    let grid = &packed.grid;
    let (width, height) = (grid.width(), grid.height());
    let tag = program_tag(grid);

    let (arrays, kind) = match &packed.primitives {
        Primitives::Rect(rects) => {
            let mut arrays = Vec::new();
            for layer in rects.layers.iter().filter(|l| !l.rects.is_empty()) {
                arrays.push(DataArray {
                    index: layer.index,
                    entries: layer.rects.len(),
                    literals: rect_literals(&layer.rects, width, height)?,
                });
            }
            (arrays, Kind::Rect)
        }
        Primitives::Hline(runs) => {
            let mut arrays = Vec::new();
            for layer in runs.layers.iter().filter(|l| l.span_count() > 0) {
                arrays.push(DataArray {
                    index: layer.index,
                    entries: layer.runs.len(),
                    literals: run_literals(&layer.runs, width, height)?,
                });
            }
            (arrays, Kind::Hline)
        }
    };

    let data_bytes = arrays.iter().map(|a| a.literals.byte_len()).sum();
    let source = Source {
        tag: &tag,
        mode: packed.mode,
        width,
        height,
        background: packed.background,
        kind,
        arrays: &arrays,
    }
    .to_string();

    tracing::debug!(
        tag = %tag,
        arrays = arrays.len(),
        data_bytes,
        "Generated Pascal program"
    );

    Ok(PascalProgram {
        source,
        tag,
        data_bytes,
    })
}

#[derive(Clone, Copy)]
enum Kind {
    Rect,
    Hline,
}

struct Source<'a> {
    tag: &'a str,
    mode: u8,
    width: usize,
    height: usize,
    background: Option<u8>,
    kind: Kind,
    arrays: &'a [DataArray],
}

fn type_name(element: ElementType) -> &'static str {
    match element {
        ElementType::Byte => "byte",
        ElementType::Word => "word",
    }
}

impl Source<'_> {
    /// Element type shared by every array, taken from the screen size.
    fn element(&self) -> ElementType {
        self.arrays
            .first()
            .map(|a| a.literals.element)
            .unwrap_or(ElementType::Byte)
    }

    fn write_constants(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Kind::Hline = self.kind {
            writeln!(f, "\tEOL = {};", self.width + 1)?;
            writeln!(f, "\tSKIP = {};", self.width + 2)?;
        }
        for array in self.arrays {
            let values = &array.literals.values;
            writeln!(
                f,
                "\t{}: array [0..{}] of {} = (",
                array.name(self.tag),
                values.len() - 1,
                type_name(array.literals.element)
            )?;
            let lines: Vec<String> = values
                .chunks(VALUES_PER_LINE)
                .map(|chunk| {
                    chunk
                        .iter()
                        .map(u16::to_string)
                        .collect::<Vec<_>>()
                        .join(",")
                })
                .collect();
            writeln!(f, "\t\t{}", lines.join(",\n\t\t"))?;
            writeln!(f, "\t);")?;
        }
        Ok(())
    }

    fn write_rect_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "procedure FillBox(x1, y1, x2, y2: word);")?;
        writeln!(f, "var")?;
        writeln!(f, "\ty: word;")?;
        writeln!(f, "begin")?;
        writeln!(f, "\tfor y := y1 to y2 do")?;
        writeln!(f, "\t\tHLine(x1, x2, y);")?;
        writeln!(f, "end;")?;
        writeln!(f)?;
        writeln!(f, "var")?;
        writeln!(f, "\ti: word;")?;
        writeln!(f)?;
        writeln!(f, "begin")?;
        writeln!(f, "\tInitGraph(16 + {});", self.mode)?;
        if let Some(bg) = self.background {
            writeln!(f, "\tSetColor({bg});")?;
            writeln!(
                f,
                "\tFillBox(0, 0, {}, {});",
                self.width - 1,
                self.height - 1
            )?;
        }
        for array in self.arrays {
            let name = array.name(self.tag);
            writeln!(f, "\tSetColor({});", array.index)?;
            writeln!(f, "\tfor i := 0 to {} do", array.entries - 1)?;
            writeln!(
                f,
                "\t\tFillBox({name}[i*4], {name}[i*4+1], {name}[i*4+2], {name}[i*4+3]);"
            )?;
        }
        Ok(())
    }

    fn write_hline_body(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "var")?;
        writeln!(f, "\tptr: ^{};", type_name(self.element()))?;
        writeln!(f, "\ty: word;")?;
        writeln!(f)?;
        writeln!(f, "procedure DrawRuns(count: word; color: byte);")?;
        writeln!(f, "var")?;
        writeln!(f, "\ti, row: word;")?;
        writeln!(f, "begin")?;
        writeln!(f, "\tSetColor(color);")?;
        writeln!(f, "\trow := 0;")?;
        writeln!(f, "\tfor i := 0 to count - 1 do")?;
        writeln!(f, "\tbegin")?;
        writeln!(f, "\t\tif ptr[i*2] = EOL then")?;
        writeln!(f, "\t\t\tInc(row)")?;
        writeln!(f, "\t\telse if ptr[i*2] = SKIP then")?;
        writeln!(f, "\t\t\tInc(row, ptr[i*2+1])")?;
        writeln!(f, "\t\telse")?;
        writeln!(f, "\t\t\tHLine(ptr[i*2], ptr[i*2+1], row);")?;
        writeln!(f, "\tend;")?;
        writeln!(f, "end;")?;
        writeln!(f)?;
        writeln!(f, "begin")?;
        writeln!(f, "\tInitGraph(16 + {});", self.mode)?;
        if let Some(bg) = self.background {
            writeln!(f, "\tSetColor({bg});")?;
            writeln!(f, "\tfor y := 0 to {} do", self.height - 1)?;
            writeln!(f, "\t\tHLine(0, {}, y);", self.width - 1)?;
        }
        for array in self.arrays {
            writeln!(f, "\tptr := @{};", array.name(self.tag))?;
            writeln!(f, "\tDrawRuns({}, {});", array.entries, array.index)?;
        }
        Ok(())
    }
}

impl fmt::Display for Source<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "program image_{};", self.tag)?;
        writeln!(f)?;
        writeln!(f, "uses crt, fastgraph;")?;
        writeln!(f)?;
        let has_constants = !self.arrays.is_empty() || matches!(self.kind, Kind::Hline);
        if has_constants {
            writeln!(f, "const")?;
            self.write_constants(f)?;
            writeln!(f)?;
        }
        match self.kind {
            Kind::Rect => self.write_rect_body(f)?,
            Kind::Hline => self.write_hline_body(f)?,
        }
        writeln!(f, "\trepeat until false;")?;
        writeln!(f, "end.")
    }
}
