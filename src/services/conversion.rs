use std::path::{Path, PathBuf};

use gr_pack::pack::{Occlusion, Strategy};
use gr_pack::{quantize, GraphicsMode, PackedImage, Packer, Srgb};
use image::DynamicImage;

use crate::codegen::{self, PascalProgram};
use crate::error::AppError;
use crate::models::AppConfig;
use crate::rendering::{fit_to_mode, open_image, write_grid_png, write_layer_masks};

/// Settings for one conversion, merged from the config file and CLI flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertOptions {
    pub mode: u8,
    pub strategy: Strategy,
    pub occlusion: Occlusion,
    pub keep_background: bool,
    pub out_dir: PathBuf,
    pub program: PathBuf,
    pub json: Option<PathBuf>,
    pub write_layers: bool,
}

impl ConvertOptions {
    /// Options for `mode` with everything else taken from `config`.
    pub fn from_config(config: &AppConfig, mode: u8) -> Self {
        Self {
            mode,
            strategy: config.compression,
            occlusion: config.occlusion,
            keep_background: config.keep_background,
            out_dir: config.out_dir.clone(),
            program: config.program.clone(),
            json: None,
            write_layers: config.write_layers,
        }
    }
}

/// What a conversion produced, for reporting.
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub mode: u8,
    pub strategy: Strategy,
    pub occlusion: Occlusion,
    /// Palette index and color the screen is cleared to.
    pub background: Option<(u8, Srgb)>,
    pub layer_count: usize,
    /// Rectangles, or run entries including terminators.
    pub primitive_count: usize,
    /// Bytes of coordinate data in the generated program.
    pub data_bytes: usize,
    pub delta_sum: f64,
    pub tag: String,
    pub preview: PathBuf,
    pub layer_masks: Vec<PathBuf>,
    pub program: PathBuf,
    pub json: Option<PathBuf>,
}

/// Converts images into Pascal drawing programs plus previews.
pub struct ConversionService {
    options: ConvertOptions,
    packer: Packer,
}

impl ConversionService {
    /// # Errors
    ///
    /// Returns [`AppError::Pack`] if the mode id is not supported.
    pub fn new(options: ConvertOptions) -> Result<Self, AppError> {
        let packer = Packer::for_mode(options.mode)?
            .strategy(options.strategy)
            .occlusion(options.occlusion)
            .elide_background(!options.keep_background);
        Ok(Self { options, packer })
    }

    /// Convert the image file at `path`.
    pub fn convert(&self, path: &Path) -> Result<ConversionReport, AppError> {
        let image = open_image(path)?;
        self.convert_image(&image)
    }

    /// Convert an already decoded image.
    pub fn convert_image(&self, image: &DynamicImage) -> Result<ConversionReport, AppError> {
        let opts = &self.options;
        let mode = self.packer.mode();
        let buffer = fit_to_mode(image, mode)?;
        let packed = self.packer.pack(&buffer)?;
        let program = codegen::generate(&packed)?;

        std::fs::create_dir_all(&opts.out_dir)?;
        let preview = opts.out_dir.join(format!("gr{}.png", mode.id()));
        write_grid_png(&packed.grid, &preview)?;

        let layer_masks = if opts.write_layers {
            write_layer_masks(&packed.layers, &opts.out_dir.join("layers"))?
        } else {
            Vec::new()
        };

        write_file(&opts.program, program.source.as_bytes())?;

        if let Some(json) = &opts.json {
            write_file(json, serde_json::to_string_pretty(&packed)?.as_bytes())?;
        }

        let report = self.report(mode, &packed, program, preview, layer_masks);
        tracing::info!(
            mode = report.mode,
            strategy = %report.strategy,
            occlusion = %report.occlusion,
            layers = report.layer_count,
            primitives = report.primitive_count,
            data_bytes = report.data_bytes,
            program = %report.program.display(),
            "Converted image"
        );
        Ok(report)
    }

    fn report(
        &self,
        mode: &GraphicsMode,
        packed: &PackedImage,
        program: PascalProgram,
        preview: PathBuf,
        layer_masks: Vec<PathBuf>,
    ) -> ConversionReport {
        ConversionReport {
            mode: packed.mode,
            strategy: self.options.strategy,
            occlusion: self.options.occlusion,
            background: packed
                .background
                .map(|idx| (idx, mode.color(idx as usize))),
            layer_count: packed.layers.len(),
            primitive_count: packed.primitives.count(),
            data_bytes: program.data_bytes,
            delta_sum: packed.delta_sum,
            tag: program.tag,
            preview,
            layer_masks,
            program: self.options.program.clone(),
            json: self.options.json.clone(),
        }
    }
}

/// Quantize `path` against every supported mode and write `gr<id>.png`
/// previews into `out_dir`.
pub fn preview_all(path: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let image = open_image(path)?;
    std::fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(GraphicsMode::all().len());
    for mode in GraphicsMode::all() {
        let buffer = fit_to_mode(&image, mode)?;
        let quantized = quantize(&buffer, mode)?;
        let target = out_dir.join(format!("gr{}.png", mode.id()));
        write_grid_png(&quantized.grid, &target)?;
        tracing::info!(
            mode = mode.id(),
            delta_sum = quantized.delta_sum,
            path = %target.display(),
            "Wrote preview"
        );
        written.push(target);
    }
    Ok(written)
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)?;
    Ok(())
}
