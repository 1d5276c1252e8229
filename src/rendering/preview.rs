use std::io::Cursor;
use std::path::{Path, PathBuf};

use gr_pack::{Bitmap, IndexGrid, Layer};

use crate::error::AppError;

/// Smallest PNG bit depth that addresses `colors` palette entries.
fn bit_depth_for(colors: usize) -> (png::BitDepth, u8) {
    match colors {
        0..=2 => (png::BitDepth::One, 1),
        3..=4 => (png::BitDepth::Two, 2),
        5..=16 => (png::BitDepth::Four, 4),
        _ => (png::BitDepth::Eight, 8),
    }
}

/// Encode a quantized image as an indexed PNG carrying the mode's palette.
pub fn encode_grid_png(grid: &IndexGrid) -> Result<Vec<u8>, AppError> {
    let mode = grid.mode();
    let (bit_depth, bits) = bit_depth_for(mode.len());
    let plte: Vec<u8> = mode.colors().iter().flat_map(|c| c.to_bytes()).collect();

    let packed = if bits == 8 {
        grid.indices().to_vec()
    } else {
        pack_nbits(grid.indices(), grid.width() as u32, bits)
    };

    let png_bytes = encode_png(
        grid.width() as u32,
        grid.height() as u32,
        png::ColorType::Indexed,
        bit_depth,
        Some(&plte),
        &packed,
    )?;
    Ok(optimize(png_bytes))
}

/// Encode a layer's occupancy as a 1-bit greyscale mask (white = set).
pub fn encode_mask_png(bitmap: &Bitmap) -> Result<Vec<u8>, AppError> {
    let values: Vec<u8> = bitmap.as_slice().iter().map(|&set| set as u8).collect();
    let packed = pack_nbits(&values, bitmap.width() as u32, 1);

    let png_bytes = encode_png(
        bitmap.width() as u32,
        bitmap.height() as u32,
        png::ColorType::Grayscale,
        png::BitDepth::One,
        None,
        &packed,
    )?;
    Ok(optimize(png_bytes))
}

/// Write the quantized preview to `path`.
pub fn write_grid_png(grid: &IndexGrid, path: &Path) -> Result<(), AppError> {
    let bytes = encode_grid_png(grid)?;
    std::fs::write(path, &bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote preview");
    Ok(())
}

/// Write `layer_<index>.png` for every layer into `dir`, creating it.
pub fn write_layer_masks(layers: &[Layer], dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    std::fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(layers.len());
    for layer in layers {
        let path = dir.join(format!("layer_{}.png", layer.index()));
        std::fs::write(&path, encode_mask_png(layer.occupancy())?)?;
        written.push(path);
    }
    tracing::debug!(dir = %dir.display(), count = written.len(), "Wrote layer masks");
    Ok(written)
}

fn encode_png(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    packed: &[u8],
) -> Result<Vec<u8>, AppError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder
            .write_header()
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(packed)
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Re-compress with oxipng, keeping the original bytes if it fails.
fn optimize(png_bytes: Vec<u8>) -> Vec<u8> {
    oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes)
}

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
fn pack_nbits(indices: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = (width as usize).div_ceil(pixels_per_byte);
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * indices.len() / width.max(1) as usize);

    for row in indices.chunks(width as usize) {
        for chunk in row.chunks(pixels_per_byte) {
            let byte = chunk.iter().enumerate().fold(0u8, |acc, (i, &idx)| {
                acc | ((idx & mask) << ((8 - bits) - i as u8 * bits))
            });
            packed.push(byte);
        }
    }

    packed
}
