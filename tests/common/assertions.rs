//! Assertion helpers for tests.

use std::path::Path;

use pretty_assertions::assert_eq;

/// Assert a file exists and is a PNG of the given size
pub fn assert_png_file(path: &Path, width: u32, height: u32) {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected PNG at {}: {e}", path.display()));
    assert!(
        bytes.starts_with(&[0x89, b'P', b'N', b'G']),
        "Expected PNG signature in {}, got {:?}",
        path.display(),
        &bytes[..8.min(bytes.len())]
    );
    let image = image::load_from_memory(&bytes).expect("PNG should decode");
    assert_eq!(
        (image.width(), image.height()),
        (width, height),
        "Unexpected size for {}",
        path.display()
    );
}

/// Assert a decoded PNG only uses colors from `palette`
pub fn assert_png_uses_palette(path: &Path, palette: &[[u8; 3]]) {
    let image = image::open(path).expect("PNG should decode").to_rgb8();
    for (x, y, pixel) in image.enumerate_pixels() {
        assert!(
            palette.contains(&pixel.0),
            "Pixel ({x}, {y}) of {} is {:?}, not in the palette",
            path.display(),
            pixel.0
        );
    }
}

/// Assert the generated program has the overall shape of a Mad-Pascal program
pub fn assert_valid_program(source: &str, mode: u8) {
    assert!(
        source.contains("uses crt, fastgraph;"),
        "Missing uses clause:\n{source}"
    );
    assert!(
        source.contains(&format!("InitGraph(16 + {mode});")),
        "Missing InitGraph for mode {mode}:\n{source}"
    );
    assert!(
        source.trim_end().ends_with("end."),
        "Program should end with 'end.':\n{source}"
    );
    assert_eq!(
        source.matches("begin").count(),
        source.matches("end;").count() + 1,
        "Unbalanced begin/end blocks:\n{source}"
    );
}
