//! Preview generation across all modes.

mod common;

use atarigr::services::preview_all;
use common::fixtures;
use common::TestWorkspace;
use gr_pack::GraphicsMode;
use pretty_assertions::assert_eq;

#[test]
fn test_preview_all_modes() {
    let ws = TestWorkspace::new();
    let input = ws.save_image("gradient.png", &fixtures::gradient(200, 100));
    let out_dir = ws.path().join("previews");

    let written = preview_all(&input, &out_dir).unwrap();
    assert_eq!(written.len(), GraphicsMode::all().len());

    for mode in GraphicsMode::all() {
        let path = out_dir.join(format!("gr{}.png", mode.id()));
        assert!(written.contains(&path), "missing {}", path.display());
        common::assert_png_file(&path, mode.width() as u32, mode.height() as u32);

        let palette: Vec<[u8; 3]> = mode.colors().iter().map(|c| c.to_bytes()).collect();
        common::assert_png_uses_palette(&path, &palette);
    }
}

#[test]
fn test_preview_rejects_non_image() {
    let ws = TestWorkspace::new();
    let input = ws.path().join("notes.png");
    std::fs::write(&input, b"definitely not a picture").unwrap();

    let err = preview_all(&input, &ws.path().join("out")).unwrap_err();
    assert!(matches!(err, atarigr::error::AppError::ImageLoad(_)));
}
