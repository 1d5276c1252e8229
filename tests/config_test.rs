//! Config file handling as seen from the conversion service.

mod common;

use atarigr::models::AppConfig;
use atarigr::services::ConvertOptions;
use common::fixtures::{self, colors};
use common::TestWorkspace;
use gr_pack::pack::{Occlusion, Strategy};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

#[test]
fn test_config_file_drives_options() {
    let ws = TestWorkspace::new();
    let path = ws.write_config(fixtures::SAMPLE_CONFIG);

    let config = AppConfig::load(Some(&path));
    assert_eq!(config.default_mode, Some(14));

    let options = ConvertOptions::from_config(&config, 14);
    assert_eq!(options.strategy, Strategy::Hline);
    assert_eq!(options.occlusion, Occlusion::Overdraw);
    assert_eq!(options.out_dir, PathBuf::from("previews"));
    assert_eq!(options.program, PathBuf::from("build/picture.pas"));
    assert!(options.write_layers);
    assert!(!options.keep_background);
}

#[test]
fn test_invalid_config_falls_back_to_defaults() {
    let ws = TestWorkspace::new();
    let path = ws.write_config("compression: [rect, hline]\n");

    assert!(AppConfig::from_file(&path).is_err());
    assert_eq!(AppConfig::load(Some(&path)), AppConfig::default());
}

#[test]
fn test_configured_strategy_reaches_program() {
    let ws = TestWorkspace::new();
    let path = ws.write_config("compression: hline\n");
    let config = AppConfig::load(Some(&path));

    let options = ConvertOptions {
        out_dir: ws.path().join("out"),
        program: ws.path().join("nested/dir/image.pas"),
        ..ConvertOptions::from_config(&config, 14)
    };
    let image = fixtures::framed_box(160, 192, colors::GR14_BLACK, colors::GR14_BROWN);
    let report = ws.convert(&image, options).unwrap();

    let source = ws.read_program(&report);
    assert!(source.contains("procedure DrawRuns(count: word; color: byte);"));
    assert!(!source.contains("FillBox"));
}
