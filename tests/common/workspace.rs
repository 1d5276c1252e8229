//! Temporary working directory with input images and conversion helpers.

use std::path::{Path, PathBuf};

use atarigr::error::AppError;
use atarigr::models::AppConfig;
use atarigr::services::{ConversionReport, ConversionService, ConvertOptions};
use image::DynamicImage;
use tempfile::TempDir;

/// A scratch directory that is removed when dropped
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Save `image` as a PNG in the workspace and return its path
    pub fn save_image(&self, name: &str, image: &DynamicImage) -> PathBuf {
        let path = self.path().join(name);
        image.save(&path).expect("Failed to save fixture image");
        path
    }

    /// Write a config file into the workspace
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let path = self.path().join("atarigr.yaml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Default options for `mode` with all outputs inside the workspace
    pub fn options(&self, mode: u8) -> ConvertOptions {
        ConvertOptions {
            out_dir: self.path().join("out"),
            program: self.path().join("image.pas"),
            ..ConvertOptions::from_config(&AppConfig::default(), mode)
        }
    }

    /// Save `image` and convert it with `options`
    pub fn convert(
        &self,
        image: &DynamicImage,
        options: ConvertOptions,
    ) -> Result<ConversionReport, AppError> {
        let input = self.save_image("input.png", image);
        ConversionService::new(options)?.convert(&input)
    }

    pub fn read_program(&self, report: &ConversionReport) -> String {
        std::fs::read_to_string(&report.program).expect("Failed to read program")
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
