use gr_pack::pack::{Occlusion, Strategy};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::AppError;

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "ATARIGR_CONFIG";

/// Config file picked up from the working directory when nothing else is given
pub const DEFAULT_CONFIG_FILE: &str = "atarigr.yaml";

/// Application configuration loaded from atarigr.yaml
///
/// Every field has a default, so an empty file (or none at all) is valid.
/// Command-line flags override whatever is set here.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Directory for preview and layer PNGs
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Path of the generated Pascal program
    #[serde(default = "default_program")]
    pub program: PathBuf,

    /// GRAPHICS mode used when --mode is not given
    #[serde(default)]
    pub default_mode: Option<u8>,

    /// rect or hline
    #[serde(default)]
    pub compression: Strategy,

    /// exact or overdraw
    #[serde(default)]
    pub occlusion: Occlusion,

    /// Pack the most common color instead of clearing the screen to it
    #[serde(default)]
    pub keep_background: bool,

    /// Write one mask PNG per layer into `<out_dir>/layers/`
    #[serde(default)]
    pub write_layers: bool,
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_program() -> PathBuf {
    PathBuf::from("image.pas")
}

impl AppConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, AppError> {
        // An empty document deserializes to unit, not to an empty map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Locate the config file: explicit path, then $ATARIGR_CONFIG, then
    /// ./atarigr.yaml if it exists
    pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            if !path.is_empty() {
                return Some(PathBuf::from(path));
            }
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.exists().then_some(local)
    }

    /// Load configuration, falling back to defaults on any error
    pub fn load(explicit: Option<&Path>) -> Self {
        let Some(path) = Self::locate(explicit) else {
            tracing::debug!("No config file, using defaults");
            return Self::default();
        };

        match Self::from_file(&path) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "Loaded configuration");
                config
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            program: default_program(),
            default_mode: None,
            compression: Strategy::default(),
            occlusion: Occlusion::default(),
            keep_background: false,
            write_layers: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert_eq!(config.program, PathBuf::from("image.pas"));
        assert_eq!(config.default_mode, None);
        assert_eq!(config.compression, Strategy::Rect);
        assert_eq!(config.occlusion, Occlusion::Exact);
        assert!(!config.keep_background);
        assert!(!config.write_layers);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
        assert_eq!(AppConfig::from_yaml("  \n").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
out_dir: build
program: build/pic.pas
default_mode: 15
compression: hline
occlusion: overdraw
keep_background: true
write_layers: true
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.out_dir, PathBuf::from("build"));
        assert_eq!(config.program, PathBuf::from("build/pic.pas"));
        assert_eq!(config.default_mode, Some(15));
        assert_eq!(config.compression, Strategy::Hline);
        assert_eq!(config.occlusion, Occlusion::Overdraw);
        assert!(config.keep_background);
        assert!(config.write_layers);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = AppConfig::from_yaml("compression: hline\n").unwrap();
        assert_eq!(config.compression, Strategy::Hline);
        assert_eq!(config.out_dir, PathBuf::from("out"));
        assert!(!config.write_layers);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = AppConfig::from_yaml("colour: red\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_bad_compression_rejected() {
        assert!(AppConfig::from_yaml("compression: squares\n").is_err());
    }

    #[test]
    fn test_locate_prefers_explicit_path() {
        let path = Path::new("/tmp/explicit.yaml");
        assert_eq!(AppConfig::locate(Some(path)), Some(path.to_path_buf()));
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("nope.yaml")));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("atarigr.yaml");
        std::fs::write(&path, "default_mode: 9\n").unwrap();
        let config = AppConfig::load(Some(&path));
        assert_eq!(config.default_mode, Some(9));
    }
}
