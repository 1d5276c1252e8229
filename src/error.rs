use gr_pack::PackError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Image load error: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("No graphics mode given (use --mode or set default_mode in the config)")]
    MissingMode,

    #[error("Pack error: {0}")]
    Pack(#[from] PackError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_encode_error() {
        let error = AppError::PngEncode("Encoding failed".to_string());
        assert_eq!(error.to_string(), "PNG encode error: Encoding failed");
    }

    #[test]
    fn test_config_error() {
        let error = AppError::Config("bad yaml".to_string());
        assert_eq!(error.to_string(), "Config error: bad yaml");
    }

    #[test]
    fn test_missing_mode_error() {
        assert_eq!(
            AppError::MissingMode.to_string(),
            "No graphics mode given (use --mode or set default_mode in the config)"
        );
    }

    #[test]
    fn test_from_pack_error() {
        let error: AppError = PackError::InvalidMode(13).into();
        match error {
            AppError::Pack(PackError::InvalidMode(13)) => {}
            other => panic!("Expected Pack variant, got {other:?}"),
        }
    }

    #[test]
    fn test_pack_error_message_is_wrapped() {
        let error: AppError = PackError::InvalidMode(13).into();
        assert_eq!(
            error.to_string(),
            "Pack error: unknown graphics mode 13 (supported: 8, 9, 10, 11, 14, 15)"
        );
    }

    #[test]
    fn test_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.png");
        let error: AppError = io.into();
        assert_eq!(error.to_string(), "IO error: missing.png");
    }
}
