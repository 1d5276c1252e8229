pub mod conversion;

pub use conversion::{preview_all, ConversionReport, ConversionService, ConvertOptions};
