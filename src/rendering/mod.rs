pub mod image_loader;
pub mod preview;

pub use image_loader::{fit_to_mode, open_image};
pub use preview::{encode_grid_png, encode_mask_png, write_grid_png, write_layer_masks};
