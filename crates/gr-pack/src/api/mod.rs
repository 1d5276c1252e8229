//! Public API for the gr-pack crate.
//!
//! This module provides the high-level API: [`Packer`] builder and
//! [`PackError`] unified error type.

mod builder;
mod error;

pub use builder::{PackedImage, Packer, Primitives};
pub use error::PackError;
