//! atarigr - photos to Atari 8-bit drawing programs
//!
//! Loads an image, quantizes it to one of the GRAPHICS 8-15 palettes with
//! [`gr_pack`], and writes preview PNGs plus a Mad-Pascal program that
//! redraws the picture from packed rectangles or line spans.
//! This library exposes modules for integration testing.

pub mod codegen;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
