//! Mad-Pascal program generation.

pub mod pascal;

pub use pascal::{generate, program_tag, PascalProgram};
