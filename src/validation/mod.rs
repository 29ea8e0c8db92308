//! Validation Engine
//!
//! Pure validation of grid text and palettes, free of any transport concerns.

pub mod engine;
pub mod messages;

pub use engine::{validate_grid_and_palette, ValidationResult};
pub use messages::MessageSet;
