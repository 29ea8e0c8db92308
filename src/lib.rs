//! Pixel Grid Validator
//!
//! Validates rectangular character grids ("pixel art") against a palette
//! of allowed characters.
//!
//! This library provides:
//! - Grid text and palette normalization
//! - Palette and grid validation with exhaustive error reporting
//! - A small HTTP service and CLI around the validation engine
//! - Configuration management

pub mod charset;
pub mod cli;
pub mod config;
pub mod grid;
pub mod palette;
pub mod server;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use grid::{normalize_lines, validate_grid, GridCheck};
pub use palette::{normalize_palette, validate_palette, PaletteCheck};
pub use validation::{validate_grid_and_palette, MessageSet, ValidationResult};
