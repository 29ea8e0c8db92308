//! Palette Handling
//!
//! Parsing raw palette text, deriving a palette from a grid, and validating
//! the resulting character list.

pub mod normalize;
pub mod validator;

pub use normalize::{compute_palette_chars_from_grid_lines, normalize_palette};
pub use validator::{validate_palette, PaletteCheck};
