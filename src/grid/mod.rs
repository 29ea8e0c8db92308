//! Grid Handling
//!
//! Line normalization and grid validation.

pub mod lines;
pub mod validator;

pub use lines::normalize_lines;
pub use validator::{validate_grid, GridCheck, MAX_SIZE, MIN_SIZE};
