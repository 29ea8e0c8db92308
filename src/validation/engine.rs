//! Validation Engine
//!
//! Chains line normalization, palette resolution, palette validation and
//! grid validation into a single `ValidationResult`.

use serde::Serialize;

use crate::grid::{normalize_lines, validate_grid};
use crate::palette::{compute_palette_chars_from_grid_lines, normalize_palette, validate_palette};
use crate::validation::MessageSet;

pub const PALETTE_COMPUTED_WARNING: &str =
    "No palette provided, computing palette from grid lines.";

/// Result of validating a grid and its palette
///
/// Serialized field names match the `/api/validate` response contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub ok: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub width: usize,
    pub height: usize,
    pub unique_chars: Vec<char>,
    pub palette_chars: Vec<char>,
    /// Normalized grid lines; empty whenever `errors` is not
    pub lines: Vec<String>,
}

impl ValidationResult {
    /// A result describing a failure outside of validation itself
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            errors: vec![message.into()],
            warnings: Vec::new(),
            width: 0,
            height: 0,
            unique_chars: Vec::new(),
            palette_chars: Vec::new(),
            lines: Vec::new(),
        }
    }
}

/// Validate raw grid text against an optional raw palette
///
/// An absent or empty palette is derived from the grid itself; the derived
/// palette then goes through the same checks as an explicit one.
pub fn validate_grid_and_palette(
    grid_raw_input: &str,
    palette_raw_input: Option<&str>,
) -> ValidationResult {
    let mut errors = MessageSet::new();
    let mut warnings = MessageSet::new();

    let grid_lines = normalize_lines(grid_raw_input);

    let candidate_chars = match palette_raw_input.filter(|p| !p.is_empty()) {
        Some(raw) => normalize_palette(raw),
        None => {
            warnings.insert(PALETTE_COMPUTED_WARNING);
            let computed: String = compute_palette_chars_from_grid_lines(&grid_lines)
                .into_iter()
                .collect();
            normalize_palette(&computed)
        }
    };

    let palette = validate_palette(candidate_chars);
    errors.merge(palette.errors);
    let palette_chars = palette.chars;

    log::debug!(
        "Resolved palette: {}",
        palette_chars
            .iter()
            .map(char::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    let grid = validate_grid(grid_lines, &palette_chars);
    errors.merge(grid.errors);

    let ok = errors.is_empty();
    ValidationResult {
        ok,
        errors: errors.into_vec(),
        warnings: warnings.into_vec(),
        width: grid.width,
        height: grid.height,
        unique_chars: palette_chars.clone(),
        palette_chars,
        lines: if ok { grid.lines } else { Vec::new() },
    }
}
