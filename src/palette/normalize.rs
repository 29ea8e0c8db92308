//! Palette Normalizer

use std::collections::HashSet;

use crate::charset::is_allowed_char;

/// Parse raw palette text into candidate characters
///
/// Commas and spaces act as separators and are dropped, as is anything
/// outside the allowed class. Order is kept and duplicates are left for the
/// palette validator to report.
pub fn normalize_palette(text: &str) -> Vec<char> {
    text.chars()
        .filter(|c| !matches!(c, ',' | ' '))
        .filter(|c| is_allowed_char(*c))
        .collect()
}

/// Distinct characters used anywhere in the grid, in first-occurrence order
pub fn compute_palette_chars_from_grid_lines<S: AsRef<str>>(lines: &[S]) -> Vec<char> {
    let mut seen = HashSet::new();
    lines
        .iter()
        .flat_map(|line| line.as_ref().chars())
        .filter(|c| seen.insert(*c))
        .collect()
}
