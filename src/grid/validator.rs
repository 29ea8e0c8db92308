//! Grid Validator
//!
//! Structural and content checks over normalized grid lines. Every check is
//! a separate function and all of them run, so one call reports every
//! problem in the grid at once.

use std::collections::HashSet;

use crate::validation::MessageSet;

/// Smallest accepted number of lines, and of characters per line
pub const MIN_SIZE: usize = 8;
/// Largest accepted number of lines, and of characters per line
pub const MAX_SIZE: usize = 64;

/// Outcome of validating a grid
#[derive(Debug, Clone, PartialEq)]
pub struct GridCheck {
    pub lines: Vec<String>,
    pub errors: MessageSet,
    /// Length of the first line, 0 for an empty grid
    pub width: usize,
    pub height: usize,
}

fn line_len(line: &str) -> usize {
    line.chars().count()
}

fn within_bounds(len: usize) -> bool {
    (MIN_SIZE..=MAX_SIZE).contains(&len)
}

/// Validate grid lines against the resolved palette
pub fn validate_grid(lines: Vec<String>, palette: &[char]) -> GridCheck {
    let mut errors = MessageSet::new();

    errors.extend(check_not_empty(&lines));
    errors.extend(check_bounds(&lines));
    errors.extend(check_consistent_lengths(&lines));
    errors.extend(check_palette_membership(&lines, palette));

    let width = lines.first().map_or(0, |line| line_len(line));
    let height = lines.len();

    GridCheck {
        lines,
        errors,
        width,
        height,
    }
}

/// A grid needs at least one line
pub fn check_not_empty(lines: &[String]) -> Option<String> {
    lines.is_empty().then(|| "Grid is required.".to_string())
}

/// Line count and per-line length must both fall in `MIN_SIZE..=MAX_SIZE`
pub fn check_bounds(lines: &[String]) -> Vec<String> {
    let mut errors = Vec::new();

    if !within_bounds(lines.len()) {
        errors.push(format!(
            "Grid must be between {} and {} lines.",
            MIN_SIZE, MAX_SIZE
        ));
    }

    for (index, line) in lines.iter().enumerate() {
        if !within_bounds(line_len(line)) {
            errors.push(format!(
                "Line {} must be between {} and {} characters.",
                index + 1,
                MIN_SIZE,
                MAX_SIZE
            ));
        }
    }

    errors
}

/// Every line must be as long as the first one
pub fn check_consistent_lengths(lines: &[String]) -> Vec<String> {
    let Some(first) = lines.first() else {
        return Vec::new();
    };
    let expected = line_len(first);

    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line_len(line) != expected)
        .map(|(index, _)| {
            format!(
                "Line {} must have the same length as the first line.",
                index + 1
            )
        })
        .collect()
}

/// Every character of every line must be part of the palette
///
/// One message per offending occurrence; identical messages collapse once
/// merged into a `MessageSet`.
pub fn check_palette_membership(lines: &[String], palette: &[char]) -> Vec<String> {
    let palette: HashSet<char> = palette.iter().copied().collect();
    let mut errors = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        for c in line.chars().filter(|c| !palette.contains(c)) {
            errors.push(format!(
                "Line {} has invalid character: \"{}\"",
                index + 1,
                c
            ));
        }
    }

    errors
}
