//! Palette Validator
//!
//! Reports duplicate and disallowed palette characters and hands back the
//! cleaned palette. Both checks always run.

use std::collections::HashSet;

use crate::charset::{is_allowed_char, ALLOWED_CHARS_DESCRIPTION};
use crate::validation::MessageSet;

pub const DUPLICATE_CHARS_MESSAGE: &str =
    "Duplicate characters found in palette. Only unique characters are allowed.";

/// Outcome of validating a palette
#[derive(Debug, Clone, PartialEq)]
pub struct PaletteCheck {
    /// Deduplicated palette restricted to the allowed class
    pub chars: Vec<char>,
    pub errors: MessageSet,
}

/// Validate a candidate palette
pub fn validate_palette(chars: Vec<char>) -> PaletteCheck {
    let mut errors = MessageSet::new();

    let (chars, duplicate_error) = check_duplicates(chars);
    errors.extend(duplicate_error);

    let (chars, invalid_error) = check_invalid_chars(chars);
    errors.extend(invalid_error);

    PaletteCheck { chars, errors }
}

/// Deduplicate, keeping the first occurrence of each character
pub fn check_duplicates(chars: Vec<char>) -> (Vec<char>, Option<String>) {
    let original_len = chars.len();
    let mut seen = HashSet::new();
    let unique: Vec<char> = chars.into_iter().filter(|c| seen.insert(*c)).collect();

    let error = (unique.len() < original_len).then(|| DUPLICATE_CHARS_MESSAGE.to_string());
    (unique, error)
}

/// Drop characters outside the allowed class
pub fn check_invalid_chars(chars: Vec<char>) -> (Vec<char>, Option<String>) {
    let (valid, invalid): (Vec<char>, Vec<char>) =
        chars.into_iter().partition(|c| is_allowed_char(*c));

    let error = (!invalid.is_empty()).then(|| {
        let listed: Vec<String> = invalid.iter().map(char::to_string).collect();
        format!(
            "Invalid characters found in palette: {}. Only characters allowed are: {}",
            listed.join(", "),
            ALLOWED_CHARS_DESCRIPTION
        )
    });
    (valid, error)
}
