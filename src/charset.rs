//! Allowed Character Class
//!
//! The single definition of which characters may appear in a palette.
//! Both the palette normalizer and the palette validator test against it.

use regex::Regex;
use std::sync::LazyLock;

/// Human-readable form of the allowed class, quoted in error messages
pub const ALLOWED_CHARS_DESCRIPTION: &str = "a-zA-Z0-9@#=!*%$&-_.+|";

static ALLOWED_CHAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9@#=!*%$&\-_.+|]$").expect("Invalid allowed-character regex")
});

/// Check whether a character belongs to the allowed class
///
/// ASCII letters, digits and the symbols `@ # = ! * % $ & - _ . + |`.
pub fn is_allowed_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    ALLOWED_CHAR.is_match(c.encode_utf8(&mut buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_and_digits_are_allowed() {
        for c in ('a'..='z').chain('A'..='Z').chain('0'..='9') {
            assert!(is_allowed_char(c), "{c:?} should be allowed");
        }
    }

    #[test]
    fn test_symbols_are_allowed() {
        for c in "@#=!*%$&-_.+|".chars() {
            assert!(is_allowed_char(c), "{c:?} should be allowed");
        }
    }

    #[test]
    fn test_other_characters_are_rejected() {
        for c in [' ', ',', '\n', '\t', '^', '~', '/', '(', 'é', 'Ω', '█'] {
            assert!(!is_allowed_char(c), "{c:?} should be rejected");
        }
    }
}
