use pixel_grid_validator::grid::normalize_lines;
use pixel_grid_validator::palette::validator::DUPLICATE_CHARS_MESSAGE;
use pixel_grid_validator::palette::{normalize_palette, validate_palette};
use pixel_grid_validator::validation::engine::PALETTE_COMPUTED_WARNING;
use pixel_grid_validator::validate_grid_and_palette;

fn rows(count: usize, row: &str) -> Vec<String> {
    vec![row.to_string(); count]
}

#[test]
fn test_uniform_grid_without_palette() {
    let grid = rows(8, "........").join("\n");
    let result = validate_grid_and_palette(&grid, None);

    assert!(result.ok);
    assert!(result.errors.is_empty());
    assert_eq!(result.palette_chars, vec!['.']);
    assert!(result.warnings.contains(&PALETTE_COMPUTED_WARNING.to_string()));
    assert_eq!((result.width, result.height), (8, 8));
    assert_eq!(result.lines, rows(8, "........"));
}

#[test]
fn test_short_row_breaks_consistency() {
    let mut lines = rows(8, "abababab");
    lines[3] = "abababa".to_string();
    let result = validate_grid_and_palette(&lines.join("\n"), None);

    assert!(!result.ok);
    assert!(result
        .errors
        .contains(&"Line 4 must have the same length as the first line.".to_string()));
    assert!(result
        .errors
        .contains(&"Line 4 must be between 8 and 64 characters.".to_string()));
    assert!(result.lines.is_empty());
}

#[test]
fn test_palette_with_duplicate_and_invalid_chars() {
    let result = validate_palette(vec!['a', 'a', '!', '\n']);

    assert_eq!(result.chars, vec!['a', '!']);
    assert!(result.errors.contains(DUPLICATE_CHARS_MESSAGE));
    assert!(result
        .errors
        .iter()
        .any(|e| e.starts_with("Invalid characters found in palette: \n.")));
}

#[test]
fn test_grid_char_missing_from_palette() {
    let mut lines = rows(8, "xyxyxyxy");
    lines[1] = "xyzyxyzy".to_string();
    lines[6] = "zyxyxyxy".to_string();
    let result = validate_grid_and_palette(&lines.join("\n"), Some("xy"));

    assert!(!result.ok);
    assert_eq!(
        result.errors,
        vec![
            "Line 2 has invalid character: \"z\"",
            "Line 7 has invalid character: \"z\"",
        ]
    );
    assert!(result.warnings.is_empty());
    assert!(result.lines.is_empty());
}

#[test]
fn test_blank_edges_are_trimmed() {
    let grid = format!("\n\n{}\n\n", rows(8, "abcdefgh").join("\n"));
    let lines = normalize_lines(&grid);
    assert_eq!(lines, rows(8, "abcdefgh"));

    let result = validate_grid_and_palette(&grid, None);
    assert!(result.ok, "unexpected errors: {:?}", result.errors);
    assert_eq!(result.height, 8);
    assert_eq!(result.lines.len(), 8);
}

#[test]
fn test_crlf_grid_with_explicit_palette() {
    let grid = rows(10, "#.#.#.#.#.").join("\r\n");
    let result = validate_grid_and_palette(&grid, Some("#, ."));

    assert!(result.ok);
    assert_eq!(result.palette_chars, vec!['#', '.']);
    assert_eq!(result.unique_chars, result.palette_chars);
    assert_eq!((result.width, result.height), (10, 10));
}

#[test]
fn test_errors_always_hide_lines() {
    let mut interior_blank = rows(8, "aaaaaaaa");
    interior_blank.insert(1, String::new());

    let inputs = [
        (String::new(), None),
        ("abc".to_string(), None),
        ("aaaaaaaa\naaaaaaaa".to_string(), Some("a")),
        (interior_blank.join("\n"), None),
        (rows(8, "bbbbbbbb").join("\n"), Some("bb")),
    ];

    for (grid, palette) in &inputs {
        let result = validate_grid_and_palette(grid, *palette);
        assert!(!result.errors.is_empty(), "{grid:?} should fail");
        assert!(!result.ok);
        assert!(result.lines.is_empty(), "{grid:?} leaked lines");
    }
}

#[test]
fn test_duplicate_palettes_shrink() {
    for palette in ["aa", "abca", "..##..", "1212"] {
        let chars = normalize_palette(palette);
        let result = validate_palette(chars.clone());
        assert!(result.chars.len() < chars.len(), "{palette:?}");
        assert!(result.errors.contains(DUPLICATE_CHARS_MESSAGE));
    }
}

#[test]
fn test_palette_of_disallowed_symbols_only() {
    let grid = rows(8, "aaaaaaaa").join("\n");
    let result = validate_grid_and_palette(&grid, Some("^^ ~~ ,"));

    assert!(result.palette_chars.is_empty());
    assert!(result.warnings.is_empty());
    assert_eq!(result.errors.len(), 8);
}

#[test]
fn test_palette_chars_are_distinct_and_allowed() {
    let grid = rows(8, "ab.#ab~#").join("\n");
    let result = validate_grid_and_palette(&grid, None);

    let mut sorted = result.palette_chars.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), result.palette_chars.len());
    assert!(!result.palette_chars.contains(&'~'));
    for c in &result.unique_chars {
        assert!(grid.contains(*c));
    }
}
