//! Line Normalizer
//!
//! Turns raw pasted grid text into an ordered list of rows.

/// Split raw grid text into lines
///
/// `\r\n` and lone `\r` are treated as `\n`. Blank lines at the very start
/// and end are dropped (common with copy/paste); blank lines inside the grid
/// are kept so the grid validator can report them.
pub fn normalize_lines(text: &str) -> Vec<String> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let start = lines
        .iter()
        .position(|line| !line.is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|line| !line.is_empty())
        .map_or(start, |pos| pos + 1);

    lines[start..end].iter().map(|line| line.to_string()).collect()
}
