//! Common utility functions shared across the codebase.

/// Collapses every run of whitespace into a single space and trims both ends.
///
/// ```
/// use autoglot::utils::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  Save \n\t changes "), "Save changes");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Convert a byte offset into a 1-based `(line, col)` pair using a line index.
///
/// Columns count characters, not bytes.
pub fn offset_to_line_col(content: &str, line_index: &[usize], offset: usize) -> (usize, usize) {
    let line = match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    };
    let line_start = line_index[line - 1];
    let end = offset.min(content.len());
    let col = content
        .get(line_start..end)
        .map(|s| s.chars().count())
        .unwrap_or(0);
    (line, col + 1)
}
