//! Text frame geometry.
//!
//! A frame is plain text with lines separated by `\n`. Widths are measured in
//! terminal display columns, so wide glyphs (e.g. CJK, some box drawing
//! characters) count as two.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of a single line.
pub fn line_width(line: &str) -> usize {
    UnicodeWidthStr::width(line)
}

/// Width (widest line) and height (line count) of a frame.
///
/// An empty frame still has one (empty) line.
pub fn dimensions(frame: &str) -> (usize, usize) {
    let mut width = 0;
    let mut height = 0;
    for line in frame.split('\n') {
        width = width.max(line_width(line));
        height += 1;
    }
    (width, height)
}

/// Component-wise maximum of the dimensions of several frames.
pub fn max_dimensions<S: AsRef<str>>(frames: &[S]) -> (usize, usize) {
    frames
        .iter()
        .map(|f| dimensions(f.as_ref()))
        .fold((0, 0), |(w, h), (fw, fh)| (w.max(fw), h.max(fh)))
}

/// Right-pad `line` with spaces up to `width` display columns.
pub fn pad_line(line: &str, width: usize) -> String {
    let current = line_width(line);
    let mut out = String::with_capacity(line.len() + width.saturating_sub(current));
    out.push_str(line);
    for _ in current..width {
        out.push(' ');
    }
    out
}

/// Cut `line` to at most `width` display columns.
pub fn truncate_line(line: &str, width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in line.char_indices() {
        used += UnicodeWidthChar::width(c).unwrap_or(0);
        if used > width {
            return &line[..idx];
        }
    }
    line
}

/// Right-pad every line of a frame to `width` columns.
pub fn pad_lines(frame: &str, width: usize) -> String {
    frame
        .split('\n')
        .map(|line| pad_line(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}
