//! Terminal-cell and grapheme helpers for rendering task text and editing
//! dialog buffers. All offsets are byte offsets on grapheme boundaries.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells. Tabs count as 4 cells.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

fn grapheme_width(g: &str) -> usize {
    if g == "\t" { 4 } else { UnicodeWidthStr::width(g) }
}

/// Cut `s` to at most `max_cells` cells, ending in `…` when anything was
/// dropped.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        width += grapheme_width(g);
        if width > budget {
            break;
        }
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Pad `s` with spaces to exactly `width` cells (no truncation)
pub fn pad_to_width(s: &str, width: usize) -> String {
    let used = display_width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(used)))
}

/// Boundary after the grapheme at `byte_offset`, or None at the end
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    s.get(byte_offset..)
        .and_then(|rest| rest.graphemes(true).next())
        .map(|g| byte_offset + g.len())
}

/// Start of the grapheme before `byte_offset`, or None at the start
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    s.get(..byte_offset)
        .and_then(|head| head.grapheme_indices(true).next_back())
        .map(|(i, _)| i)
}

/// The grapheme starting at `byte_offset` ("" at the end)
pub fn grapheme_at(s: &str, byte_offset: usize) -> &str {
    s.get(byte_offset..)
        .and_then(|rest| rest.graphemes(true).next())
        .unwrap_or("")
}

/// Cells occupied by `s[..byte_offset]`
pub fn byte_offset_to_display_col(s: &str, byte_offset: usize) -> usize {
    display_width(&s[..byte_offset.min(s.len())])
}

/// Byte offset of the grapheme covering display column `col`; wide
/// characters snap to their start, columns past the end give `s.len()`.
pub fn display_col_to_byte_offset(s: &str, col: usize) -> usize {
    let mut seen = 0;
    for (i, g) in s.grapheme_indices(true) {
        seen += grapheme_width(g);
        if seen > col {
            return i;
        }
    }
    s.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths() {
        assert_eq!(display_width("task"), 4);
        assert_eq!(display_width("买牛奶"), 6);
        assert_eq!(display_width("e\u{301}"), 1);
        assert_eq!(display_width("a\tb"), 6);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate_to_width("Buy milk", 20), "Buy milk");
        assert_eq!(truncate_to_width("Buy milk", 8), "Buy milk");
        assert_eq!(truncate_to_width("Buy milk", 5), "Buy \u{2026}");
        assert_eq!(truncate_to_width("买牛奶", 4), "买\u{2026}");
        assert_eq!(truncate_to_width("Buy milk", 1), "\u{2026}");
        assert_eq!(truncate_to_width("Buy milk", 0), "");
    }

    #[test]
    fn padding() {
        assert_eq!(pad_to_width("ab", 4), "ab  ");
        assert_eq!(pad_to_width("买", 3), "买 ");
        assert_eq!(pad_to_width("abcdef", 3), "abcdef");
    }

    #[test]
    fn grapheme_steps() {
        let s = "ae\u{301}🎉";
        assert_eq!(next_grapheme_boundary(s, 0), Some(1));
        assert_eq!(next_grapheme_boundary(s, 1), Some(4));
        assert_eq!(next_grapheme_boundary(s, 4), Some(8));
        assert_eq!(next_grapheme_boundary(s, 8), None);
        assert_eq!(prev_grapheme_boundary(s, 8), Some(4));
        assert_eq!(prev_grapheme_boundary(s, 4), Some(1));
        assert_eq!(prev_grapheme_boundary(s, 0), None);
        assert_eq!(grapheme_at(s, 1), "e\u{301}");
        assert_eq!(grapheme_at(s, 8), "");
    }

    #[test]
    fn columns_and_offsets() {
        let s = "a买b";
        assert_eq!(byte_offset_to_display_col(s, 4), 3);
        assert_eq!(display_col_to_byte_offset(s, 1), 1);
        // Inside the wide character snaps to its start
        assert_eq!(display_col_to_byte_offset(s, 2), 1);
        assert_eq!(display_col_to_byte_offset(s, 3), 4);
        assert_eq!(display_col_to_byte_offset(s, 10), s.len());
    }
}
