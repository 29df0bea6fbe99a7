use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_cells` terminal cells, appending
/// `…` if truncated. Never splits a grapheme cluster.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1; // reserve 1 cell for '…'
    let mut width = 0;
    let mut result = String::new();
    for grapheme in s.graphemes(true) {
        let gw = UnicodeWidthStr::width(grapheme);
        if width + gw > budget {
            break;
        }
        width += gw;
        result.push_str(grapheme);
    }
    result.push('\u{2026}');
    result
}

/// Next grapheme boundary after `byte_offset`. Returns None if at end.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let g = s[byte_offset..].graphemes(true).next()?;
    Some(byte_offset + g.len())
}

/// Previous grapheme boundary before `byte_offset`. Returns None if at start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    s[..byte_offset]
        .grapheme_indices(true)
        .last()
        .map(|(i, _)| i)
}

/// Convert byte offset to display column (terminal cells).
pub fn byte_offset_to_display_col(s: &str, byte_offset: usize) -> usize {
    display_width(&s[..byte_offset.min(s.len())])
}

/// Word boundary to the left, whitespace-delimited.
pub fn word_boundary_left(s: &str, byte_offset: usize) -> usize {
    let graphemes: Vec<(usize, &str)> = s[..byte_offset].grapheme_indices(true).collect();
    let mut idx = graphemes.len();

    // Skip whitespace behind the cursor, then the word itself
    while idx > 0 && is_blank(graphemes[idx - 1].1) {
        idx -= 1;
    }
    while idx > 0 && !is_blank(graphemes[idx - 1].1) {
        idx -= 1;
    }

    graphemes.get(idx).map_or(byte_offset, |(i, _)| *i)
}

/// Word boundary to the right, whitespace-delimited.
pub fn word_boundary_right(s: &str, byte_offset: usize) -> usize {
    let mut iter = s[byte_offset..].grapheme_indices(true).peekable();

    // Skip the rest of the current word, then the gap after it
    while iter.peek().is_some_and(|(_, g)| !is_blank(g)) {
        iter.next();
    }
    while iter.peek().is_some_and(|(_, g)| is_blank(g)) {
        iter.next();
    }

    iter.peek().map_or(s.len(), |(i, _)| byte_offset + i)
}

fn is_blank(grapheme: &str) -> bool {
    grapheme.chars().all(|c| c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- display width ---

    #[test]
    fn display_width_ascii_and_cjk() {
        assert_eq!(display_width(""), 0);
        assert_eq!(display_width("hello"), 5);
        assert_eq!(display_width("你好"), 4);
        assert_eq!(display_width("hello你好"), 9);
    }

    #[test]
    fn display_width_combining() {
        // café with combining accent
        assert_eq!(display_width("cafe\u{0301}"), 4);
    }

    // --- truncate_to_width ---

    #[test]
    fn truncate_fits_untouched() {
        assert_eq!(truncate_to_width("hi", 10), "hi");
        assert_eq!(truncate_to_width("hello", 5), "hello");
    }

    #[test]
    fn truncate_ascii() {
        assert_eq!(truncate_to_width("hello world", 8), "hello w\u{2026}");
    }

    #[test]
    fn truncate_never_splits_wide_chars() {
        // "你好世界" is 8 cells; 5 leaves room for "你好" + ellipsis
        assert_eq!(truncate_to_width("你好世界", 5), "你好\u{2026}");
        // 4 cells: budget 3 fits only "你" + ellipsis
        let result = truncate_to_width("你好世界", 4);
        assert!(display_width(&result) <= 4);
        assert!(result.ends_with('\u{2026}'));
    }

    #[test]
    fn truncate_tiny_budgets() {
        assert_eq!(truncate_to_width("hello", 0), "");
        assert_eq!(truncate_to_width("hello", 1), "\u{2026}");
    }

    // --- grapheme boundaries ---

    #[test]
    fn next_grapheme_ascii() {
        assert_eq!(next_grapheme_boundary("hello", 0), Some(1));
        assert_eq!(next_grapheme_boundary("hello", 4), Some(5));
        assert_eq!(next_grapheme_boundary("hello", 5), None);
    }

    #[test]
    fn prev_grapheme_ascii() {
        assert_eq!(prev_grapheme_boundary("hello", 5), Some(4));
        assert_eq!(prev_grapheme_boundary("hello", 1), Some(0));
        assert_eq!(prev_grapheme_boundary("hello", 0), None);
    }

    #[test]
    fn grapheme_boundaries_multibyte() {
        let s = "a🎉b";
        assert_eq!(next_grapheme_boundary(s, 1), Some(5)); // over the emoji
        assert_eq!(prev_grapheme_boundary(s, 5), Some(1));

        let s = "cafe\u{0301}!"; // combining accent stays attached
        assert_eq!(next_grapheme_boundary(s, 3), Some(6));
        assert_eq!(prev_grapheme_boundary(s, 6), Some(3));
    }

    // --- cursor columns ---

    #[test]
    fn byte_offset_to_display_col_cjk() {
        assert_eq!(byte_offset_to_display_col("hello", 3), 3);
        assert_eq!(byte_offset_to_display_col("你好", 3), 2);
        assert_eq!(byte_offset_to_display_col("你好", 6), 4);
        // Past the end clamps
        assert_eq!(byte_offset_to_display_col("hi", 99), 2);
    }

    // --- word boundaries ---

    #[test]
    fn word_boundary_left_walks_words() {
        let s = "hello world";
        assert_eq!(word_boundary_left(s, 11), 6);
        assert_eq!(word_boundary_left(s, 6), 0);
        assert_eq!(word_boundary_left(s, 0), 0);
    }

    #[test]
    fn word_boundary_right_walks_words() {
        let s = "hello world";
        assert_eq!(word_boundary_right(s, 0), 6);
        assert_eq!(word_boundary_right(s, 6), 11);
        assert_eq!(word_boundary_right(s, 11), 11);
    }

    #[test]
    fn word_boundaries_cjk() {
        let s = "hello 你好";
        assert_eq!(word_boundary_left(s, s.len()), 6);
        assert_eq!(word_boundary_right(s, 0), 6);
    }

    #[test]
    fn word_boundary_left_from_mid_word() {
        assert_eq!(word_boundary_left("hello world", 8), 6);
    }
}
