//! Display-width measurement.
//!
//! [`Measurer`] computes how many terminal cells a piece of text occupies:
//!
//! - CJK and other wide characters count as 2 columns
//! - combining and zero-width marks count as 0
//! - a tab advances to the next multiple of the configured tab stop
//! - ANSI escape sequences are preserved but count as 0
//!
//! The tab stop is a field of the measurer rather than process-wide state,
//! so two tables with different tab widths can be laid out side by side.
//!
//! ```rust
//! use standout_table::layout::Measurer;
//!
//! let m = Measurer::new(4);
//! assert_eq!(m.display_width("日本"), 4);
//! assert_eq!(m.display_width("a\tb"), 5);
//! assert_eq!(m.display_width("\x1b[31mred\x1b[0m"), 3);
//! ```

use console::AnsiCodeIterator;
use unicode_width::UnicodeWidthChar;

use super::types::{Align, WrapMode};

/// Default distance between tab stops.
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Marker appended to truncated text.
pub const ELLIPSIS: char = '…';

/// Marker appended where `break` wrapping splits a word.
pub const BREAK_MARKER: char = '↩';

/// Measures, cuts and pads text by display width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Measurer {
    tab_width: usize,
}

impl Default for Measurer {
    fn default() -> Self {
        Measurer::new(DEFAULT_TAB_WIDTH)
    }
}

impl Measurer {
    /// Create a measurer with tab stops every `tab_width` columns (at least 1).
    pub fn new(tab_width: usize) -> Self {
        Measurer {
            tab_width: tab_width.max(1),
        }
    }

    /// Distance between tab stops.
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Width of `c` when drawn at column `col`.
    fn char_width(&self, c: char, col: usize) -> usize {
        if c == '\t' {
            self.tab_width - col % self.tab_width
        } else {
            c.width().unwrap_or(0)
        }
    }

    /// Column reached after drawing `text` starting at column `start`.
    ///
    /// `text` is treated as a single line.
    pub fn advance(&self, text: &str, start: usize) -> usize {
        let mut col = start;
        for (part, is_ansi) in AnsiCodeIterator::new(text) {
            if is_ansi {
                continue;
            }
            for c in part.chars() {
                col += self.char_width(c, col);
            }
        }
        col
    }

    /// Display width of a single line.
    pub fn line_width(&self, line: &str) -> usize {
        self.advance(line, 0)
    }

    /// Display width of `text`; for multi-line text, the widest line.
    pub fn display_width(&self, text: &str) -> usize {
        segments(text)
            .map(|line| self.line_width(line))
            .max()
            .unwrap_or(0)
    }

    /// Smallest column width that renders `text` under `mode` without losing
    /// content.
    ///
    /// - `none`: the full display width, since nothing is wrapped.
    /// - `normal` / `break`: the widest space-delimited token.
    /// - `truncate`: the text width when it is at most 1, otherwise room for
    ///   the first character plus the ellipsis.
    pub fn minimum_width(&self, text: &str, mode: WrapMode) -> usize {
        match mode {
            WrapMode::None => self.display_width(text),
            WrapMode::Normal | WrapMode::Break => segments(text)
                .flat_map(|line| line.split(' '))
                .map(|word| self.line_width(word))
                .max()
                .unwrap_or(0),
            WrapMode::Truncate => segments(text)
                .map(|line| {
                    let width = self.line_width(line);
                    if width <= 1 {
                        width
                    } else {
                        self.first_char_width(line) + ELLIPSIS.width().unwrap_or(1)
                    }
                })
                .max()
                .unwrap_or(0),
        }
    }

    fn first_char_width(&self, line: &str) -> usize {
        AnsiCodeIterator::new(line)
            .filter(|(_, is_ansi)| !is_ansi)
            .flat_map(|(part, _)| part.chars())
            .map(|c| self.char_width(c, 0))
            .find(|w| *w > 0)
            .unwrap_or(0)
    }

    /// Byte length of the longest prefix of `line` that fits in `max`
    /// columns when drawn from column `start`.
    ///
    /// The cut always falls on a character boundary; escape sequences and
    /// zero-width marks before the cut are kept.
    pub fn fit_prefix(&self, line: &str, start: usize, max: usize) -> usize {
        let mut col = start;
        let mut offset = 0;
        for (part, is_ansi) in AnsiCodeIterator::new(line) {
            if is_ansi {
                offset += part.len();
                continue;
            }
            for c in part.chars() {
                let w = self.char_width(c, col);
                if col + w - start > max {
                    return offset;
                }
                col += w;
                offset += c.len_utf8();
            }
        }
        offset
    }

    /// Cut `line` to `width` columns, ending with [`ELLIPSIS`] when shortened.
    ///
    /// Text that already fits is returned unchanged, so truncating twice with
    /// the same width is a no-op.
    pub fn truncate(&self, line: &str, width: usize) -> String {
        if self.line_width(line) <= width {
            return line.to_string();
        }
        if width == 0 {
            return String::new();
        }
        let marker_width = ELLIPSIS.width().unwrap_or(1);
        let cut = self.fit_prefix(line, 0, width.saturating_sub(marker_width));
        let mut result = line[..cut].to_string();
        result.push(ELLIPSIS);
        result
    }

    /// Replace every tab with spaces up to the next tab stop.
    pub fn expand_tabs(&self, text: &str) -> String {
        if !text.contains('\t') {
            return text.to_string();
        }
        let mut result = String::with_capacity(text.len());
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                result.push('\n');
            }
            let mut col = 0;
            for (part, is_ansi) in AnsiCodeIterator::new(line) {
                if is_ansi {
                    result.push_str(part);
                    continue;
                }
                for c in part.chars() {
                    let w = self.char_width(c, col);
                    if c == '\t' {
                        result.extend(std::iter::repeat_n(' ', w));
                    } else {
                        result.push(c);
                    }
                    col += w;
                }
            }
        }
        result
    }

    /// Pad `line` with spaces to `width` columns. Wider text is returned as is.
    ///
    /// Center alignment puts the odd space on the right.
    pub fn pad(&self, line: &str, width: usize, align: Align) -> String {
        let current = self.line_width(line);
        if current >= width {
            return line.to_string();
        }
        let gap = width - current;
        let (left, right) = match align {
            Align::Right => (gap, 0),
            Align::Center => (gap / 2, gap - gap / 2),
            Align::Left | Align::None => (0, gap),
        };
        let mut result = String::with_capacity(line.len() + gap);
        result.extend(std::iter::repeat_n(' ', left));
        result.push_str(line);
        result.extend(std::iter::repeat_n(' ', right));
        result
    }
}

/// Newline-delimited segments of `text`, with any trailing `\r` removed.
pub(crate) fn segments(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- display_width tests ---

    #[test]
    fn display_width_ascii() {
        let m = Measurer::default();
        assert_eq!(m.display_width("hello"), 5);
        assert_eq!(m.display_width(""), 0);
        assert_eq!(m.display_width(" "), 1);
    }

    #[test]
    fn display_width_unicode() {
        let m = Measurer::default();
        assert_eq!(m.display_width("日本語"), 6);
        assert_eq!(m.display_width("café"), 4);
        assert_eq!(m.display_width("e\u{301}"), 1); // combining acute accent
    }

    #[test]
    fn display_width_ansi() {
        let m = Measurer::default();
        assert_eq!(m.display_width("\x1b[31mred\x1b[0m"), 3);
        assert_eq!(m.display_width("\x1b[1;32mbold green\x1b[0m"), 10);
    }

    #[test]
    fn display_width_multiline_is_widest_line() {
        let m = Measurer::default();
        assert_eq!(m.display_width("ab\nabcd\nabc"), 4);
        assert_eq!(m.display_width("ab\r\nabc\r\n"), 3);
    }

    #[test]
    fn tabs_advance_to_next_stop() {
        let m = Measurer::new(8);
        assert_eq!(m.display_width("\t"), 8);
        assert_eq!(m.display_width("abc\t"), 8);
        assert_eq!(m.display_width("abc\tx"), 9);
        assert_eq!(m.display_width("abcdefgh\t"), 16);

        let narrow = Measurer::new(4);
        assert_eq!(narrow.display_width("a\tb"), 5);
        assert_eq!(narrow.advance("\t", 2), 4);
    }

    #[test]
    fn zero_tab_width_is_clamped() {
        assert_eq!(Measurer::new(0).tab_width(), 1);
    }

    // --- minimum_width tests ---

    #[test]
    fn minimum_width_normal_is_longest_token() {
        let m = Measurer::default();
        assert_eq!(m.minimum_width("hello wonderful world", WrapMode::Normal), 9);
        assert_eq!(m.minimum_width("a bb\nccc d", WrapMode::Break), 3);
        assert_eq!(m.minimum_width("", WrapMode::Normal), 0);
    }

    #[test]
    fn minimum_width_none_is_full_width() {
        let m = Measurer::default();
        assert_eq!(m.minimum_width("hello world", WrapMode::None), 11);
    }

    #[test]
    fn minimum_width_truncate() {
        let m = Measurer::default();
        assert_eq!(m.minimum_width("hello", WrapMode::Truncate), 2);
        assert_eq!(m.minimum_width("x", WrapMode::Truncate), 1);
        assert_eq!(m.minimum_width("日本", WrapMode::Truncate), 3);
    }

    // --- truncate tests ---

    #[test]
    fn truncate_fits_unchanged() {
        let m = Measurer::default();
        assert_eq!(m.truncate("hello", 5), "hello");
        assert_eq!(m.truncate("hello", 10), "hello");
    }

    #[test]
    fn truncate_basic() {
        let m = Measurer::default();
        assert_eq!(m.truncate("hello world", 8), "hello w…");
        assert_eq!(m.truncate("hello world", 1), "…");
        assert_eq!(m.truncate("hello world", 0), "");
    }

    #[test]
    fn truncate_never_splits_wide_chars() {
        let m = Measurer::default();
        // 3 columns left for text: one wide char fits, the second would not
        assert_eq!(m.truncate("日本語テスト", 4), "日…");
        assert_eq!(m.truncate("日本語テスト", 7), "日本語…");
    }

    #[test]
    fn truncate_is_idempotent() {
        let m = Measurer::default();
        let once = m.truncate("the quick brown fox", 7);
        assert_eq!(once, "the qu…");
        assert_eq!(m.truncate(&once, 7), once);
    }

    // --- fit_prefix tests ---

    #[test]
    fn fit_prefix_respects_start_column() {
        let m = Measurer::new(4);
        assert_eq!(m.fit_prefix("abcdef", 0, 3), 3);
        // tab at column 2 advances 2 columns
        assert_eq!(m.fit_prefix("\tab", 2, 2), 1);
        assert_eq!(m.fit_prefix("日本", 0, 3), "日".len());
    }

    // --- expand_tabs tests ---

    #[test]
    fn expand_tabs_to_stops() {
        let m = Measurer::new(4);
        assert_eq!(m.expand_tabs("a\tb"), "a   b");
        assert_eq!(m.expand_tabs("\tx\nab\ty"), "    x\nab  y");
        assert_eq!(m.expand_tabs("no tabs"), "no tabs");
    }

    // --- pad tests ---

    #[test]
    fn pad_alignments() {
        let m = Measurer::default();
        assert_eq!(m.pad("42", 5, Align::Right), "   42");
        assert_eq!(m.pad("42", 5, Align::Left), "42   ");
        assert_eq!(m.pad("hi", 5, Align::Center), " hi  ");
        assert_eq!(m.pad("hello", 3, Align::Left), "hello");
        assert_eq!(m.pad("日本", 6, Align::Left), "日本  ");
    }
}
