//! Fitting cell text into a column width.
//!
//! [`wrap`] turns one cell's text into the display lines it occupies. Every
//! newline-delimited segment is fitted on its own and the results are
//! concatenated, so explicit line breaks always survive. Empty text yields a
//! single empty line, never zero lines.
//!
//! ```rust
//! use standout_table::layout::{wrap, Measurer, WrapMode};
//!
//! let m = Measurer::default();
//! let lines = wrap("hello world foo bar", 11, WrapMode::Normal, &m);
//! assert_eq!(lines, vec!["hello world", "foo bar"]);
//!
//! let lines = wrap("hello world", 8, WrapMode::Truncate, &m);
//! assert_eq!(lines, vec!["hello w…"]);
//! ```

use super::types::WrapMode;
use super::width::{segments, Measurer, BREAK_MARKER};

/// Fit `text` into `width` columns according to `mode`.
///
/// Tabs are measured at their expanded width; callers that want them
/// replaced by spaces expand them before wrapping.
pub fn wrap(text: &str, width: usize, mode: WrapMode, measurer: &Measurer) -> Vec<String> {
    let mut lines = Vec::new();
    for segment in segments(text) {
        match mode {
            WrapMode::None => lines.push(segment.to_string()),
            WrapMode::Truncate => lines.push(measurer.truncate(segment, width)),
            WrapMode::Normal => wrap_words(segment, width.max(1), measurer, false, &mut lines),
            WrapMode::Break => wrap_words(segment, width.max(1), measurer, true, &mut lines),
        }
    }
    lines
}

/// Greedy word wrap of a single segment into `out`.
///
/// With `mark_breaks`, a word that overflows the current line is split to
/// fill it and the line ends with [`BREAK_MARKER`]; otherwise the word moves
/// to the next line and is only hard-broken when it is wider than a line.
fn wrap_words(
    segment: &str,
    width: usize,
    measurer: &Measurer,
    mark_breaks: bool,
    out: &mut Vec<String>,
) {
    if measurer.line_width(segment) <= width {
        out.push(segment.to_string());
        return;
    }

    let first = out.len();
    let mut line = String::new();
    let mut col = 0;

    for mut word in segment.split(' ').filter(|w| !w.is_empty()) {
        loop {
            let gap = usize::from(!line.is_empty());
            let end = measurer.advance(word, col + gap);
            if end <= width {
                if gap == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                col = end;
                break;
            }

            if mark_breaks {
                // One column of text plus the marker at minimum.
                let room = width.saturating_sub(col + gap);
                if room >= 2 {
                    let cut = measurer.fit_prefix(word, col + gap, room - 1);
                    if cut > 0 {
                        if gap == 1 {
                            line.push(' ');
                        }
                        line.push_str(&word[..cut]);
                        line.push(BREAK_MARKER);
                        out.push(std::mem::take(&mut line));
                        col = 0;
                        word = &word[cut..];
                        if word.is_empty() {
                            break;
                        }
                        continue;
                    }
                }
            }

            if !line.is_empty() {
                out.push(std::mem::take(&mut line));
                col = 0;
                continue;
            }

            // Alone on a line and still too wide: hard break.
            let cut = match measurer.fit_prefix(word, 0, width) {
                0 => word.chars().next().map_or(word.len(), char::len_utf8),
                cut => cut,
            };
            out.push(word[..cut].to_string());
            word = &word[cut..];
            if word.is_empty() {
                break;
            }
        }
    }

    if !line.is_empty() || out.len() == first {
        out.push(line);
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn narrower_never_means_fewer_lines(
            words in prop::collection::vec("[a-z]{1,12}", 1..20),
            narrow in 1usize..30,
            extra in 0usize..10,
            mode in prop_oneof![Just(WrapMode::Normal), Just(WrapMode::Break)],
        ) {
            let m = Measurer::default();
            let text = words.join(" ");
            let wide = narrow + extra;
            let narrow_lines = wrap(&text, narrow, mode, &m);
            let wide_lines = wrap(&text, wide, mode, &m);
            prop_assert!(narrow_lines.len() >= wide_lines.len());
        }

        #[test]
        fn normal_lines_fit_width(
            words in prop::collection::vec("[a-z]{1,12}", 1..20),
            width in 1usize..30,
        ) {
            let m = Measurer::default();
            for line in wrap(&words.join(" "), width, WrapMode::Normal, &m) {
                prop_assert!(m.line_width(&line) <= width);
            }
        }

        #[test]
        fn truncate_is_idempotent(
            text in "[a-z 日本]{0,20}",
            width in 1usize..15,
        ) {
            let m = Measurer::default();
            let once = wrap(&text, width, WrapMode::Truncate, &m);
            let twice = wrap(&once.join("\n"), width, WrapMode::Truncate, &m);
            prop_assert_eq!(&once, &twice);
            prop_assert!(m.line_width(&once[0]) <= width);
        }
    }
}
