//! Box-drawing tables.
//!
//! ```text
//! ┌───────┬─────┐
//! │ NAME  │ AGE │
//! ├───────┼─────┤
//! │ Alice │ 30  │
//! └───────┴─────┘
//! ```
//!
//! Junctions are chosen from the lines that meet at each point, so merged
//! cells are drawn without a line through them: a rule is interrupted above
//! a vertical continuation, and no column line is drawn inside a horizontal
//! span.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use super::Renderer;
use crate::layout::{LineContext, RuleContext, RuleKind};

/// Border style for table decoration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// No borders; columns are separated by a space.
    None,
    /// ASCII borders: +, -, |
    Ascii,
    /// Light Unicode box-drawing characters: ┌, ─, ┐, │, └, ┘, ├, ┼, ┤, ┬, ┴
    #[default]
    Light,
    /// Heavy Unicode box-drawing characters: ┏, ━, ┓, ┃, ┗, ┛, ┣, ╋, ┫, ┳, ┻
    Heavy,
    /// Double-line Unicode box-drawing: ╔, ═, ╗, ║, ╚, ╝, ╠, ╬, ╣, ╦, ╩
    Double,
    /// Rounded corners with light lines: ╭, ─, ╮, │, ╰, ╯, ├, ┼, ┤, ┬, ┴
    Rounded,
}

impl BorderStyle {
    fn chars(&self) -> BorderChars {
        match self {
            BorderStyle::None => BorderChars::empty(),
            BorderStyle::Ascii => BorderChars {
                horizontal: '-',
                vertical: '|',
                top_left: '+',
                top_right: '+',
                bottom_left: '+',
                bottom_right: '+',
                left_t: '+',
                cross: '+',
                right_t: '+',
                top_t: '+',
                bottom_t: '+',
            },
            BorderStyle::Light => BorderChars {
                horizontal: '─',
                vertical: '│',
                top_left: '┌',
                top_right: '┐',
                bottom_left: '└',
                bottom_right: '┘',
                left_t: '├',
                cross: '┼',
                right_t: '┤',
                top_t: '┬',
                bottom_t: '┴',
            },
            BorderStyle::Heavy => BorderChars {
                horizontal: '━',
                vertical: '┃',
                top_left: '┏',
                top_right: '┓',
                bottom_left: '┗',
                bottom_right: '┛',
                left_t: '┣',
                cross: '╋',
                right_t: '┫',
                top_t: '┳',
                bottom_t: '┻',
            },
            BorderStyle::Double => BorderChars {
                horizontal: '═',
                vertical: '║',
                top_left: '╔',
                top_right: '╗',
                bottom_left: '╚',
                bottom_right: '╝',
                left_t: '╠',
                cross: '╬',
                right_t: '╣',
                top_t: '╦',
                bottom_t: '╩',
            },
            BorderStyle::Rounded => BorderChars {
                horizontal: '─',
                vertical: '│',
                top_left: '╭',
                top_right: '╮',
                bottom_left: '╰',
                bottom_right: '╯',
                left_t: '├',
                cross: '┼',
                right_t: '┤',
                top_t: '┬',
                bottom_t: '┴',
            },
        }
    }
}

/// Box-drawing characters for a border style.
#[derive(Clone, Copy, Debug)]
struct BorderChars {
    horizontal: char,
    vertical: char,
    top_left: char,
    top_right: char,
    bottom_left: char,
    bottom_right: char,
    left_t: char,
    cross: char,
    right_t: char,
    top_t: char,
    bottom_t: char,
}

impl BorderChars {
    fn empty() -> Self {
        BorderChars {
            horizontal: ' ',
            vertical: ' ',
            top_left: ' ',
            top_right: ' ',
            bottom_left: ' ',
            bottom_right: ' ',
            left_t: ' ',
            cross: ' ',
            right_t: ' ',
            top_t: ' ',
            bottom_t: ' ',
        }
    }

    /// The character where lines arrive from the given directions.
    fn junction(&self, up: bool, down: bool, left: bool, right: bool) -> char {
        match (up, down, left, right) {
            (true, true, true, true) => self.cross,
            (false, true, true, true) => self.top_t,
            (true, false, true, true) => self.bottom_t,
            (true, true, false, true) => self.left_t,
            (true, true, true, false) => self.right_t,
            (false, true, false, true) => self.top_left,
            (false, true, true, false) => self.top_right,
            (true, false, false, true) => self.bottom_left,
            (true, false, true, false) => self.bottom_right,
            (false, false, false, false) => ' ',
            (_, _, false, false) => self.vertical,
            (false, false, _, _) => self.horizontal,
        }
    }
}

/// Renders tables with box-drawing borders.
#[derive(Clone, Debug, Default)]
pub struct BorderRenderer {
    style: BorderStyle,
    row_separator: bool,
}

impl BorderRenderer {
    pub fn new(style: BorderStyle) -> Self {
        BorderRenderer {
            style,
            row_separator: false,
        }
    }

    /// Draw a rule between body rows.
    pub fn row_separator(mut self, enable: bool) -> Self {
        self.row_separator = enable;
        self
    }

    pub fn style(&self) -> BorderStyle {
        self.style
    }

    fn bordered(&self) -> bool {
        self.style != BorderStyle::None
    }

    /// Format one display line, without the trailing newline.
    pub fn format_line(&self, ctx: &LineContext<'_>) -> String {
        let chars = self.style.chars();
        let mut line = String::new();
        if self.bordered() {
            line.push(chars.vertical);
        }
        for (start, span) in ctx.current.groups(ctx.widths.len()) {
            if start > 0 && ctx.separator_width > 0 {
                line.push(chars.vertical);
            }
            let Some(cell) = ctx.current.cell(start) else {
                continue;
            };
            let right = ctx
                .current
                .cell(start + span - 1)
                .map_or(cell.padding.right, |last| last.padding.right);
            line.extend(std::iter::repeat_n(' ', cell.padding.left));
            line.push_str(&ctx.measurer.pad(&cell.data, cell.width, cell.align));
            line.extend(std::iter::repeat_n(' ', right));
        }
        if self.bordered() {
            line.push(chars.vertical);
        }
        line
    }

    /// Format the rule for a boundary, or `None` when nothing is drawn there.
    pub fn format_rule(&self, ctx: &RuleContext<'_>) -> Option<String> {
        if !self.bordered() || (ctx.kind == RuleKind::Row && !self.row_separator) {
            return None;
        }
        let columns = ctx.widths.len();
        if columns == 0 {
            return None;
        }
        let chars = self.style.chars();
        let frame = ctx.below.or(ctx.above);
        let has_above = ctx.above.is_some();
        let has_below = ctx.below.is_some();
        let drawn = |column: usize| !ctx.is_gap(column);

        let mut line = String::new();
        line.push(chars.junction(has_above, has_below, false, drawn(0)));
        for column in 0..columns {
            if column > 0 && ctx.separator_width > 0 {
                let (up, down) = ctx.separator_arms(column);
                line.push(chars.junction(up, down, drawn(column - 1), drawn(column)));
            }
            let padding = frame
                .and_then(|f| f.cell(column))
                .map(|c| c.padding)
                .unwrap_or_default();
            let slot = padding.left + ctx.widths.get(column).unwrap_or(0) + padding.right;
            let fill = if drawn(column) { chars.horizontal } else { ' ' };
            line.extend(std::iter::repeat_n(fill, slot));
        }
        line.push(chars.junction(has_above, has_below, drawn(columns - 1), false));
        Some(line)
    }
}

impl Renderer for BorderRenderer {
    fn line(&mut self, out: &mut dyn Write, ctx: &LineContext<'_>) -> io::Result<()> {
        writeln!(out, "{}", self.format_line(ctx))
    }

    fn rule(&mut self, out: &mut dyn Write, ctx: &RuleContext<'_>) -> io::Result<()> {
        match self.format_rule(ctx) {
            Some(rule) => writeln!(out, "{}", rule),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{
        line_context, Cell, ContextBuilder, Frame, Measurer, MergeSpan, Position,
        ResolvedWidths,
    };

    fn frames(widths: &ResolvedWidths, rows: Vec<Vec<Cell>>) -> Vec<Frame> {
        let mut builder = ContextBuilder::new(widths, 1);
        builder.section(Position::Body, &rows);
        builder.build()
    }

    fn rule<'a>(
        kind: RuleKind,
        widths: &'a ResolvedWidths,
        above: Option<&'a Frame>,
        below: Option<&'a Frame>,
    ) -> RuleContext<'a> {
        RuleContext {
            kind,
            widths,
            above,
            below,
            separator_width: 1,
        }
    }

    #[test]
    fn border_style_default() {
        assert_eq!(BorderStyle::default(), BorderStyle::Light);
    }

    #[test]
    fn junction_table() {
        let c = BorderStyle::Light.chars();
        assert_eq!(c.junction(true, true, true, true), '┼');
        assert_eq!(c.junction(false, true, true, true), '┬');
        assert_eq!(c.junction(true, false, true, true), '┴');
        assert_eq!(c.junction(true, true, false, true), '├');
        assert_eq!(c.junction(true, true, true, false), '┤');
        assert_eq!(c.junction(false, true, false, true), '┌');
        assert_eq!(c.junction(true, false, true, false), '┘');
        assert_eq!(c.junction(false, false, true, true), '─');
        assert_eq!(c.junction(true, true, false, false), '│');
    }

    #[test]
    fn line_with_light_border() {
        let widths = ResolvedWidths::from(vec![5, 3]);
        let frames = frames(&widths, vec![vec![Cell::new("Alice"), Cell::new("30")]]);
        let ctx = line_context(&frames, 0, &widths, 1, Measurer::default());

        let line = BorderRenderer::new(BorderStyle::Light).format_line(&ctx);
        assert_eq!(line, "│ Alice │ 30  │");
    }

    #[test]
    fn line_without_border() {
        let widths = ResolvedWidths::from(vec![5, 3]);
        let frames = frames(&widths, vec![vec![Cell::new("Alice"), Cell::new("30")]]);
        let ctx = line_context(&frames, 0, &widths, 1, Measurer::default());

        let renderer = BorderRenderer::new(BorderStyle::None);
        assert_eq!(renderer.format_line(&ctx), " Alice   30  ");
        let top = rule(RuleKind::Top, &widths, None, Some(&frames[0]));
        assert_eq!(renderer.format_rule(&top), None);
    }

    #[test]
    fn outer_rules() {
        let widths = ResolvedWidths::from(vec![2, 1]);
        let frames = frames(&widths, vec![vec![Cell::new("ab"), Cell::new("c")]]);
        let renderer = BorderRenderer::new(BorderStyle::Ascii);

        let top = rule(RuleKind::Top, &widths, None, Some(&frames[0]));
        assert_eq!(renderer.format_rule(&top).unwrap(), "+----+---+");
        let bottom = rule(RuleKind::Bottom, &widths, Some(&frames[0]), None);
        assert_eq!(renderer.format_rule(&bottom).unwrap(), "+----+---+");

        let rounded = BorderRenderer::new(BorderStyle::Rounded);
        assert_eq!(rounded.format_rule(&top).unwrap(), "╭────┬───╮");
        assert_eq!(rounded.format_rule(&bottom).unwrap(), "╰────┴───╯");
    }

    #[test]
    fn row_rules_are_optional() {
        let widths = ResolvedWidths::from(vec![1]);
        let frames = frames(&widths, vec![vec![Cell::new("a")], vec![Cell::new("b")]]);
        let between = rule(RuleKind::Row, &widths, Some(&frames[0]), Some(&frames[1]));

        assert_eq!(BorderRenderer::new(BorderStyle::Light).format_rule(&between), None);
        assert_eq!(
            BorderRenderer::new(BorderStyle::Light)
                .row_separator(true)
                .format_rule(&between)
                .unwrap(),
            "├───┤"
        );
    }

    #[test]
    fn horizontal_span_has_no_column_line() {
        let widths = ResolvedWidths::from(vec![2, 2]);
        let mut start = Cell::new("merged");
        start.merge.horizontal = MergeSpan::member(0, 2);
        let mut rest = Cell::new("");
        rest.merge.horizontal = MergeSpan::member(1, 2);
        let frames = frames(
            &widths,
            vec![vec![start, rest], vec![Cell::new("a"), Cell::new("b")]],
        );
        let renderer = BorderRenderer::new(BorderStyle::Light).row_separator(true);

        let ctx = line_context(&frames, 0, &widths, 1, Measurer::default());
        assert_eq!(renderer.format_line(&ctx), "│ merged  │");

        let top = rule(RuleKind::Top, &widths, None, Some(&frames[0]));
        assert_eq!(renderer.format_rule(&top).unwrap(), "┌─────────┐");
        let between = rule(RuleKind::Row, &widths, Some(&frames[0]), Some(&frames[1]));
        assert_eq!(renderer.format_rule(&between).unwrap(), "├────┬────┤");
    }

    #[test]
    fn vertical_span_interrupts_rule() {
        let widths = ResolvedWidths::from(vec![1, 1]);
        let mut start = Cell::new("A");
        start.merge.vertical = MergeSpan::member(0, 2);
        let mut rest = Cell::new("");
        rest.merge.vertical = MergeSpan::member(1, 2);
        let frames = frames(
            &widths,
            vec![vec![start, Cell::new("1")], vec![rest, Cell::new("2")]],
        );
        let renderer = BorderRenderer::new(BorderStyle::Light).row_separator(true);

        let between = rule(RuleKind::Row, &widths, Some(&frames[0]), Some(&frames[1]));
        assert_eq!(renderer.format_rule(&between).unwrap(), "│   ├───┤");
    }

    #[test]
    fn styles_use_their_own_edges() {
        let widths = ResolvedWidths::from(vec![2]);
        let frames = frames(&widths, vec![vec![Cell::new("hi")]]);
        let ctx = line_context(&frames, 0, &widths, 1, Measurer::default());

        for (style, edge) in [
            (BorderStyle::Ascii, '|'),
            (BorderStyle::Light, '│'),
            (BorderStyle::Heavy, '┃'),
            (BorderStyle::Double, '║'),
            (BorderStyle::Rounded, '│'),
        ] {
            let line = BorderRenderer::new(style).format_line(&ctx);
            assert!(line.starts_with(edge), "{:?}", style);
            assert!(line.ends_with(edge), "{:?}", style);
        }
    }

    #[test]
    fn renderer_writes_lines() {
        let widths = ResolvedWidths::from(vec![1]);
        let frames = frames(&widths, vec![vec![Cell::new("x")]]);
        let ctx = line_context(&frames, 0, &widths, 1, Measurer::default());
        let mut out = Vec::new();

        let mut renderer = BorderRenderer::new(BorderStyle::Ascii);
        renderer.line(&mut out, &ctx).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "| x |\n");
    }
}
