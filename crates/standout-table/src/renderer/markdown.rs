//! GitHub-flavoured Markdown tables.
//!
//! Markdown has no spans, so a merged cell keeps its text in the first
//! column it covers and leaves the rest empty. A Markdown row cannot hold
//! several lines either: the display lines of one row are joined with
//! `<br>` and blank padding lines are dropped. Column widths are still
//! honoured, which keeps the source readable. The delimiter row after the
//! header carries the body alignment of each column.

use std::io::{self, Write};

use super::Renderer;
use crate::layout::{Align, Frame, LineContext, RuleContext, RuleKind};

/// Renders tables as Markdown.
#[derive(Clone, Debug, Default)]
pub struct MarkdownRenderer {
    /// Cells of the row being collected, one entry per column.
    pending: Vec<(String, Align)>,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Format one display line as a Markdown row.
    pub fn format_line(&self, ctx: &LineContext<'_>) -> String {
        format_row(ctx, &line_cells(ctx))
    }

    /// The delimiter row written below the header.
    pub fn format_delimiter(&self, ctx: &RuleContext<'_>) -> String {
        let aligned = ctx.below.or(ctx.above);
        let mut line = String::from("|");
        for column in 0..ctx.widths.len() {
            let dashes = ctx.widths.get(column).unwrap_or(1) + 2;
            line.push_str(&marker(alignment(aligned, column), dashes));
            line.push('|');
        }
        line
    }

    fn collect(&mut self, ctx: &LineContext<'_>) {
        let cells = line_cells(ctx);
        if ctx.current.is_first_line() || self.pending.len() != cells.len() {
            self.pending = cells;
            return;
        }
        for ((joined, _), (data, _)) in self.pending.iter_mut().zip(cells) {
            if data.is_empty() {
                continue;
            }
            if !joined.is_empty() {
                joined.push_str("<br>");
            }
            joined.push_str(&data);
        }
    }
}

impl Renderer for MarkdownRenderer {
    fn line(&mut self, out: &mut dyn Write, ctx: &LineContext<'_>) -> io::Result<()> {
        self.collect(ctx);
        if ctx.current.is_last_line() {
            let cells = std::mem::take(&mut self.pending);
            writeln!(out, "{}", format_row(ctx, &cells))?;
        }
        Ok(())
    }

    fn rule(&mut self, out: &mut dyn Write, ctx: &RuleContext<'_>) -> io::Result<()> {
        if ctx.kind == RuleKind::Header {
            writeln!(out, "{}", self.format_delimiter(ctx))?;
        }
        Ok(())
    }
}

/// Escaped text and alignment of every column on one display line.
fn line_cells(ctx: &LineContext<'_>) -> Vec<(String, Align)> {
    (0..ctx.widths.len())
        .map(|column| match ctx.current.cell(column) {
            Some(cell) if !cell.merge.covered_horizontally() => {
                (escape(cell.data.trim_end()), cell.align)
            }
            _ => (String::new(), Align::Left),
        })
        .collect()
}

fn format_row(ctx: &LineContext<'_>, cells: &[(String, Align)]) -> String {
    let mut line = String::from("|");
    for (column, (data, align)) in cells.iter().enumerate() {
        let width = ctx.widths.get(column).unwrap_or(0);
        line.push(' ');
        line.push_str(&ctx.measurer.pad(data, width, *align));
        line.push_str(" |");
    }
    line
}

fn alignment(frame: Option<&Frame>, column: usize) -> Align {
    frame
        .and_then(|f| f.cell(column))
        .map_or(Align::Left, |cell| cell.align)
}

/// A delimiter cell of `width` characters with alignment colons.
fn marker(align: Align, width: usize) -> String {
    let width = width.max(3);
    match align {
        Align::Center => format!(":{}:", "-".repeat(width - 2)),
        Align::Right => format!("{}:", "-".repeat(width - 1)),
        Align::Left | Align::None => format!(":{}", "-".repeat(width - 1)),
    }
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|")
}
