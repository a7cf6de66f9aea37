//! Formatting contexts handed to renderers.
//!
//! The layout engine turns every row into one [`Frame`] per display line.
//! A renderer never sees rows directly: it receives a [`LineContext`] for
//! each line, which exposes the line's cells together with the lines drawn
//! just before and after it, and a [`RuleContext`] for every horizontal
//! boundary. Adjacency crosses sections, so the first body line sees the
//! last header line as its predecessor.

use std::collections::HashMap;

use super::resolve::ResolvedWidths;
use super::types::{Align, Cell, Location, MergeState, Padding, Position};
use super::width::Measurer;

/// Cells of one display line keyed by column index.
pub type CellMap = HashMap<usize, CellContext>;

/// One cell as it appears on a single display line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellContext {
    /// Text for this line, without padding. Empty for blank lines.
    pub data: String,
    /// Resolved alignment.
    pub align: Align,
    /// Resolved padding.
    pub padding: Padding,
    /// Content width available to the cell; a horizontal span start gets
    /// the width of the whole span.
    pub width: usize,
    /// Merge participation.
    pub merge: MergeState,
}

/// One physical output line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Section the row belongs to.
    pub position: Position,
    /// Where the row sits within its section.
    pub location: Location,
    /// Index of the row within its section.
    pub row: usize,
    /// Index of this line within the row.
    pub line: usize,
    /// Number of display lines the row occupies.
    pub lines: usize,
    /// Cells of this line.
    pub cells: CellMap,
}

impl Frame {
    /// Whether this is the first display line of its row.
    pub fn is_first_line(&self) -> bool {
        self.line == 0
    }

    /// Whether this is the last display line of its row.
    pub fn is_last_line(&self) -> bool {
        self.line + 1 >= self.lines
    }

    /// Cell at `column`, if the line has one.
    pub fn cell(&self, column: usize) -> Option<&CellContext> {
        self.cells.get(&column)
    }

    /// Merge state of `column`; unmerged when the column is missing.
    pub fn merge(&self, column: usize) -> MergeState {
        self.cell(column).map(|c| c.merge).unwrap_or_default()
    }

    /// Drawn units of the line as `(start, span)` pairs over `columns` columns.
    pub fn groups(&self, columns: usize) -> Vec<(usize, usize)> {
        let states: Vec<MergeState> = (0..columns).map(|c| self.merge(c)).collect();
        super::merge::horizontal_groups(&states)
    }
}

/// Everything a renderer knows when drawing one display line.
#[derive(Clone, Copy, Debug)]
pub struct LineContext<'a> {
    /// Final column widths.
    pub widths: &'a ResolvedWidths,
    /// The line being drawn.
    pub current: &'a Frame,
    /// The line drawn just before, in any section.
    pub previous: Option<&'a Frame>,
    /// The line drawn just after, in any section. Always `None` in streaming
    /// mode for the last line of a row.
    pub next: Option<&'a Frame>,
    /// Width of one column separator (0 when separators are off).
    pub separator_width: usize,
    /// Measurer for padding and aligning the cell text.
    pub measurer: Measurer,
}

impl<'a> LineContext<'a> {
    pub fn position(&self) -> Position {
        self.current.position
    }

    pub fn location(&self) -> Location {
        self.current.location
    }

    pub fn cells(&self) -> &'a CellMap {
        &self.current.cells
    }
}

/// The kind of boundary a rule is drawn at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Above the first line of the table.
    Top,
    /// Between the header and what follows it.
    Header,
    /// Between two body rows.
    Row,
    /// Between the body and the footer.
    Footer,
    /// Below the last line of the table.
    Bottom,
}

/// Everything a renderer knows when drawing a horizontal rule.
#[derive(Clone, Copy, Debug)]
pub struct RuleContext<'a> {
    pub kind: RuleKind,
    pub widths: &'a ResolvedWidths,
    /// Line just above the rule.
    pub above: Option<&'a Frame>,
    /// Line just below the rule.
    pub below: Option<&'a Frame>,
    pub separator_width: usize,
}

impl RuleContext<'_> {
    /// Whether the cell below the rule at `column` continues a vertical span
    /// from above, in which case the rule is interrupted there.
    pub fn is_gap(&self, column: usize) -> bool {
        self.below
            .is_some_and(|frame| frame.merge(column).continues_from_above())
    }

    /// Whether a column separator meets the rule at the boundary before
    /// `column`, from above and from below.
    pub fn separator_arms(&self, column: usize) -> (bool, bool) {
        let crosses = |frame: Option<&Frame>| {
            frame.is_some_and(|f| !f.merge(column).covered_horizontally())
        };
        (crosses(self.above), crosses(self.below))
    }
}

/// Builds [`Frame`]s from laid-out rows.
///
/// ```rust
/// use standout_table::layout::{Cell, ContextBuilder, Position, ResolvedWidths};
///
/// let widths = ResolvedWidths::from(vec![5, 3]);
/// let mut builder = ContextBuilder::new(&widths, 1);
/// builder.section(Position::Body, &[vec![Cell::new("Alice"), Cell::new("30")]]);
/// let frames = builder.build();
///
/// assert_eq!(frames.len(), 1);
/// assert_eq!(frames[0].cells[&0].data, "Alice");
/// ```
#[derive(Debug)]
pub struct ContextBuilder<'a> {
    widths: &'a ResolvedWidths,
    separator_width: usize,
    frames: Vec<Frame>,
}

impl<'a> ContextBuilder<'a> {
    pub fn new(widths: &'a ResolvedWidths, separator_width: usize) -> Self {
        ContextBuilder {
            widths,
            separator_width,
            frames: Vec::new(),
        }
    }

    /// Append every row of a section, numbering rows from 0.
    pub fn section(&mut self, position: Position, rows: &[Vec<Cell>]) -> &mut Self {
        for (index, row) in rows.iter().enumerate() {
            let location = Location::of(index, rows.len());
            self.row(position, location, index, row);
        }
        self
    }

    /// Append the display lines of a single row.
    ///
    /// The row is as tall as its tallest cell plus that cell's vertical
    /// padding; shorter cells are filled with blank lines. Top padding lines
    /// come first, then the cell's wrapped lines.
    pub fn row(
        &mut self,
        position: Position,
        location: Location,
        index: usize,
        cells: &[Cell],
    ) -> &mut Self {
        let lines = row_height(cells);
        for line in 0..lines {
            let map: CellMap = cells
                .iter()
                .enumerate()
                .map(|(column, cell)| (column, self.cell_line(cells, column, cell, line)))
                .collect();
            self.frames.push(Frame {
                position,
                location,
                row: index,
                line,
                lines,
                cells: map,
            });
        }
        self
    }

    pub fn build(self) -> Vec<Frame> {
        self.frames
    }

    fn cell_line(&self, row: &[Cell], column: usize, cell: &Cell, line: usize) -> CellContext {
        let data = line
            .checked_sub(cell.padding.top)
            .and_then(|i| cell.lines.get(i))
            .cloned()
            .unwrap_or_default();
        CellContext {
            data,
            align: cell.align,
            padding: cell.padding,
            width: self.cell_width(row, column, cell),
            merge: cell.merge,
        }
    }

    fn cell_width(&self, row: &[Cell], column: usize, cell: &Cell) -> usize {
        let span = cell.merge.column_span().min(row.len() - column);
        if span <= 1 {
            return self.widths.get(column).unwrap_or(0);
        }
        span_width(self.widths, column, span, self.separator_width, |c| {
            row[c].padding
        })
    }
}

/// Display lines of a row: the tallest cell plus its vertical padding.
pub fn row_height(cells: &[Cell]) -> usize {
    cells
        .iter()
        .map(|cell| cell.height() + cell.padding.top + cell.padding.bottom)
        .max()
        .unwrap_or(1)
        .max(1)
}

/// Content width of a horizontal span: the member widths plus the padding
/// and separators between them.
pub fn span_width(
    widths: &ResolvedWidths,
    start: usize,
    span: usize,
    separator_width: usize,
    padding: impl Fn(usize) -> Padding,
) -> usize {
    let last = start + span - 1;
    let interior: usize = (start..last)
        .map(|c| padding(c).right + padding(c + 1).left + separator_width)
        .sum();
    widths.span_total(start, span) + interior
}

/// Context for the line at `index` in `frames`, with adjacency taken from
/// the neighbouring frames.
pub fn line_context<'a>(
    frames: &'a [Frame],
    index: usize,
    widths: &'a ResolvedWidths,
    separator_width: usize,
    measurer: Measurer,
) -> LineContext<'a> {
    LineContext {
        widths,
        current: &frames[index],
        previous: index.checked_sub(1).and_then(|i| frames.get(i)),
        next: frames.get(index + 1),
        separator_width,
        measurer,
    }
}
