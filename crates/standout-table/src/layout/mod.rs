//! The layout engine: from raw cell text to per-line formatting contexts.
//!
//! A render pass runs these stages in order:
//!
//! 1. **Ingest** ([`Layout::ingest`]): trim whitespace, expand tabs and
//!    auto-format header text.
//! 2. **Count** ([`Layout::column_count`]): settle the number of columns,
//!    padding short rows with empty cells.
//! 3. **Resolve** ([`Layout::resolve_widths`]): one width per column, shared
//!    by every section (see [`WidthResolver`]).
//! 4. **Fit** ([`Layout::cells`]): merge identical neighbours, then wrap
//!    every cell that is drawn at its own width or its span's width.
//! 5. **Frame** ([`ContextBuilder`]): split rows into display lines and
//!    expose each one to a renderer with its neighbours.
//!
//! Merge decisions compare the ingested text, before any wrapping, so two
//! cells that wrap differently can still merge.

mod context;
mod merge;
mod resolve;
mod types;
mod width;
mod wrap;

pub use context::{
    line_context, row_height, span_width, CellContext, CellMap, ContextBuilder, Frame,
    LineContext, RuleContext, RuleKind,
};
pub use merge::{horizontal_groups, resolve_merges};
pub use resolve::{ResolvedWidths, WidthResolver};
pub use types::{
    Align, Cell, Location, MergeMode, MergeSpan, MergeState, Padding, Position, WrapMode,
};
pub use width::{Measurer, BREAK_MARKER, DEFAULT_TAB_WIDTH, ELLIPSIS};
pub use wrap::wrap;

use tracing::debug;

use crate::config::Config;
use crate::error::{Result, TableError};

/// Raw rows of one section, paired with the section they belong to.
pub type SectionRows<'a> = (Position, &'a [Vec<String>]);

/// Runs the layout stages for a [`Config`].
#[derive(Clone, Copy, Debug)]
pub struct Layout<'c> {
    config: &'c Config,
    measurer: Measurer,
}

impl<'c> Layout<'c> {
    /// Validate `config` and prepare a layout pass for it.
    pub fn new(config: &'c Config) -> Result<Self> {
        config.validate()?;
        Ok(Layout {
            config,
            measurer: config.measurer(),
        })
    }

    pub fn measurer(&self) -> Measurer {
        self.measurer
    }

    /// Normalize the cells of one row for the section at `position`.
    pub fn ingest<S: AsRef<str>>(&self, position: Position, row: &[S]) -> Vec<String> {
        let auto_format = self.config.section_for(position).auto_formats(position);
        row.iter()
            .map(|cell| self.ingest_cell(cell.as_ref(), auto_format))
            .collect()
    }

    fn ingest_cell(&self, text: &str, auto_format: bool) -> String {
        let mut text = if self.config.trim_space {
            width::segments(text.trim())
                .map(str::trim)
                .collect::<Vec<_>>()
                .join("\n")
        } else {
            text.to_string()
        };
        if self.config.trim_tab {
            text = self.measurer.expand_tabs(&text);
        }
        if auto_format {
            text = text.replace('_', " ").to_uppercase();
        }
        text
    }

    /// Number of columns the table is drawn with.
    ///
    /// Without strict mode this is the widest row of any section. In strict
    /// mode the first row (header first, then body, then footer) fixes the
    /// count and any wider row is an error.
    pub fn column_count(&self, sections: &[SectionRows<'_>]) -> Result<usize> {
        let widest = sections
            .iter()
            .flat_map(|(_, rows)| rows.iter().map(Vec::len))
            .max()
            .unwrap_or(0);
        if !self.config.strict {
            return Ok(widest);
        }

        let established = sections
            .iter()
            .find_map(|(_, rows)| rows.first().map(Vec::len))
            .unwrap_or(0);
        for (position, rows) in sections {
            check_row_lengths(*position, rows, established, 0)?;
        }
        Ok(established)
    }

    /// Resolve the shared column widths from the content of every section.
    pub fn resolve_widths(
        &self,
        columns: usize,
        sections: &[SectionRows<'_>],
    ) -> Result<ResolvedWidths> {
        let mut resolver = WidthResolver::new(self.measurer, columns);
        for (position, rows) in sections {
            resolver.measure(rows, self.config.section_for(*position).wrap);
        }
        resolver
            .overrides(&self.config.widths)
            .padding(
                (0..columns)
                    .map(|c| self.config.padding_for(c).width())
                    .collect(),
            )
            .separator_width(self.config.separator_width())
            .max_width(self.config.max_width);
        resolver.resolve()
    }

    /// Merge and wrap the rows of one section against resolved widths.
    ///
    /// Short rows are padded with empty cells up to `columns`. Cells hidden
    /// inside a span (to the right of a horizontal start, or below a vertical
    /// one) are left blank; a horizontal span start is wrapped at the width
    /// of the whole span.
    pub fn cells(
        &self,
        position: Position,
        rows: &[Vec<String>],
        columns: usize,
        widths: &ResolvedWidths,
        merge: MergeMode,
    ) -> Vec<Vec<Cell>> {
        let section = self.config.section_for(position);
        let rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                let mut row = row.clone();
                row.resize(columns, String::new());
                row
            })
            .collect();
        let paddings: Vec<_> = (0..columns).map(|c| self.config.padding_for(c)).collect();
        let separator = self.config.separator_width();

        let merges = resolve_merges(&rows, merge);
        let cells: Vec<Vec<Cell>> = rows
            .into_iter()
            .zip(merges)
            .map(|(row, states)| {
                row.into_iter()
                    .zip(states)
                    .enumerate()
                    .map(|(c, (text, state))| {
                        let lines = if state.covered_horizontally() || state.continues_from_above()
                        {
                            vec![String::new()]
                        } else {
                            let span = state.column_span();
                            let width = if span > 1 {
                                span_width(widths, c, span, separator, |i| paddings[i])
                            } else {
                                widths.get(c).unwrap_or(1)
                            };
                            let width = section
                                .max_widths
                                .get(&c)
                                .map_or(width, |&cap| width.min(cap));
                            wrap(&text, width, section.wrap, &self.measurer)
                        };
                        Cell {
                            text,
                            lines,
                            align: section.align_for(c, position),
                            padding: paddings[c],
                            wrap: section.wrap,
                            merge: state,
                        }
                    })
                    .collect()
            })
            .collect();

        debug!(
            section = %position,
            rows = cells.len(),
            lines = cells.iter().map(|row| row_height(row)).sum::<usize>(),
            "laid out section"
        );
        cells
    }
}

/// Reject rows with more than `columns` cells. `first_row` numbers the first
/// row of `rows` in error reports.
pub(crate) fn check_row_lengths(
    section: Position,
    rows: &[Vec<String>],
    columns: usize,
    first_row: usize,
) -> Result<()> {
    match rows.iter().position(|row| row.len() > columns) {
        Some(index) => Err(TableError::TooManyCells {
            section,
            row: first_row + index,
            cells: rows[index].len(),
            columns,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(row: &[&str]) -> Vec<String> {
        row.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn ingest_trims_and_formats_header() {
        let config = Config::default();
        let layout = Layout::new(&config).unwrap();

        assert_eq!(
            layout.ingest(Position::Header, &["  first_name ", "age"]),
            vec!["FIRST NAME", "AGE"]
        );
        assert_eq!(
            layout.ingest(Position::Body, &["  a  \n  b ", "x_y"]),
            vec!["a\nb", "x_y"]
        );
    }

    #[test]
    fn ingest_expands_tabs() {
        let config = Config::new().tab_width(4);
        let layout = Layout::new(&config).unwrap();
        assert_eq!(layout.ingest(Position::Body, &["a\tb"]), vec!["a   b"]);

        let config = Config::new().trim_tab(false);
        let layout = Layout::new(&config).unwrap();
        assert_eq!(layout.ingest(Position::Body, &["a\tb"]), vec!["a\tb"]);
    }

    #[test]
    fn ingest_keeps_space_without_trim() {
        let config = Config::new().trim_space(false);
        let layout = Layout::new(&config).unwrap();
        assert_eq!(layout.ingest(Position::Body, &[" a "]), vec![" a "]);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = Config::new().tab_width(0);
        assert!(matches!(
            Layout::new(&config),
            Err(TableError::InvalidTabWidth)
        ));
    }

    #[test]
    fn column_count_tolerates_ragged_rows() {
        let config = Config::default();
        let layout = Layout::new(&config).unwrap();
        let header = vec![strings(&["A", "B"])];
        let body = vec![strings(&["1"]), strings(&["1", "2", "3"])];

        let count = layout
            .column_count(&[(Position::Header, &header[..]), (Position::Body, &body[..])])
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn strict_column_count_rejects_wide_rows() {
        let config = Config::new().strict(true);
        let layout = Layout::new(&config).unwrap();
        let header = vec![strings(&["A", "B"])];
        let body = vec![strings(&["1"]), strings(&["1", "2", "3"])];

        let err = layout
            .column_count(&[(Position::Header, &header[..]), (Position::Body, &body[..])])
            .unwrap_err();
        assert!(matches!(
            err,
            TableError::TooManyCells {
                section: Position::Body,
                row: 1,
                cells: 3,
                columns: 2
            }
        ));

        let narrow = vec![strings(&["1"])];
        assert_eq!(
            layout
                .column_count(&[(Position::Header, &header[..]), (Position::Body, &narrow[..])])
                .unwrap(),
            2
        );
    }

    #[test]
    fn widths_are_shared_across_sections() {
        let config = Config::default();
        let layout = Layout::new(&config).unwrap();
        let header = vec![layout.ingest(Position::Header, &["Name", "Age"])];
        let body = vec![strings(&["Alice", "30"])];
        let sections = [(Position::Header, &header[..]), (Position::Body, &body[..])];

        let widths = layout.resolve_widths(2, &sections).unwrap();
        assert_eq!(widths.widths, vec![5, 3]);
    }

    #[test]
    fn widths_respect_global_cap() {
        let config = Config::new().max_width(20);
        let layout = Layout::new(&config).unwrap();
        let body = vec![strings(&["the quick brown fox", "jumps"])];

        let widths = layout
            .resolve_widths(2, &[(Position::Body, &body[..])])
            .unwrap();
        // 2 columns of padding each plus one separator
        assert_eq!(widths.total() + 4 + 1, 20);
    }

    #[test]
    fn cells_wrap_at_resolved_width() {
        let config = Config::default();
        let layout = Layout::new(&config).unwrap();
        let rows = vec![strings(&["hello world", "x"])];
        let widths = ResolvedWidths::from(vec![5, 1]);

        let cells = layout.cells(Position::Body, &rows, 2, &widths, MergeMode::None);
        assert_eq!(cells[0][0].lines, vec!["hello", "world"]);
        assert_eq!(cells[0][0].align, Align::Left);
        assert_eq!(cells[0][1].lines, vec!["x"]);
    }

    #[test]
    fn cells_pad_short_rows() {
        let config = Config::default();
        let layout = Layout::new(&config).unwrap();
        let rows = vec![strings(&["a"])];
        let widths = ResolvedWidths::from(vec![1, 1, 1]);

        let cells = layout.cells(Position::Body, &rows, 3, &widths, MergeMode::None);
        assert_eq!(cells[0].len(), 3);
        assert_eq!(cells[0][2].text, "");
        assert_eq!(cells[0][2].lines, vec![""]);
    }

    #[test]
    fn vertical_continuations_are_blank() {
        let config = Config::default();
        let layout = Layout::new(&config).unwrap();
        let rows = vec![strings(&["A", "1"]), strings(&["A", "2"])];
        let widths = ResolvedWidths::from(vec![1, 1]);

        let cells = layout.cells(Position::Body, &rows, 2, &widths, MergeMode::Vertical);
        assert_eq!(cells[0][0].lines, vec!["A"]);
        assert_eq!(cells[1][0].lines, vec![""]);
        assert_eq!(cells[1][0].text, "A");
        assert!(cells[1][0].merge.continues_from_above());
    }

    #[test]
    fn horizontal_span_wraps_at_span_width() {
        let config = Config::default();
        let layout = Layout::new(&config).unwrap();
        let rows = vec![strings(&["same text", "same text"])];
        let widths = ResolvedWidths::from(vec![4, 4]);

        let cells = layout.cells(Position::Body, &rows, 2, &widths, MergeMode::Horizontal);
        // 4 + 4 + 1 + 1 padding + 1 separator = 11 fits the whole text
        assert_eq!(cells[0][0].lines, vec!["same text"]);
        assert_eq!(cells[0][1].lines, vec![""]);
    }

    #[test]
    fn section_max_width_caps_wrapping_only() {
        let config = Config::new().body(Config::section().max_width(0, 3));
        let layout = Layout::new(&config).unwrap();
        let rows = vec![strings(&["abc def"])];
        let widths = ResolvedWidths::from(vec![7]);

        let cells = layout.cells(Position::Body, &rows, 1, &widths, MergeMode::None);
        assert_eq!(cells[0][0].lines, vec!["abc", "def"]);
    }
}
