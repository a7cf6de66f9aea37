//! The table accumulator.
//!
//! [`Table`] collects rows and writes them to any [`io::Write`] sink through
//! a [`Renderer`]. It works in one of two modes:
//!
//! - **Batch** (default): rows are buffered; [`Table::render`] measures all
//!   of them, so columns are exactly as wide as their content.
//! - **Streaming** ([`Config::stream`] or [`Table::start`]): widths are fixed
//!   when the stream starts, from the header and explicit widths, and every
//!   appended row is written at once. [`Table::close`] writes the footer.
//!
//! ```rust
//! use standout_table::Table;
//!
//! let mut table = Table::new(Vec::new());
//! table.header(["Name", "Age"]).unwrap();
//! table.append(["Alice", "30"]).unwrap();
//! table.render().unwrap();
//!
//! let out = String::from_utf8(table.into_inner()).unwrap();
//! assert_eq!(out, "\
//! ┌───────┬─────┐
//! │ NAME  │ AGE │
//! ├───────┼─────┤
//! │ Alice │ 30  │
//! └───────┴─────┘
//! ");
//! ```
//!
//! Streaming cannot see future rows, so only horizontal merges are applied
//! to streamed rows and the last line of each row has no lookahead.

use std::io::{self, Write};

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Result, TableError};
use crate::layout::{
    check_row_lengths, line_context, ContextBuilder, Frame, Layout, LineContext, Location,
    Measurer, MergeMode, Position, ResolvedWidths, RuleContext, RuleKind, WrapMode,
};
use crate::renderer::{BorderRenderer, Renderer};
use crate::traits::TableRow;

/// Buffers or streams rows and renders them to a sink.
pub struct Table<W: Write> {
    writer: W,
    config: Config,
    renderer: Box<dyn Renderer>,
    header: Vec<Vec<String>>,
    body: Vec<Vec<String>>,
    footer: Vec<Vec<String>>,
    stream: StreamState,
}

enum StreamState {
    Idle,
    Running(Stream),
    Closed,
}

/// State kept between streamed rows.
struct Stream {
    widths: ResolvedWidths,
    columns: usize,
    rows: usize,
    last: Option<Frame>,
}

impl<W: Write> Table<W> {
    /// Create a table with default settings and light borders.
    pub fn new(writer: W) -> Self {
        Self::with_config(writer, Config::default())
    }

    pub fn with_config(writer: W, config: Config) -> Self {
        Table {
            writer,
            config,
            renderer: Box::new(BorderRenderer::default()),
            header: Vec::new(),
            body: Vec::new(),
            footer: Vec::new(),
            stream: StreamState::Idle,
        }
    }

    /// Replace the output backend.
    pub fn renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Change the configuration.
    ///
    /// # Errors
    ///
    /// [`TableError::StreamActive`] while a stream is running.
    pub fn configure(&mut self, f: impl FnOnce(&mut Config)) -> Result<()> {
        self.ensure_not_streaming("configuration")?;
        f(&mut self.config);
        Ok(())
    }

    /// Fix the content width of one column.
    pub fn set_column_width(&mut self, column: usize, width: usize) -> Result<()> {
        self.ensure_not_streaming("column width")?;
        self.config.widths.insert(column, width);
        Ok(())
    }

    /// Cap the total table width (0 removes the cap).
    pub fn set_max_width(&mut self, width: usize) -> Result<()> {
        self.ensure_not_streaming("table width")?;
        self.config.max_width = width;
        Ok(())
    }

    /// Set the wrap mode of one section.
    pub fn set_wrap(&mut self, position: Position, wrap: WrapMode) -> Result<()> {
        self.ensure_not_streaming("wrap mode")?;
        self.config.section_for_mut(position).wrap = wrap;
        Ok(())
    }

    /// Set the header row.
    ///
    /// # Errors
    ///
    /// [`TableError::StreamActive`] once a stream has written its header.
    pub fn header<R: TableRow>(&mut self, row: R) -> Result<()> {
        self.ensure_not_streaming("header")?;
        self.header = vec![row.to_row()];
        Ok(())
    }

    /// Set the footer row. A running stream writes it on [`Table::close`].
    ///
    /// # Errors
    ///
    /// [`TableError::TooManyCells`] for a row wider than a streamed table.
    pub fn footer<R: TableRow>(&mut self, row: R) -> Result<()> {
        let footer = vec![row.to_row()];
        if let StreamState::Running(stream) = &self.stream {
            check_row_lengths(Position::Footer, &footer, stream.columns, 0)?;
        }
        self.footer = footer;
        Ok(())
    }

    /// Add a body row.
    ///
    /// In batch mode the row is buffered. When streaming (or when
    /// [`Config::stream`] is set, which starts the stream on first use) the
    /// row is written immediately.
    ///
    /// # Errors
    ///
    /// - [`TableError::StreamClosed`] after the stream was closed.
    /// - [`TableError::TooManyCells`] for a row wider than a streamed table,
    ///   or wider than the header in strict mode.
    /// - [`TableError::Io`] when writing a streamed row fails.
    pub fn append<R: TableRow>(&mut self, row: R) -> Result<()> {
        let row = row.to_row();
        match self.stream {
            StreamState::Closed => Err(TableError::StreamClosed),
            StreamState::Running(_) => self.stream_row(row),
            StreamState::Idle if self.config.stream => {
                self.start()?;
                self.stream_row(row)
            }
            StreamState::Idle => {
                self.check_strict(&row)?;
                self.body.push(row);
                Ok(())
            }
        }
    }

    /// Append every row of `rows`, stopping at the first error.
    pub fn bulk<R: TableRow, I: IntoIterator<Item = R>>(&mut self, rows: I) -> Result<()> {
        for row in rows {
            self.append(row)?;
        }
        Ok(())
    }

    /// Render the table.
    ///
    /// In batch mode this writes the whole table and keeps the rows, so it
    /// can be rendered again. In streaming mode it closes the stream,
    /// starting it first if nothing was appended yet.
    pub fn render(&mut self) -> Result<()> {
        match self.stream {
            StreamState::Closed => Err(TableError::StreamClosed),
            StreamState::Running(_) => self.close(),
            StreamState::Idle if self.config.stream => {
                self.start()?;
                self.close()
            }
            StreamState::Idle => self.render_batch(),
        }
    }

    /// Start streaming: fix the widths and write the header.
    ///
    /// The column count is the wider of the header and the highest column
    /// with an explicit width. A closed table can be started again.
    ///
    /// # Errors
    ///
    /// - [`TableError::StreamActive`] when a stream is already running.
    /// - [`TableError::MissingColumns`] without a header or explicit widths.
    /// - Any configuration error from width resolution.
    pub fn start(&mut self) -> Result<()> {
        self.ensure_not_streaming("stream")?;
        let layout = Layout::new(&self.config)?;
        let header: Vec<Vec<String>> = self
            .header
            .iter()
            .map(|row| layout.ingest(Position::Header, row))
            .collect();

        let explicit = self.config.widths.keys().max().map_or(0, |c| c + 1);
        let columns = header
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(explicit);
        if columns == 0 {
            return Err(TableError::MissingColumns);
        }
        if self.config.body.merge.spans_rows() {
            warn!(
                merge = ?self.config.body.merge,
                "streamed tables only merge cells horizontally"
            );
        }

        let widths = layout.resolve_widths(columns, &[(Position::Header, &header[..])])?;
        let cells = layout.cells(
            Position::Header,
            &header,
            columns,
            &widths,
            streamable(self.config.header.merge),
        );
        let separator_width = self.config.separator_width();
        let mut builder = ContextBuilder::new(&widths, separator_width);
        builder.section(Position::Header, &cells);
        let frames = builder.build();

        let mut stream = Stream {
            widths,
            columns,
            rows: 0,
            last: None,
        };
        let mut emitter = Emitter {
            renderer: &mut *self.renderer,
            out: &mut self.writer,
            widths: &stream.widths,
            separator_width,
            measurer: layout.measurer(),
        };
        emitter.begin()?;
        for row in split_rows(&frames) {
            stream.last = emitter.streamed_row(stream.last.as_ref(), row)?;
        }
        emitter.flush()?;

        debug!(columns, widths = ?stream.widths.widths, "started stream");
        self.stream = StreamState::Running(stream);
        Ok(())
    }

    /// Finish a stream: write the footer and the closing rule.
    ///
    /// # Errors
    ///
    /// - [`TableError::StreamNotStarted`] when no stream was started.
    /// - [`TableError::StreamClosed`] when the stream is already closed.
    /// - [`TableError::TooManyCells`] for a footer wider than the table. The
    ///   stream stays open so a corrected footer can still be written.
    pub fn close(&mut self) -> Result<()> {
        let columns = match &self.stream {
            StreamState::Running(stream) => stream.columns,
            StreamState::Idle => return Err(TableError::StreamNotStarted),
            StreamState::Closed => return Err(TableError::StreamClosed),
        };

        let layout = Layout::new(&self.config)?;
        let footer: Vec<Vec<String>> = self
            .footer
            .iter()
            .map(|row| layout.ingest(Position::Footer, row))
            .collect();
        check_row_lengths(Position::Footer, &footer, columns, 0)?;

        // Only I/O can fail from here on.
        let StreamState::Running(mut stream) =
            std::mem::replace(&mut self.stream, StreamState::Closed)
        else {
            return Err(TableError::StreamClosed);
        };
        let cells = layout.cells(
            Position::Footer,
            &footer,
            stream.columns,
            &stream.widths,
            streamable(self.config.footer.merge),
        );
        let separator_width = self.config.separator_width();
        let mut builder = ContextBuilder::new(&stream.widths, separator_width);
        builder.section(Position::Footer, &cells);
        let frames = builder.build();

        let mut emitter = Emitter {
            renderer: &mut *self.renderer,
            out: &mut self.writer,
            widths: &stream.widths,
            separator_width,
            measurer: layout.measurer(),
        };
        for row in split_rows(&frames) {
            stream.last = emitter.streamed_row(stream.last.as_ref(), row)?;
        }
        if let Some(last) = &stream.last {
            emitter.rule(RuleKind::Bottom, Some(last), None)?;
        }
        emitter.end()?;

        debug!(rows = stream.rows, "closed stream");
        Ok(())
    }

    /// Whether a stream is currently running.
    pub fn is_streaming(&self) -> bool {
        matches!(self.stream, StreamState::Running(_))
    }

    /// Drop all rows and any finished stream.
    pub fn reset(&mut self) -> Result<()> {
        self.ensure_not_streaming("rows")?;
        self.header.clear();
        self.body.clear();
        self.footer.clear();
        self.stream = StreamState::Idle;
        Ok(())
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Consume the table and return the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn ensure_not_streaming(&self, what: &'static str) -> Result<()> {
        match self.stream {
            StreamState::Running(_) => Err(TableError::StreamActive(what)),
            _ => Ok(()),
        }
    }

    /// In strict mode, reject a buffered row as soon as the column count is known.
    fn check_strict(&self, row: &[String]) -> Result<()> {
        if !self.config.strict {
            return Ok(());
        }
        let established = self.header.first().or(self.body.first()).map(Vec::len);
        match established {
            Some(columns) if row.len() > columns => Err(TableError::TooManyCells {
                section: Position::Body,
                row: self.body.len(),
                cells: row.len(),
                columns,
            }),
            _ => Ok(()),
        }
    }

    fn stream_row(&mut self, row: Vec<String>) -> Result<()> {
        let StreamState::Running(stream) = &mut self.stream else {
            return Err(TableError::StreamNotStarted);
        };
        let layout = Layout::new(&self.config)?;
        let row = layout.ingest(Position::Body, &row);
        if row.len() > stream.columns {
            return Err(TableError::TooManyCells {
                section: Position::Body,
                row: stream.rows,
                cells: row.len(),
                columns: stream.columns,
            });
        }

        let cells = layout.cells(
            Position::Body,
            &[row],
            stream.columns,
            &stream.widths,
            streamable(self.config.body.merge),
        );
        let separator_width = self.config.separator_width();
        let location = if stream.rows == 0 {
            Location::First
        } else {
            Location::Middle
        };
        let mut builder = ContextBuilder::new(&stream.widths, separator_width);
        for row in &cells {
            builder.row(Position::Body, location, stream.rows, row);
        }
        let frames = builder.build();

        let mut emitter = Emitter {
            renderer: &mut *self.renderer,
            out: &mut self.writer,
            widths: &stream.widths,
            separator_width,
            measurer: layout.measurer(),
        };
        stream.last = emitter.streamed_row(stream.last.as_ref(), &frames)?;
        emitter.flush()?;

        debug!(row = stream.rows, lines = frames.len(), "streamed row");
        stream.rows += 1;
        Ok(())
    }

    fn render_batch(&mut self) -> Result<()> {
        let layout = Layout::new(&self.config)?;
        let ingest = |position: Position, rows: &[Vec<String>]| -> Vec<Vec<String>> {
            rows.iter().map(|row| layout.ingest(position, row)).collect()
        };
        let header = ingest(Position::Header, &self.header);
        let body = ingest(Position::Body, &self.body);
        let footer = ingest(Position::Footer, &self.footer);
        let sections = [
            (Position::Header, &header[..]),
            (Position::Body, &body[..]),
            (Position::Footer, &footer[..]),
        ];

        let columns = layout.column_count(&sections)?;
        if columns == 0 {
            debug!("nothing to render");
            return Ok(());
        }
        let widths = layout.resolve_widths(columns, &sections)?;
        let separator_width = self.config.separator_width();
        let mut builder = ContextBuilder::new(&widths, separator_width);
        for (position, rows) in sections {
            let merge = self.config.section_for(position).merge;
            let cells = layout.cells(position, rows, columns, &widths, merge);
            builder.section(position, &cells);
        }
        let frames = builder.build();

        let mut emitter = Emitter {
            renderer: &mut *self.renderer,
            out: &mut self.writer,
            widths: &widths,
            separator_width,
            measurer: layout.measurer(),
        };
        emitter.begin()?;
        emitter.rule(RuleKind::Top, None, frames.first())?;
        for index in 0..frames.len() {
            let current = &frames[index];
            if let Some(previous) = index.checked_sub(1).map(|i| &frames[i]) {
                if current.is_first_line() {
                    emitter.rule(boundary(previous, current), Some(previous), Some(current))?;
                }
            }
            let ctx = line_context(&frames, index, &widths, separator_width, layout.measurer());
            emitter.line(&ctx)?;
        }
        emitter.rule(RuleKind::Bottom, frames.last(), None)?;
        emitter.end()?;

        debug!(
            columns,
            rows = body.len(),
            lines = frames.len(),
            "rendered table"
        );
        Ok(())
    }
}

/// Drives a renderer for one table layout.
struct Emitter<'a> {
    renderer: &'a mut dyn Renderer,
    out: &'a mut dyn Write,
    widths: &'a ResolvedWidths,
    separator_width: usize,
    measurer: Measurer,
}

impl Emitter<'_> {
    fn begin(&mut self) -> io::Result<()> {
        self.renderer.begin(self.out, self.widths)
    }

    /// Finish the table and flush the sink.
    fn end(&mut self) -> io::Result<()> {
        self.renderer.end(self.out)?;
        self.out.flush()
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    fn rule(
        &mut self,
        kind: RuleKind,
        above: Option<&Frame>,
        below: Option<&Frame>,
    ) -> io::Result<()> {
        let ctx = RuleContext {
            kind,
            widths: self.widths,
            above,
            below,
            separator_width: self.separator_width,
        };
        self.renderer.rule(self.out, &ctx)
    }

    fn line(&mut self, ctx: &LineContext<'_>) -> io::Result<()> {
        match ctx.position() {
            Position::Header => self.renderer.header_line(self.out, ctx),
            Position::Body => self.renderer.body_line(self.out, ctx),
            Position::Footer => self.renderer.footer_line(self.out, ctx),
        }
    }

    /// Write the lines of one row after `last`, the final line written so
    /// far. Returns the new final line.
    fn streamed_row(
        &mut self,
        last: Option<&Frame>,
        frames: &[Frame],
    ) -> io::Result<Option<Frame>> {
        let Some(first) = frames.first() else {
            return Ok(last.cloned());
        };
        match last {
            Some(previous) => self.rule(boundary(previous, first), Some(previous), Some(first))?,
            None => self.rule(RuleKind::Top, None, Some(first))?,
        }
        for (index, current) in frames.iter().enumerate() {
            let ctx = LineContext {
                widths: self.widths,
                current,
                previous: index.checked_sub(1).map(|i| &frames[i]).or(last),
                next: frames.get(index + 1),
                separator_width: self.separator_width,
                measurer: self.measurer,
            };
            self.line(&ctx)?;
        }
        Ok(frames.last().cloned())
    }
}

/// The rule kind between two adjacent rows.
fn boundary(above: &Frame, below: &Frame) -> RuleKind {
    match (above.position, below.position) {
        (a, b) if a == b => RuleKind::Row,
        (Position::Header, _) => RuleKind::Header,
        (_, Position::Footer) => RuleKind::Footer,
        _ => RuleKind::Row,
    }
}

/// The part of a merge mode that works without seeing later rows.
fn streamable(mode: MergeMode) -> MergeMode {
    if mode.horizontal() {
        MergeMode::Horizontal
    } else {
        MergeMode::None
    }
}

/// Group consecutive frames by row.
fn split_rows(frames: &[Frame]) -> impl Iterator<Item = &[Frame]> {
    frames.chunk_by(|a, b| a.position == b.position && a.row == b.row)
}
