//! Core value types shared by the layout stages.
//!
//! This module defines the enums selecting wrap and merge strategies, the
//! section/row classification used for border decisions, and the per-cell
//! record produced for every render pass.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text alignment within a column.
///
/// `None` means "not set": a column falls back to its section alignment and a
/// section falls back to [`Align::Left`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Inherit from the enclosing scope.
    #[default]
    None,
    /// Left-align text (pad on the right).
    Left,
    /// Right-align text (pad on the left).
    Right,
    /// Center text (pad on both sides, extra space on the right).
    Center,
}

impl Align {
    /// Returns `self`, or `fallback` when unset.
    pub fn or(self, fallback: Align) -> Align {
        match self {
            Align::None => fallback,
            other => other,
        }
    }
}

/// How cell text is fitted into its column width.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// Split on existing newlines only; long lines overflow.
    None,
    /// Greedy word wrap, hard-breaking words wider than the column.
    #[default]
    Normal,
    /// Keep a single line per segment and end it with `…` when cut.
    Truncate,
    /// Word wrap that splits a word at the end of the line with a `↩` marker.
    Break,
}

/// Which adjacent cells with identical content coalesce into spans.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// No merging.
    #[default]
    None,
    /// Merge runs within a row.
    Horizontal,
    /// Merge runs within a column.
    Vertical,
    /// Vertical merge that resets whenever a column to the left changes.
    Hierarchical,
    /// Horizontal first, then vertical over the resulting groups.
    Both,
}

impl MergeMode {
    /// Whether row-wise merging is active.
    pub fn horizontal(self) -> bool {
        matches!(self, MergeMode::Horizontal | MergeMode::Both)
    }

    /// Whether plain column-wise merging is active.
    pub fn vertical(self) -> bool {
        matches!(self, MergeMode::Vertical | MergeMode::Both)
    }

    /// Whether cascading column-wise merging is active.
    pub fn hierarchical(self) -> bool {
        matches!(self, MergeMode::Hierarchical)
    }

    /// Whether merging needs to look across rows.
    pub fn spans_rows(self) -> bool {
        self.vertical() || self.hierarchical()
    }
}

/// Table section a row belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Header,
    Body,
    Footer,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Position::Header => "header",
            Position::Body => "body",
            Position::Footer => "footer",
        };
        f.write_str(name)
    }
}

/// Where a row sits inside its section.
///
/// A section with a single row reports [`Location::First`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    First,
    Middle,
    Last,
}

impl Location {
    /// Classify row `index` of a section holding `count` rows.
    pub fn of(index: usize, count: usize) -> Location {
        if index == 0 {
            Location::First
        } else if index + 1 >= count {
            Location::Last
        } else {
            Location::Middle
        }
    }
}

/// Padding around cell content, in columns (left/right) and lines (top/bottom).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub left: usize,
    pub right: usize,
    pub top: usize,
    pub bottom: usize,
}

impl Default for Padding {
    fn default() -> Self {
        Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        }
    }
}

impl Padding {
    /// No padding on any side.
    pub fn none() -> Self {
        Padding {
            left: 0,
            right: 0,
            top: 0,
            bottom: 0,
        }
    }

    /// Same horizontal padding on both sides, no vertical padding.
    pub fn horizontal(width: usize) -> Self {
        Padding {
            left: width,
            right: width,
            top: 0,
            bottom: 0,
        }
    }

    /// Columns added to the cell width.
    pub fn width(&self) -> usize {
        self.left + self.right
    }
}

/// Participation of one cell in a single merge direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeSpan {
    /// Whether the cell belongs to a span of at least two cells.
    pub present: bool,
    /// Number of cells in the span (1 when not merged).
    pub span: usize,
    /// First cell of the span.
    pub start: bool,
    /// Last cell of the span.
    pub end: bool,
}

impl MergeSpan {
    /// A cell that is not part of any span.
    pub fn single() -> Self {
        MergeSpan {
            present: false,
            span: 1,
            start: false,
            end: false,
        }
    }

    /// Member `offset` of a span of `span` cells.
    pub(crate) fn member(offset: usize, span: usize) -> Self {
        MergeSpan {
            present: true,
            span,
            start: offset == 0,
            end: offset + 1 == span,
        }
    }

    /// Present and not the first member.
    pub fn is_continuation(&self) -> bool {
        self.present && !self.start
    }
}

/// Merge participation of one cell in every direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeState {
    pub horizontal: MergeSpan,
    pub vertical: MergeSpan,
    pub hierarchical: MergeSpan,
}

impl Default for MergeSpan {
    fn default() -> Self {
        MergeSpan::single()
    }
}

impl Default for MergeState {
    fn default() -> Self {
        MergeState {
            horizontal: MergeSpan::single(),
            vertical: MergeSpan::single(),
            hierarchical: MergeSpan::single(),
        }
    }
}

impl MergeState {
    /// Whether this cell continues a span started in an earlier row.
    pub fn continues_from_above(&self) -> bool {
        self.vertical.is_continuation() || self.hierarchical.is_continuation()
    }

    /// Whether a later row continues the span this cell belongs to.
    pub fn continues_below(&self) -> bool {
        (self.vertical.present && !self.vertical.end)
            || (self.hierarchical.present && !self.hierarchical.end)
    }

    /// Whether this cell is hidden inside a horizontal span started to its left.
    pub fn covered_horizontally(&self) -> bool {
        self.horizontal.is_continuation()
    }

    /// Number of columns occupied when drawn (the span for a horizontal start).
    pub fn column_span(&self) -> usize {
        if self.horizontal.present && self.horizontal.start {
            self.horizontal.span
        } else {
            1
        }
    }
}

/// A single cell after ingestion, resolved for one render pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    /// Cell text after trimming/formatting; merge decisions compare this.
    pub text: String,
    /// Display lines after wrapping against the resolved width.
    pub lines: Vec<String>,
    /// Resolved alignment (never [`Align::None`]).
    pub align: Align,
    /// Resolved padding.
    pub padding: Padding,
    /// Wrap mode applied to the text.
    pub wrap: WrapMode,
    /// Merge participation.
    pub merge: MergeState,
}

impl Cell {
    /// Create an unwrapped cell with default settings.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Cell {
            lines: vec![text.clone()],
            text,
            align: Align::Left,
            padding: Padding::default(),
            wrap: WrapMode::default(),
            merge: MergeState::default(),
        }
    }

    /// Text compared for merging: the trimmed cell text.
    pub fn merge_key(&self) -> &str {
        self.text.trim()
    }

    /// Number of display lines the cell occupies.
    pub fn height(&self) -> usize {
        self.lines.len().max(1)
    }
}
